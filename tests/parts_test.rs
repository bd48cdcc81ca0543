use axum::http::StatusCode;
use serde_json::{Value, json};

mod common;
use common::{body_json, create_ok, get, post_json, put_json, setup_test_app};

#[tokio::test]
async fn test_part_crud_roundtrip() {
    let app = setup_test_app().await;

    let supplier = create_ok(&app, "/api/suppliers", &json!({ "name": "Авторазбор Юг" })).await;
    let supplier_id = supplier["id"].as_str().unwrap();

    let created = create_ok(
        &app,
        "/api/parts",
        &json!({
            "name": "Генератор Bosch",
            "condition": "excellent",
            "price": "4500",
            "purchasePrice": "2000",
            "purchaseDate": "2025-02-10",
            "location": "Стеллаж 3, полка Б",
            "supplierId": supplier_id,
            "images": ["/uploads/abc.jpg"]
        }),
    )
    .await;

    let id = created["id"].as_str().expect("created part has no id");
    assert_eq!(created["name"], "Генератор Bosch");
    assert_eq!(created["category"], "electrical", "inferred from the name");
    assert_eq!(created["condition"], "excellent");
    assert_eq!(created["status"], "available", "default status");
    assert_eq!(created["price"], "4500");
    assert_eq!(created["purchaseDate"], "2025-02-10");
    assert_eq!(created["supplierId"], *supplier_id);
    assert_eq!(created["images"][0], "/uploads/abc.jpg");

    // Update price, clear the location with an explicit null
    let response = put_json(
        &app,
        &format!("/api/parts/{id}"),
        &json!({ "price": "3900", "location": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["price"], "3900");
    assert_eq!(body["data"]["location"], Value::Null);
    assert_eq!(body["data"]["name"], "Генератор Bosch");

    // Gone after delete
    let response = common::delete(&app, &format!("/api/parts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get(&app, &format!("/api/parts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_inferred_when_omitted() {
    let app = setup_test_app().await;

    let cases = [
        ("Двигатель 1.9 TDI", "engine"),
        ("КПП механика", "transmission"),
        ("Тормозной диск передний", "brakes"),
        ("Капот", "body"),
        ("Фара правая", "exterior"),
        ("Болт М8", "other"),
    ];
    for (name, expected) in cases {
        let part = create_ok(&app, "/api/parts", &json!({ "name": name })).await;
        assert_eq!(
            part["category"], *expected,
            "wrong category for '{name}'"
        );
    }
}

#[tokio::test]
async fn test_explicit_category_wins_over_inference() {
    let app = setup_test_app().await;

    let part = create_ok(
        &app,
        "/api/parts",
        &json!({ "name": "Двигатель 2.0", "category": "other" }),
    )
    .await;
    assert_eq!(part["category"], "other");
}

#[tokio::test]
async fn test_category_is_not_reinferred_on_rename() {
    let app = setup_test_app().await;

    let part = create_ok(&app, "/api/parts", &json!({ "name": "Двигатель 2.0" })).await;
    let id = part["id"].as_str().unwrap();
    assert_eq!(part["category"], "engine");

    let response = put_json(
        &app,
        &format!("/api/parts/{id}"),
        &json!({ "name": "Фара левая" }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Фара левая");
    assert_eq!(
        body["data"]["category"], "engine",
        "stored category sticks until changed explicitly"
    );

    // An explicit category change still works
    let response = put_json(
        &app,
        &format!("/api/parts/{id}"),
        &json!({ "category": "exterior" }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["category"], "exterior");
}

#[tokio::test]
async fn test_dangling_references_rejected() {
    let app = setup_test_app().await;
    let ghost = "11111111-2222-3333-4444-555555555555";

    let response = post_json(
        &app,
        "/api/parts",
        &json!({ "name": "Генератор", "carId": ghost }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"].as_str().unwrap().contains("car"),
        "unexpected error: {}",
        body["error"]
    );

    let response = post_json(
        &app,
        "/api/parts",
        &json!({ "name": "Генератор", "supplierId": ghost }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("supplier"));

    // Updates are checked the same way
    let part = create_ok(&app, "/api/parts", &json!({ "name": "Генератор" })).await;
    let id = part["id"].as_str().unwrap();
    let response = put_json(
        &app,
        &format!("/api/parts/{id}"),
        &json!({ "carId": ghost }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_price_rejected() {
    let app = setup_test_app().await;

    let response = post_json(
        &app,
        "/api/parts",
        &json!({ "name": "Генератор", "price": "-10.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_part_list_filters() {
    let app = setup_test_app().await;

    let car = create_ok(
        &app,
        "/api/cars",
        &json!({
            "brand": "BMW", "model": "E39", "year": 2001,
            "bodyType": "sedan", "fuelType": "gasoline",
            "vin": "WBADM6105YGU91234"
        }),
    )
    .await;
    let car_id = car["id"].as_str().unwrap();

    create_ok(
        &app,
        "/api/parts",
        &json!({
            "name": "Двигатель M54", "carId": car_id,
            "condition": "good", "price": "85000",
            "notes": "пробег 180 тыс"
        }),
    )
    .await;
    create_ok(
        &app,
        "/api/parts",
        &json!({
            "name": "Фара левая", "carId": car_id,
            "condition": "fair", "price": "6000"
        }),
    )
    .await;
    create_ok(
        &app,
        "/api/parts",
        &json!({ "name": "Генератор", "condition": "good", "price": "4500" }),
    )
    .await;

    // By category
    let body = body_json(get(&app, "/api/parts?category=engine").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "Двигатель M54");

    // By condition
    let body = body_json(get(&app, "/api/parts?condition=good").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 2);

    // By donor car
    let body = body_json(get(&app, &format!("/api/parts?carId={car_id}")).await).await;
    assert_eq!(body["data"]["pagination"]["total"], 2);

    // Price range
    let body = body_json(get(&app, "/api/parts?minPrice=5000&maxPrice=10000").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "Фара левая");

    // Free text over name and notes
    let needle = url_escape::encode_component("пробег");
    let body = body_json(get(&app, &format!("/api/parts?q={needle}")).await).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    // Status filter: everything is still available
    let body = body_json(get(&app, "/api/parts?status=sold").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_part_suggestions() {
    let app = setup_test_app().await;

    let needle = url_escape::encode_component("фара");
    let body = body_json(get(&app, &format!("/api/parts/suggestions?q={needle}")).await).await;
    assert_eq!(body["success"], true);
    let names = body["data"].as_array().unwrap();
    assert_eq!(names.len(), 2);
    assert_eq!(names[0], "Фара левая");
    assert_eq!(names[1], "Фара правая");

    // Case-insensitive
    let needle = url_escape::encode_component("ФАРА");
    let body = body_json(get(&app, &format!("/api/parts/suggestions?q={needle}")).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Limit caps the result
    let needle = url_escape::encode_component("а");
    let body =
        body_json(get(&app, &format!("/api/parts/suggestions?q={needle}&limit=3")).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // Blank query yields an empty list, not the whole catalogue
    let body = body_json(get(&app, "/api/parts/suggestions?q=%20%20").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    let body = body_json(get(&app, "/api/parts/suggestions").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
