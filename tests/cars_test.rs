use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use serde_json::{Value, json};

mod common;
use common::{body_json, create_ok, delete, get, post_json, put_json, setup_test_app};

fn car_payload(brand: &str, model: &str, year: i32, vin: &str) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "year": year,
        "bodyType": "sedan",
        "fuelType": "gasoline",
        "vin": vin
    })
}

#[tokio::test]
async fn test_car_crud_roundtrip() {
    let app = setup_test_app().await;

    let created = create_ok(
        &app,
        "/api/cars",
        &json!({
            "brand": "Volkswagen",
            "model": "Passat B6",
            "year": 2008,
            "bodyType": "wagon",
            "fuelType": "diesel",
            "engineVolume": "1.9",
            "mileage": 245000,
            "vin": "WVWZZZ3CZ8P031337",
            "color": "silver"
        }),
    )
    .await;

    let id = created["id"].as_str().expect("created car has no id");
    assert_eq!(created["brand"], "Volkswagen");
    assert_eq!(created["bodyType"], "wagon");
    assert_eq!(created["fuelType"], "diesel");
    assert_eq!(created["mileage"], 245000);
    assert_eq!(created["vin"], "WVWZZZ3CZ8P031337");
    assert!(created["createdAt"].is_string(), "missing camelCase createdAt");
    assert!(created["images"].is_array(), "images should default to []");

    // Read it back
    let response = get(&app, &format!("/api/cars/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["model"], "Passat B6");

    // Partial update: change mileage, clear color with an explicit null
    let response = put_json(
        &app,
        &format!("/api/cars/{id}"),
        &json!({ "mileage": 250000, "color": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["mileage"], 250000);
    assert_eq!(body["data"]["color"], Value::Null);
    // Untouched fields keep their values
    assert_eq!(body["data"]["brand"], "Volkswagen");

    // Delete, then the car is gone
    let response = delete(&app, &format!("/api/cars/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"], *id, "delete should echo the id");

    let response = get(&app, &format!("/api/cars/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_vin_must_be_exactly_17_chars() {
    let app = setup_test_app().await;

    for bad_vin in ["WVWZZZ3CZ8P03133", "WVWZZZ3CZ8P0313370"] {
        let response = post_json(
            &app,
            "/api/cars",
            &car_payload("Opel", "Astra H", 2007, bad_vin),
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "vin '{bad_vin}' should be rejected"
        );
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(
            body["error"].as_str().unwrap().contains("17"),
            "unexpected error: {}",
            body["error"]
        );
    }
}

#[tokio::test]
async fn test_duplicate_vin_rejected() {
    let app = setup_test_app().await;

    create_ok(
        &app,
        "/api/cars",
        &car_payload("Ford", "Focus II", 2006, "WF0WXXGCDW5K12345"),
    )
    .await;

    // Same VIN again, different case: VINs are normalized to uppercase
    let response = post_json(
        &app,
        "/api/cars",
        &car_payload("Ford", "Focus II", 2007, "wf0wxxgcdw5k12345"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"].as_str().unwrap().contains("already exists"),
        "unexpected error: {}",
        body["error"]
    );
}

#[tokio::test]
async fn test_year_bounds() {
    let app = setup_test_app().await;
    let next_year = Utc::now().year() + 1;

    // Too old
    let response = post_json(
        &app,
        "/api/cars",
        &car_payload("Ford", "Model T", 1899, "VIN00000000000001"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Too far in the future
    let response = post_json(
        &app,
        "/api/cars",
        &car_payload("Lada", "Vesta", next_year + 1, "VIN00000000000002"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Next model year is fine
    let response = post_json(
        &app,
        "/api/cars",
        &car_payload("Lada", "Vesta", next_year, "VIN00000000000003"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_validation_errors_are_collected() {
    let app = setup_test_app().await;

    let response = post_json(
        &app,
        "/api/cars",
        &json!({
            "brand": "   ",
            "model": "Unknown",
            "year": 1850,
            "bodyType": "sedan",
            "fuelType": "gasoline",
            "vin": "SHORT"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    let details = body["details"].as_array().expect("details array expected");
    assert_eq!(details.len(), 3, "brand, year and vin problems: {details:?}");
}

#[tokio::test]
async fn test_delete_car_with_parts_refused() {
    let app = setup_test_app().await;

    let car = create_ok(
        &app,
        "/api/cars",
        &car_payload("BMW", "E46", 2003, "WBAAV33481FU91768"),
    )
    .await;
    let car_id = car["id"].as_str().unwrap();

    let part = create_ok(
        &app,
        "/api/parts",
        &json!({ "name": "Генератор", "carId": car_id }),
    )
    .await;
    let part_id = part["id"].as_str().unwrap();

    // Refused while the part exists
    let response = delete(&app, &format!("/api/cars/{car_id}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["error"].as_str().unwrap().contains("1 part(s)"),
        "unexpected error: {}",
        body["error"]
    );

    // The car survived
    let response = get(&app, &format!("/api/cars/{car_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // After removing the part the car can go
    let response = delete(&app, &format!("/api/parts/{part_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = delete(&app, &format!("/api/cars/{car_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn seed_filter_cars(app: &axum::Router) {
    for payload in [
        json!({
            "brand": "BMW", "model": "320i E90", "year": 2006,
            "bodyType": "sedan", "fuelType": "gasoline",
            "mileage": 180000, "vin": "VINBMW00000000001"
        }),
        json!({
            "brand": "BMW", "model": "X5 E53", "year": 2004,
            "bodyType": "suv", "fuelType": "diesel",
            "mileage": 260000, "vin": "VINBMW00000000002"
        }),
        json!({
            "brand": "Audi", "model": "A4 B7", "year": 2006,
            "bodyType": "wagon", "fuelType": "diesel",
            "mileage": 210000, "vin": "VINAUDI0000000003"
        }),
    ] {
        create_ok(app, "/api/cars", &payload).await;
    }
}

#[tokio::test]
async fn test_car_list_filters() {
    let app = setup_test_app().await;
    seed_filter_cars(&app).await;

    // Brand filter is a case-insensitive substring
    let body = body_json(get(&app, "/api/cars?brand=bmw").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 2);

    // Year is exact
    let body = body_json(get(&app, "/api/cars?year=2006").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 2);

    // Enum filters
    let body = body_json(get(&app, "/api/cars?bodyType=suv").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["model"], "X5 E53");

    let body = body_json(get(&app, "/api/cars?fuelType=diesel&brand=bmw").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    // Mileage range
    let body = body_json(get(&app, "/api/cars?minMileage=200000&maxMileage=230000").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["brand"], "Audi");

    // Free-text q matches VIN fragments too
    let body = body_json(get(&app, "/api/cars?q=vinaudi").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    // No match
    let body = body_json(get(&app, "/api/cars?brand=toyota").await).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_car_sorting() {
    let app = setup_test_app().await;
    seed_filter_cars(&app).await;

    let body = body_json(get(&app, "/api/cars?sort=year&order=asc").await).await;
    let years: Vec<i64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|car| car["year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2004, 2006, 2006]);

    // Sort without an explicit order is ascending
    let body = body_json(get(&app, "/api/cars?sort=mileage").await).await;
    let mileages: Vec<i64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|car| car["mileage"].as_i64().unwrap())
        .collect();
    assert_eq!(mileages, vec![180000, 210000, 260000]);

    // Unknown sort keys fall back to the default instead of erroring
    let response = get(&app, "/api/cars?sort=nonsense").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["pagination"]["total"], 3);
}

#[tokio::test]
async fn test_car_parts_listing() {
    let app = setup_test_app().await;

    let car = create_ok(
        &app,
        "/api/cars",
        &car_payload("Mazda", "6 GG", 2005, "JMZGG12F201234567"),
    )
    .await;
    let car_id = car["id"].as_str().unwrap();

    for name in ["Бампер передний", "Альтернатор", "Фара левая"] {
        create_ok(&app, "/api/parts", &json!({ "name": name, "carId": car_id })).await;
    }
    // A part from another source does not show up
    create_ok(&app, "/api/parts", &json!({ "name": "Генератор" })).await;

    let response = get(&app, &format!("/api/cars/{car_id}/parts")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // Unknown car yields 404, not an empty list
    let response = get(
        &app,
        "/api/cars/00000000-0000-0000-0000-000000000000/parts",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
