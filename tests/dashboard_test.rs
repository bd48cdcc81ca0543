use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{body_json, create_ok, get, put_json, setup_test_app};

#[tokio::test]
async fn test_healthz_reports_ok() {
    let app = setup_test_app().await;

    let response = get(&app, "/api/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_stats_on_an_empty_database() {
    let app = setup_test_app().await;

    let body = body_json(get(&app, "/api/dashboard/stats").await).await;
    assert_eq!(body["success"], true);
    let stats = &body["data"];
    assert_eq!(stats["cars"], 0);
    assert_eq!(stats["parts"], 0);
    assert_eq!(stats["suppliers"], 0);
    assert_eq!(stats["customers"], 0);
    assert_eq!(stats["sales"], 0);
    assert_eq!(stats["partsByStatus"]["available"], 0);
    assert_eq!(stats["partsByStatus"]["sold"], 0);
    assert_eq!(stats["totalRevenue"], "0");
}

#[tokio::test]
async fn test_stats_reflect_the_inventory() {
    let app = setup_test_app().await;

    for (brand, vin) in [("BMW", "VINBMW00000000001"), ("Audi", "VINAUDI0000000002")] {
        create_ok(
            &app,
            "/api/cars",
            &json!({
                "brand": brand, "model": "X", "year": 2005,
                "bodyType": "sedan", "fuelType": "gasoline", "vin": vin
            }),
        )
        .await;
    }
    create_ok(&app, "/api/suppliers", &json!({ "name": "Разбор 61" })).await;
    create_ok(&app, "/api/customers", &json!({ "name": "Иванов" })).await;

    let mut part_ids = Vec::new();
    for name in ["Генератор", "Фара левая", "Капот", "Дверь передняя"] {
        let part = create_ok(&app, "/api/parts", &json!({ "name": name })).await;
        part_ids.push(part["id"].as_str().unwrap().to_string());
    }

    // Sell two parts, scrap a third
    create_ok(&app, "/api/sales", &json!({ "partId": part_ids[0], "price": "100" })).await;
    create_ok(&app, "/api/sales", &json!({ "partId": part_ids[1], "price": "250" })).await;
    let response = put_json(
        &app,
        &format!("/api/parts/{}", part_ids[2]),
        &json!({ "status": "scrapped" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(get(&app, "/api/dashboard/stats").await).await;
    let stats = &body["data"];
    assert_eq!(stats["cars"], 2);
    assert_eq!(stats["parts"], 4);
    assert_eq!(stats["suppliers"], 1);
    assert_eq!(stats["customers"], 1);
    assert_eq!(stats["sales"], 2);
    assert_eq!(stats["partsByStatus"]["available"], 1);
    assert_eq!(stats["partsByStatus"]["reserved"], 0);
    assert_eq!(stats["partsByStatus"]["sold"], 2);
    assert_eq!(stats["partsByStatus"]["scrapped"], 1);
    assert_eq!(stats["totalRevenue"], "350");
}

#[tokio::test]
async fn test_cancelled_sales_drop_out_of_revenue() {
    let app = setup_test_app().await;

    let part = create_ok(&app, "/api/parts", &json!({ "name": "Генератор" })).await;
    let sale = create_ok(
        &app,
        "/api/sales",
        &json!({ "partId": part["id"], "price": "500" }),
    )
    .await;

    let body = body_json(get(&app, "/api/dashboard/stats").await).await;
    assert_eq!(body["data"]["totalRevenue"], "500");

    let sale_id = sale["id"].as_str().unwrap();
    let response = common::delete(&app, &format!("/api/sales/{sale_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(get(&app, "/api/dashboard/stats").await).await;
    assert_eq!(body["data"]["sales"], 0);
    assert_eq!(body["data"]["totalRevenue"], "0");
    assert_eq!(body["data"]["partsByStatus"]["available"], 1);
}
