mod common;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use serde_json::json;
use sku_forecast_api::tracing::REQUEST_ID_HEADER;

use common::{response_json, TestApp};

#[tokio::test]
async fn lists_seed_catalog() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/skus", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let skus = body["skus"].as_array().expect("skus array");
    assert_eq!(skus.len(), 10);
    assert_eq!(
        skus[0],
        json!({
            "id": "SKU001",
            "name": "Organic Bananas",
            "category": "Produce",
            "base_price": 2.99
        })
    );
    assert_eq!(skus[9]["id"], "SKU010");
}

#[tokio::test]
async fn add_product_then_forecast_it() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/add-product",
            Some(json!({
                "sku_id": "SKU011",
                "name": "Honeycrisp Apples",
                "category": "Produce",
                "base_price": "3.29",
                "supplier": "Orchard Co",
                "lead_time_days": 2
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Product added successfully");
    assert_eq!(
        body["product"],
        json!({
            "id": "SKU011",
            "name": "Honeycrisp Apples",
            "category": "Produce",
            "base_price": 3.29,
            "description": "",
            "supplier": "Orchard Co",
            "lead_time_days": 2,
            "min_order_quantity": 50
        })
    );

    let listed = response_json(app.request(Method::GET, "/skus", None).await).await;
    assert_eq!(listed["skus"].as_array().unwrap().len(), 11);
    assert_eq!(listed["skus"][10]["id"], "SKU011");

    let response = app
        .request(
            Method::POST,
            "/predict",
            Some(json!({ "sku_id": "SKU011", "price": 3.29 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["sku"]["id"], "SKU011");
    assert_eq!(body["forecast"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn add_product_without_id_gets_timestamp_id() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/add-product",
            Some(json!({ "name": "Rye Bread", "category": "Bakery", "base_price": 4.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    let id = body["product"]["id"].as_str().expect("id string");
    assert!(id.starts_with("SKU"));
    assert_eq!(id.len(), "SKU".len() + 14);
    assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn add_product_missing_base_price_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/add-product",
            Some(json!({ "name": "Rye Bread", "category": "Bakery" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await,
        json!({ "error": "Missing required field: base_price" })
    );
    assert_eq!(app.state.catalog.len(), 10);
}

#[tokio::test]
async fn add_product_non_numeric_lead_time_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/add-product",
            Some(json!({
                "name": "Rye Bread",
                "category": "Bakery",
                "base_price": 4.0,
                "lead_time_days": "next week"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await["error"],
        "Invalid value for field: lead_time_days"
    );
}

#[tokio::test]
async fn predict_unknown_sku_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/predict",
            Some(json!({ "sku_id": "SKU999", "price": 1.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response_json(response).await,
        json!({ "error": "SKU not found" })
    );
}

#[tokio::test]
async fn predict_numeric_sku_id_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/predict",
            Some(json!({ "sku_id": 999, "price": 1.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response_json(response).await,
        json!({ "error": "SKU not found" })
    );
}

#[tokio::test]
async fn predict_null_promotion_flag_is_no_promotion() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/predict",
            Some(json!({ "sku_id": "SKU002", "price": 8.99, "promo_active": null })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["kpis"]["uplift"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn predict_returns_forecast_and_kpis() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/predict",
            Some(json!({ "sku_id": "SKU001", "price": 2.99, "promo_active": false })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["sku"]["id"], "SKU001");

    let forecast = body["forecast"].as_array().expect("forecast array");
    assert_eq!(forecast.len(), 7);

    let mut previous: Option<NaiveDate> = None;
    let mut total = 0;
    for point in forecast {
        let date = NaiveDate::parse_from_str(point["date"].as_str().unwrap(), "%Y-%m-%d")
            .expect("YYYY-MM-DD date");
        if let Some(prev) = previous {
            assert_eq!(prev.succ_opt(), Some(date));
        }
        previous = Some(date);

        let demand = point["demand"].as_u64().unwrap();
        assert!(point["confidence_lower"].as_u64().unwrap() <= demand);
        assert!(demand <= point["confidence_upper"].as_u64().unwrap());
        assert_eq!(point["day_of_week"], date.format("%A").to_string());
        total += demand;
    }

    let kpis = &body["kpis"];
    assert_eq!(kpis["total_forecast"].as_u64(), Some(total));
    assert_eq!(kpis["uplift"].as_f64(), Some(0.0));
    let mape = kpis["mape"].as_f64().unwrap();
    assert!((8.0..=15.0).contains(&mape));
    let fill_rate = kpis["fill_rate"].as_f64().unwrap();
    assert!((85.0..=98.0).contains(&fill_rate));
    let avg = kpis["avg_demand"].as_f64().unwrap();
    assert!((avg * 7.0 - total as f64).abs() <= 0.05 * 7.0 + 1e-9);
}

#[tokio::test]
async fn predict_with_promotion_reports_uplift() {
    let app = TestApp::new();

    let body = response_json(
        app.request(
            Method::POST,
            "/predict",
            Some(json!({ "sku_id": "SKU005", "price": 1.49, "promo_active": true })),
        )
        .await,
    )
    .await;

    let uplift = body["kpis"]["uplift"].as_f64().unwrap();
    assert!((15.0..=35.0).contains(&uplift));
}

#[tokio::test]
async fn predict_defaults_price_to_zero() {
    let app = TestApp::new();

    let response = app
        .request(Method::POST, "/predict", Some(json!({ "sku_id": "SKU009" })))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn predict_malformed_body_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request_raw(Method::POST, "/predict", "{\"sku_id\": ")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response_json(response).await["error"].is_string());
}

#[tokio::test]
async fn seeded_apps_replay_identical_forecasts() {
    let first = TestApp::new();
    let second = TestApp::new();
    let payload = json!({ "sku_id": "SKU003", "price": 3.0, "promo_active": true });

    let a = response_json(
        first
            .request(Method::POST, "/predict", Some(payload.clone()))
            .await,
    )
    .await;
    let b = response_json(second.request(Method::POST, "/predict", Some(payload)).await).await;

    assert_eq!(a["forecast"], b["forecast"]);
    assert_eq!(a["kpis"], b["kpis"]);
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn health_details_include_catalog_size() {
    let app = TestApp::new();

    let body = response_json(app.request(Method::GET, "/health/details", None).await).await;
    assert_eq!(body["catalog_size"], 10);
    assert_eq!(body["seeded_randomness"], true);
}

#[tokio::test]
async fn trends_endpoint_is_not_served() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/trends", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();

    let response = app
        .request(Method::GET, "/api-docs/openapi.json", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["paths"]["/predict"].is_object());
}
