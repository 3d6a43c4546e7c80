#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use fleet_core::validation::CarSchema;
use fleet_db::store::MemoryCarStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_api::config::{ServerConfig, StoreBackend};
use fleet_api::router::build_app_router;
use fleet_api::service::CarService;
use fleet_api::state::AppState;

/// Year the schema treats as "now", so year-bound tests do not drift.
pub const CURRENT_YEAR: i32 = 2025;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Goes through [`build_app_router`] so tests exercise the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) as production.
/// Clone the returned router to send several requests against one store.
pub fn build_test_app() -> Router {
    let config = test_config();
    let service = CarService::with_schema(
        Arc::new(MemoryCarStore::new()),
        CarSchema::new(CURRENT_YEAR),
    );
    let state = AppState::with_service(service, config.clone());
    build_app_router(state, &config).unwrap()
}

/// The Toyota Corolla used throughout the API tests, lower-cased identifiers
/// included.
pub fn corolla() -> Value {
    json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "color": "White",
        "registrationNumber": "abc123",
        "vin": "1hgcm82633a004352",
        "mileage": 20000,
        "fuelType": "Petrol",
        "transmission": "Automatic",
        "rentalPricePerDay": 50,
        "location": "Bangkok",
        "notes": "Well maintained and serviced regularly."
    })
}

/// A second, distinct car with explicit availability.
pub fn civic() -> Value {
    json!({
        "brand": "Honda",
        "model": "Civic",
        "year": 2019,
        "color": "Black",
        "registrationNumber": "XYZ789",
        "vin": "2HGFG12878H500001",
        "mileage": 30000,
        "fuelType": "Diesel",
        "transmission": "Manual",
        "rentalPricePerDay": 45,
        "availability": false,
        "location": "Chiang Mai"
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, "POST", uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, "PUT", uri, body).await
}

async fn json_request(app: Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create a car and return its id.
pub async fn create(app: &Router, body: Value) -> i64 {
    let response = post_json(app.clone(), "/api/cars", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
