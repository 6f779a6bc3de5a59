//! Health check and request ID propagation.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;

use favorites_api::middleware::REQUEST_ID_HEADER;
use favorites_integration_tests::TestApp;

#[tokio::test]
async fn test_health_ok() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "OK" }));
}

#[tokio::test]
async fn test_health_reports_database_failure() {
    let app = TestApp::new();
    app.store.set_unavailable(true);

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({ "error": "Database connection failed" }));
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/health", None, None).await;
    let id = response.headers[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = TestApp::new();

    let request = Request::builder()
        .uri("/api/v1/customers")
        .header(REQUEST_ID_HEADER, "edge-1234")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    // Even rejected requests carry the ID.
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers[REQUEST_ID_HEADER], "edge-1234");
}
