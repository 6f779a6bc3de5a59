//! Customer CRUD over HTTP.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use favorites_integration_tests::TestApp;

const UNKNOWN_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

#[tokio::test]
async fn test_create_and_fetch_customer() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;

    let created = app
        .create_customer(&token, "John Doe", "john@example.com")
        .await;
    assert_eq!(created["name"], "John Doe");
    assert_eq!(created["email"], "john@example.com");
    let id = created["id"].as_str().unwrap();

    let fetched = app
        .request(Method::GET, &format!("/api/v1/customers/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created);

    let listed = app
        .request(Method::GET, "/api/v1/customers", None, Some(&token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([created]));
}

#[tokio::test]
async fn test_create_accepts_long_name() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;
    let name = "n".repeat(300);

    let created = app
        .request(
            Method::POST,
            "/api/v1/customers",
            Some(json!({ "name": name, "email": "long@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["name"], name);
}

#[tokio::test]
async fn test_empty_list_is_array() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;

    let listed = app
        .request(Method::GET, "/api/v1/customers", None, Some(&token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;

    for body in [
        json!({ "name": "Jo", "email": "jo@example.com" }),
        json!({ "name": "John Doe", "email": "not-an-email" }),
        json!({ "name": "John Doe" }),
    ] {
        let response = app
            .request(Method::POST, "/api/v1/customers", Some(body), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["message"], "Invalid request data");
    }
}

#[tokio::test]
async fn test_email_uniqueness() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;

    let original = app.create_customer(&token, "First", "a@x.com").await;

    let duplicate = app
        .request(
            Method::POST,
            "/api/v1/customers",
            Some(json!({ "name": "Second", "email": "a@x.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["message"], "Email already exists");

    let third = app.create_customer(&token, "Third", "c@x.com").await;
    let third_id = third["id"].as_str().unwrap();
    let steal = app
        .request(
            Method::PUT,
            &format!("/api/v1/customers/{third_id}"),
            Some(json!({ "name": "Third", "email": "a@x.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(steal.status, StatusCode::CONFLICT);

    let original_id = original["id"].as_str().unwrap();
    let keep = app
        .request(
            Method::PUT,
            &format!("/api/v1/customers/{original_id}"),
            Some(json!({ "name": "First Renamed", "email": "a@x.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(keep.status, StatusCode::NO_CONTENT);
    assert_eq!(keep.body, serde_json::Value::Null);

    let fetched = app
        .request(
            Method::GET,
            &format!("/api/v1/customers/{original_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(fetched.body["name"], "First Renamed");
    assert_eq!(fetched.body["created_at"], original["created_at"]);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;

    let missing = app
        .request(
            Method::GET,
            &format!("/api/v1/customers/{UNKNOWN_ID}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Customer not found");

    let update_missing = app
        .request(
            Method::PUT,
            &format!("/api/v1/customers/{UNKNOWN_ID}"),
            Some(json!({ "name": "Nobody", "email": "nobody@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(update_missing.status, StatusCode::NOT_FOUND);

    let delete_missing = app
        .request(
            Method::DELETE,
            &format!("/api/v1/customers/{UNKNOWN_ID}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(delete_missing.status, StatusCode::NOT_FOUND);

    for method in [Method::GET, Method::DELETE] {
        let malformed = app
            .request(method, "/api/v1/customers/not-a-uuid", None, Some(&token))
            .await;
        assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
        assert_eq!(malformed.body["message"], "Invalid customer ID");
    }
}

#[tokio::test]
async fn test_delete_customer() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;
    let customer = app
        .create_customer(&token, "John Doe", "john@example.com")
        .await;
    let uri = format!("/api/v1/customers/{}", customer["id"].as_str().unwrap());

    let deleted = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let fetched = app.request(Method::GET, &uri, None, Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    // Email is free again once the customer is gone.
    app.create_customer(&token, "John Again", "john@example.com")
        .await;
}

#[tokio::test]
async fn test_store_outage_is_500_without_detail() {
    let app = TestApp::new();
    let token = app.sign_in_new_user("alice").await;
    app.store.set_unavailable(true);

    let response = app
        .request(Method::GET, "/api/v1/customers", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["message"], "Internal server error");
}
