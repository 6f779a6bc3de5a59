//! Health check handler.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

/// `GET /health`
///
/// Pings the database. Answers 500 with `{"error": ...}` when it is unreachable.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.health().ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "OK" }))),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database connection failed" })),
            )
        }
    }
}
