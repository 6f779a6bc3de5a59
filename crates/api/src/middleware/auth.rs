//! Bearer token authentication.
//!
//! [`require_bearer`] guards the `/api/v1` routes. On success the caller's
//! user id is recorded on the request span and the Sentry scope.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Message for requests without an `Authorization` header.
pub const MISSING_HEADER_MESSAGE: &str = "Authorization header is required";

/// Message for requests whose token does not validate.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Middleware that rejects requests without a valid bearer token.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the header is missing or the token is
/// malformed, badly signed or expired.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized(MISSING_HEADER_MESSAGE.to_string()))?;

    let header = header
        .to_str()
        .map_err(|_| AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()))?;

    let user_id = state.tokens().validate(header).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AppError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    Span::current().record("user_id", tracing::field::display(user_id));
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });

    Ok(next.run(request).await)
}
