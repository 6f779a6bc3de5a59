//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server-side failures are
//! logged and captured to Sentry with full detail; clients only ever see a
//! `{"message": "..."}` body with a fixed text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::{CustomerError, FavoriteError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Sign-up or sign-in failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Customer operation failed.
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    /// Favorite operation failed.
    #[error("Favorite error: {0}")]
    Favorite(#[from] FavoriteError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    /// Whether this is a server-side failure.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        match self {
            Self::Auth(err) => matches!(
                err,
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::Token(_)
            ),
            Self::Customer(err) => matches!(err, CustomerError::Repository(_)),
            Self::Favorite(_) => true,
            Self::NotFound(_) | Self::Unauthorized(_) | Self::BadRequest(_) => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::UserAlreadyExists)
            | Self::Customer(CustomerError::EmailExists) => StatusCode::CONFLICT,
            Self::Customer(CustomerError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Don't expose internal error details to clients
    fn message(&self) -> String {
        match self {
            Self::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            Self::Auth(AuthError::UserAlreadyExists) => "Username already exists".to_string(),
            Self::Customer(CustomerError::EmailExists) => "Email already exists".to_string(),
            Self::Customer(CustomerError::NotFound) => "Customer not found".to_string(),
            Self::NotFound(msg) | Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
