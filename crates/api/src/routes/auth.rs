//! Sign-up and sign-in handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use favorites_core::Username;

use super::{INVALID_REQUEST_MESSAGE, JsonBody};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::AuthService;
use crate::services::auth::MIN_PASSWORD_LENGTH;
use crate::state::AppState;

/// Sign-up and sign-in request body.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// At least 3 characters.
    pub username: Username,
    /// At least 8 characters.
    pub password: String,
}

impl CredentialsRequest {
    fn validate(&self) -> Result<()> {
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(INVALID_REQUEST_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Sign-in response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /signup`
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<(StatusCode, Json<User>)> {
    req.validate()?;

    let user = AuthService::new(state.users(), state.tokens())
        .sign_up(req.username, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /signin`
pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<TokenResponse>> {
    req.validate()?;

    let token = AuthService::new(state.users(), state.tokens())
        .sign_in(&req.username, &req.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
