//! Session tokens.
//!
//! Tokens are HS256 JWTs with `{user_id, iat, exp}` claims (epoch seconds).
//! There is no refresh and no revocation: a token is valid while its
//! signature checks out and `exp` has not passed.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use favorites_core::UserId;

use crate::config::TokenConfig;

/// Required prefix of the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Token validation and signing errors.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("authorization header is not a bearer token")]
    MissingBearerPrefix,

    /// Bad signature, malformed token or missing claims.
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    /// Issued at (epoch seconds).
    pub iat: i64,
    /// Expires at (epoch seconds).
    pub exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl TokenIssuer {
    /// Build an issuer from token configuration.
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        // Expiry is checked in `validate_at` against an explicit clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(config.ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for `user_id` starting now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token for `user_id` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            user_id,
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)
    }

    /// Validate an `Authorization` header value and return the user it names.
    ///
    /// # Errors
    ///
    /// Returns a `TokenError` if the header lacks the `Bearer ` prefix, the
    /// token does not verify, or it has expired.
    pub fn validate(&self, header_value: &str) -> Result<UserId, TokenError> {
        self.validate_at(header_value, Utc::now())
    }

    /// Validate an `Authorization` header value against the clock `now`.
    ///
    /// # Errors
    ///
    /// See [`TokenIssuer::validate`].
    pub fn validate_at(
        &self,
        header_value: &str,
        now: DateTime<Utc>,
    ) -> Result<UserId, TokenError> {
        let token = header_value
            .strip_prefix(BEARER_PREFIX)
            .ok_or(TokenError::MissingBearerPrefix)?;

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;

        if now.timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.user_id)
    }
}
