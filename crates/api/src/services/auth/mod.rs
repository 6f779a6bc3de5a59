//! Authentication service.
//!
//! Username/password accounts with Argon2id hashes; successful sign-in
//! returns a signed session token.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenError, TokenIssuer};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use favorites_core::{UserId, Username};

use crate::db::{NewUser, RepositoryError, UserStore};
use crate::models::User;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles user registration and sign-in.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore, tokens: &'a TokenIssuer) -> Self {
        Self { users, tokens }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the username is already registered.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn sign_up(&self, username: Username, password: &str) -> Result<User, AuthError> {
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let new_user = NewUser {
            id: UserId::generate(),
            username,
            password_hash,
        };

        // A concurrent sign-up can still win the race; the unique index decides.
        let user = self.users.create(&new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Sign in and issue a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown, the
    /// password is wrong, or the lookup itself fails.
    /// Returns `AuthError::Token` if the token cannot be signed.
    pub async fn sign_in(&self, username: &Username, password: &str) -> Result<String, AuthError> {
        let (user, password_hash) = match self.users.find_by_username(username).await {
            Ok(Some(found)) => found,
            Ok(None) => return Err(AuthError::InvalidCredentials),
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed during sign-in");
                return Err(AuthError::InvalidCredentials);
            }
        };

        verify_password(password, &password_hash)?;

        Ok(self.tokens.issue(user.id)?)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
