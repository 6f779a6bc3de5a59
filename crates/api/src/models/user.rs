//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use favorites_core::{UserId, Username};

/// A registered user.
///
/// The password hash stays in the store and is never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}
