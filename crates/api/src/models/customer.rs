//! Customer domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use favorites_core::{CustomerId, CustomerName, Email};

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: CustomerName,
    /// Email address, unique across customers.
    pub email: Email,
    /// When the customer was created. Never changes on update.
    pub created_at: DateTime<Utc>,
}
