//! Persistence for users, customers and favorites.
//!
//! # Tables
//!
//! - `users` - Sign-up accounts (username + Argon2 password hash)
//! - `customers` - Customer records, unique by email
//! - `customers_favorite_products` - `(customer_id, product_id)` pairs
//!
//! Each table is reached through a store trait so handlers can run against
//! `PostgreSQL` in production and [`memory::MemoryStore`] in tests.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p favorites-cli -- migrate
//! ```

pub mod customers;
pub mod favorites;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use favorites_core::{CustomerId, CustomerName, Email, ProductId, UserId, Username};

use crate::config::DatabaseConfig;
use crate::models::{Customer, User};

pub use customers::CustomerRepository;
pub use favorites::FavoriteRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect_options())
        .await
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(
    what: &'static str,
) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict(format!("{what} already exists"));
        }
        RepositoryError::Database(e)
    }
}

/// A user to insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub username: Username,
    /// PHC-format Argon2 hash.
    pub password_hash: String,
}

/// A customer to insert.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub id: CustomerId,
    pub name: CustomerName,
    pub email: Email,
}

/// Storage for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user.
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Look up a user and their password hash by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError>;
}

/// Storage for customer records.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a customer.
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError>;

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError>;

    /// All customers in storage order.
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Overwrite name and email. Returns `false` if no row matched.
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    async fn update(
        &self,
        id: CustomerId,
        name: &CustomerName,
        email: &Email,
    ) -> Result<bool, RepositoryError>;

    /// Delete a customer. Returns `false` if no row matched.
    async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError>;
}

/// Storage for favorite `(customer, product)` pairs.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Record a favorite. Adding an existing pair is a no-op.
    async fn add(&self, customer_id: CustomerId, product_id: ProductId)
    -> Result<(), RepositoryError>;

    /// Remove a product from every customer's favorites.
    ///
    /// Returns the number of rows removed.
    async fn remove_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError>;

    /// Product IDs favorited by a customer.
    async fn product_ids(&self, customer_id: CustomerId) -> Result<Vec<ProductId>, RepositoryError>;
}

/// Connectivity probe used by `/health`.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), RepositoryError>;
}

#[async_trait]
impl HealthCheck for PgPool {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self).await?;
        Ok(())
    }
}

/// The set of stores shared by all handlers.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub favorites: Arc<dyn FavoriteStore>,
    pub health: Arc<dyn HealthCheck>,
}

impl Stores {
    /// Stores backed by a `PostgreSQL` pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            customers: Arc::new(CustomerRepository::new(pool.clone())),
            favorites: Arc::new(FavoriteRepository::new(pool.clone())),
            health: Arc::new(pool.clone()),
        }
    }

    /// Stores sharing one in-memory backend.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn in_memory(store: &Arc<memory::MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            customers: store.clone(),
            favorites: store.clone(),
            health: store.clone(),
        }
    }
}
