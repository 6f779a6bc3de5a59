//! Customer repository for `PostgreSQL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use favorites_core::{CustomerId, CustomerName, Email};

use super::{CustomerStore, NewCustomer, RepositoryError, conflict_on_unique};
use crate::models::Customer;

/// Database row for `customers`.
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let name = CustomerName::parse(&row.name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid customer name in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name,
            email,
            created_at: row.created_at,
        })
    }
}

/// Repository for customer database operations.
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            INSERT INTO customers (id, name, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at
            ",
        )
        .bind(customer.id)
        .bind(customer.name.as_str())
        .bind(&customer.email)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique("email"))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, created_at
            FROM customers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Customer::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, created_at
            FROM customers
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(Customer::try_from)
        .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, created_at
            FROM customers
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn update(
        &self,
        id: CustomerId,
        name: &CustomerName,
        email: &Email,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customers
            SET name = $2, email = $3
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(name.as_str())
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(conflict_on_unique("email"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
