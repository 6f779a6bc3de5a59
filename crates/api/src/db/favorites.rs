//! Favorite product repository for `PostgreSQL`.

use async_trait::async_trait;
use sqlx::PgPool;

use favorites_core::{CustomerId, ProductId};

use super::{FavoriteStore, RepositoryError};

/// Repository for `customers_favorite_products`.
///
/// There is no foreign key to `customers`: favorites survive customer deletion.
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteStore for FavoriteRepository {
    async fn add(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customers_favorite_products (customer_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (customer_id, product_id) DO NOTHING
            ",
        )
        .bind(customer_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_by_product(&self, product_id: ProductId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM customers_favorite_products WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn product_ids(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<ProductId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, ProductId>(
            r"
            SELECT product_id
            FROM customers_favorite_products
            WHERE customer_id = $1
            ",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
