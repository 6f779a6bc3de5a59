//! Favorite products service.

use std::collections::HashSet;

use thiserror::Error;

use favorites_core::{CustomerId, Product, ProductId};

use crate::catalog::{CatalogError, CatalogSource};
use crate::db::{FavoriteStore, RepositoryError};

/// Errors from favorite operations.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// The product catalog could not be fetched.
    #[error("catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
}

/// Add, remove and list favorite products.
pub struct FavoriteService<'a> {
    favorites: &'a dyn FavoriteStore,
    catalog: &'a dyn CatalogSource,
}

impl<'a> FavoriteService<'a> {
    #[must_use]
    pub const fn new(favorites: &'a dyn FavoriteStore, catalog: &'a dyn CatalogSource) -> Self {
        Self { favorites, catalog }
    }

    /// Mark a product as a customer's favorite.
    ///
    /// Neither the customer nor the product is checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `FavoriteError::Repository` if the insert fails.
    pub async fn add(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> Result<(), FavoriteError> {
        self.favorites.add(customer_id, product_id).await?;
        tracing::debug!(%customer_id, %product_id, "Favorite added");
        Ok(())
    }

    /// Remove a product from every customer's favorites.
    ///
    /// Returns the number of favorites removed.
    ///
    /// # Errors
    ///
    /// Returns `FavoriteError::Repository` if the delete fails.
    pub async fn remove(&self, product_id: ProductId) -> Result<u64, FavoriteError> {
        let removed = self.favorites.remove_by_product(product_id).await?;
        tracing::debug!(%product_id, removed, "Favorites removed");
        Ok(removed)
    }

    /// A customer's favorite products, as currently listed in the catalog.
    ///
    /// Favorites whose product is no longer in the catalog are skipped.
    /// Results follow catalog order.
    ///
    /// # Errors
    ///
    /// Returns `FavoriteError::Repository` if the stored IDs cannot be read.
    /// Returns `FavoriteError::Catalog` if the catalog cannot be fetched.
    pub async fn products_for(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, FavoriteError> {
        let wanted: HashSet<ProductId> = self
            .favorites
            .product_ids(customer_id)
            .await?
            .into_iter()
            .collect();

        let products = self.catalog.all_products().await?;

        Ok(products
            .into_iter()
            .filter(|product| wanted.contains(&product.id))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::db::memory::MemoryStore;

    fn product(id: i32, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            image: format!("https://example.com/{id}.jpg"),
            price: 10.0,
            rating: None,
            category: None,
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            product(1, "Backpack"),
            product(2, "T-Shirt"),
            product(3, "Jacket"),
        ])
    }

    #[tokio::test]
    async fn test_joins_against_catalog_in_catalog_order() {
        let store = MemoryStore::new();
        let catalog = catalog();
        let service = FavoriteService::new(&store, &catalog);
        let customer = CustomerId::generate();

        service.add(customer, ProductId::new(3)).await.unwrap();
        service.add(customer, ProductId::new(1)).await.unwrap();
        // Not in the catalog; dropped silently.
        service.add(customer, ProductId::new(99)).await.unwrap();

        let titles: Vec<String> = service
            .products_for(customer)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Backpack", "Jacket"]);
    }

    #[tokio::test]
    async fn test_no_favorites_is_empty_list() {
        let store = MemoryStore::new();
        let catalog = catalog();
        let service = FavoriteService::new(&store, &catalog);

        assert!(
            service
                .products_for(CustomerId::generate())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let store = MemoryStore::new();
        let catalog = StaticCatalog::unavailable();
        let service = FavoriteService::new(&store, &catalog);
        let customer = CustomerId::generate();
        service.add(customer, ProductId::new(1)).await.unwrap();

        assert!(matches!(
            service.products_for(customer).await,
            Err(FavoriteError::Catalog(_))
        ));
    }

    #[tokio::test]
    async fn test_add_twice_then_remove_everywhere() {
        let store = MemoryStore::new();
        let catalog = catalog();
        let service = FavoriteService::new(&store, &catalog);
        let first = CustomerId::generate();
        let second = CustomerId::generate();

        service.add(first, ProductId::new(2)).await.unwrap();
        service.add(first, ProductId::new(2)).await.unwrap();
        service.add(second, ProductId::new(2)).await.unwrap();
        assert_eq!(store.favorite_count().await, 2);

        assert_eq!(service.remove(ProductId::new(2)).await.unwrap(), 2);
        assert_eq!(service.remove(ProductId::new(2)).await.unwrap(), 0);
        assert!(service.products_for(second).await.unwrap().is_empty());
    }
}
