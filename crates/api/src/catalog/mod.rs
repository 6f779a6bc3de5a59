//! External product catalog.
//!
//! Products are never stored locally. [`CatalogSource`] is the seam between
//! the favorites service and the catalog; [`CatalogClient`] talks HTTP and
//! [`StaticCatalog`] serves a fixed list in tests.

mod client;
mod error;

pub use client::CatalogClient;
pub use error::CatalogError;

use async_trait::async_trait;

use favorites_core::Product;

/// Source of the full product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every product, in catalog order.
    async fn all_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Fixed catalog for tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Option<Vec<Product>>,
}

#[cfg(any(test, feature = "test-support"))]
impl StaticCatalog {
    /// A catalog serving `products`.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products: Some(products),
        }
    }

    /// A catalog that always fails, as if the upstream were down.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { products: None }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.products
            .clone()
            .ok_or(CatalogError::Status { status: 503 })
    }
}
