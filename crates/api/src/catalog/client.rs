//! HTTP client for the external product catalog.

use async_trait::async_trait;
use tracing::instrument;
use url::Url;

use favorites_core::Product;

use super::{CatalogError, CatalogSource};
use crate::config::CatalogConfig;

/// Catalog client backed by `GET {base_url}/products`.
///
/// Every call fetches the whole catalog. No caching, no retries.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    products_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the base URL
    /// cannot be joined with `products`.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            products_url: products_url(&config.base_url)?,
        })
    }

    /// The endpoint this client fetches.
    #[must_use]
    pub const fn products_url(&self) -> &Url {
        &self.products_url
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    #[instrument(skip(self), fields(url = %self.products_url))]
    async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.products_url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let products: Vec<Product> = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }
}

/// `{base}/products`, keeping any path prefix on the base URL.
fn products_url(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("products")
}
