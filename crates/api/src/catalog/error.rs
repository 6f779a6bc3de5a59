//! Catalog error types.

use thiserror::Error;

/// Errors that can occur when fetching the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, TLS, client build).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog answered with a non-success status.
    #[error("catalog returned status {status}")]
    Status { status: u16 },

    /// Response body was not a product list.
    #[error("parse error: {0}")]
    Parse(String),

    /// Base URL cannot be extended to the products endpoint.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
