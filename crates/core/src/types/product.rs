//! Catalog product types.
//!
//! Products are owned by the external catalog service. They are never
//! persisted locally; favorites only store the [`ProductId`].

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Aggregate customer rating reported by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// A product as returned by the catalog.
///
/// Catalogs disagree on a few field names, so `title` also accepts `name`,
/// and `image`, `rating` and `category` are optional on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Product title.
    #[serde(alias = "name")]
    pub title: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Unit price.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
