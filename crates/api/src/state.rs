//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::db::{CustomerStore, FavoriteStore, HealthCheck, Stores, UserStore};
use crate::services::auth::TokenIssuer;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; everything inside is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    stores: Stores,
    catalog: Arc<dyn CatalogSource>,
    tokens: TokenIssuer,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(stores: Stores, catalog: Arc<dyn CatalogSource>, tokens: TokenIssuer) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                stores,
                catalog,
                tokens,
            }),
        }
    }

    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        &*self.inner.stores.users
    }

    #[must_use]
    pub fn customers(&self) -> &dyn CustomerStore {
        &*self.inner.stores.customers
    }

    #[must_use]
    pub fn favorites(&self) -> &dyn FavoriteStore {
        &*self.inner.stores.favorites
    }

    /// Database connectivity probe.
    #[must_use]
    pub fn health(&self) -> &dyn HealthCheck {
        &*self.inner.stores.health
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogSource {
        &*self.inner.catalog
    }

    /// Get a reference to the session token issuer.
    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.inner.tokens
    }
}
