//! Application state shared across handlers.

use std::sync::Arc;

use paradise_nursery_core::CartStore;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the one in-memory
/// cart; every mutation holds the write lock for the duration of a single
/// cart action.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: RwLock<CartStore>,
}

impl AppState {
    /// Create a new application state with an empty cart.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: RwLock::new(CartStore::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the plant catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Read access to the cart.
    pub async fn cart(&self) -> RwLockReadGuard<'_, CartStore> {
        self.inner.cart.read().await
    }

    /// Exclusive access to the cart for one mutation.
    pub async fn cart_mut(&self) -> RwLockWriteGuard<'_, CartStore> {
        self.inner.cart.write().await
    }

    /// Total quantity for the navigation badge.
    pub async fn cart_count(&self) -> u64 {
        self.cart().await.total_quantity()
    }
}
