//! Application state shared across views.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::StorefrontError;
use crate::storage::FileStore;

/// Application state shared by every view in the process.
///
/// Constructed once, cheaply cloneable via `Arc`. Holding the cart store
/// here, rather than letting each view open storage directly, is what
/// keeps "any view can read the latest cart" true without hidden global
/// coupling.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
}

impl AppState {
    /// Build the process-wide state: durable cart storage under the
    /// configured data directory, plus the catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// catalog snapshot is unreadable.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let storage = FileStore::open(&config.data_dir)?;
        let catalog = Catalog::load(&config.catalog_file)?;
        let cart = CartStore::new(Arc::new(storage));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
