//! Application state shared by the front ends.

use std::sync::Arc;

use souk_core::CartEntry;

use crate::cart::{
    CartError, CartEvents, CartLineController, CartStore, FavoritesRegistry, FileStore,
    InMemoryFavorites, KeyValueStore,
};
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;

/// Application state shared across commands.
///
/// This struct is cheaply cloneable via `Arc` and wires the catalog client and
/// the cart collaborators together once.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartStore,
    favorites: Arc<dyn FavoritesRegistry>,
    events: CartEvents,
}

impl AppState {
    /// Create application state backed by the configured store file.
    ///
    /// Initializes an empty cart if the store has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be read or written.
    pub fn new(config: StorefrontConfig) -> Result<Self, CartError> {
        let backend = Arc::new(FileStore::new(&config.store_path));
        let catalog = CatalogClient::new(&config.catalog);
        Self::with_parts(config, catalog, backend, Arc::new(InMemoryFavorites::new()))
    }

    /// Create application state from explicit collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be initialized in `backend`.
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: CatalogClient,
        backend: Arc<dyn KeyValueStore>,
        favorites: Arc<dyn FavoritesRegistry>,
    ) -> Result<Self, CartError> {
        let cart = CartStore::new(backend);
        cart.ensure_initialized()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                favorites,
                events: CartEvents::new(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the persisted cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the cart change channel.
    #[must_use]
    pub fn events(&self) -> &CartEvents {
        &self.inner.events
    }

    /// Controller for one cart line.
    #[must_use]
    pub fn line(&self, entry: CartEntry) -> CartLineController {
        CartLineController::new(
            entry,
            self.inner.cart.clone(),
            Arc::clone(&self.inner.favorites),
            self.inner.events.clone(),
        )
    }

    /// Controllers for every cart line, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read.
    pub fn cart_lines(&self) -> Result<Vec<CartLineController>, CartError> {
        CartLineController::for_cart(&self.inner.cart, &self.inner.favorites, &self.inner.events)
    }
}
