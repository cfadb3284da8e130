//! Interactive state of a single cart line.

use std::sync::Arc;

use rust_decimal::Decimal;
use souk_core::{CartEntry, ProductId, adjust_quantity};
use tracing::{debug, instrument, warn};

use super::{CartError, CartEvents, CartStore, FavoritesRegistry};

/// One cart line as the shopper edits it.
///
/// Holds the entry, its derived total and the cached favorite flag, and keeps
/// the persisted cart in step with quantity edits.
pub struct CartLineController {
    entry: CartEntry,
    total: Decimal,
    is_favorite: bool,
    store: CartStore,
    favorites: Arc<dyn FavoritesRegistry>,
    events: CartEvents,
}

impl std::fmt::Debug for CartLineController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartLineController")
            .field("entry", &self.entry)
            .field("total", &self.total)
            .field("is_favorite", &self.is_favorite)
            .finish_non_exhaustive()
    }
}

impl CartLineController {
    /// Build the controller for `entry`.
    ///
    /// Computes the line total and caches the product's favorite flag.
    #[must_use]
    pub fn new(
        entry: CartEntry,
        store: CartStore,
        favorites: Arc<dyn FavoritesRegistry>,
        events: CartEvents,
    ) -> Self {
        let total = entry.total();
        let is_favorite = favorites.is_favorite(entry.product_id());

        Self {
            entry,
            total,
            is_favorite,
            store,
            favorites,
            events,
        }
    }

    /// One controller per line of the persisted cart, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read.
    pub fn for_cart(
        store: &CartStore,
        favorites: &Arc<dyn FavoritesRegistry>,
        events: &CartEvents,
    ) -> Result<Vec<Self>, CartError> {
        Ok(store
            .load()?
            .into_iter()
            .map(|entry| Self::new(entry, store.clone(), Arc::clone(favorites), events.clone()))
            .collect())
    }

    #[must_use]
    pub const fn entry(&self) -> &CartEntry {
        &self.entry
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        self.entry.product_id()
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.entry.quantity
    }

    /// `price x quantity` as of the last edit.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Favorite flag as last reported by the registry.
    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Flip the product's favorite flag in the registry and cache the result.
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = self.favorites.toggle_favorite(self.entry.product_id());
        debug!(product_id = %self.entry.product_id(), favorite = self.is_favorite, "Favorite toggled");
        self.is_favorite
    }

    /// Change the quantity by `delta` and persist the line.
    ///
    /// A result below one is clamped to one; the line is never deleted here.
    /// The persisted cart ends up with exactly one line for this product, at
    /// the end of the list. Returns the new quantity and signals
    /// [`super::CartChanged`].
    ///
    /// In-memory state only changes once the cart was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted cart is missing, malformed or cannot
    /// be written.
    #[instrument(skip(self), fields(product_id = %self.entry.product_id()))]
    pub fn adjust_quantity(&mut self, delta: i32) -> Result<u32, CartError> {
        let quantity = adjust_quantity(self.entry.quantity, delta);
        if i64::from(self.entry.quantity) + i64::from(delta) < 1 {
            warn!(
                current = self.entry.quantity,
                delta, "Quantity would drop below one, clamping"
            );
        }

        let updated = CartEntry {
            quantity,
            ..self.entry.clone()
        };
        self.store.upsert(&updated)?;

        self.entry = updated;
        self.total = self.entry.total();
        self.events.notify();

        debug!(quantity, total = %self.total, "Quantity updated");
        Ok(quantity)
    }

    /// Drop this product's line from the persisted cart and signal
    /// [`super::CartChanged`].
    ///
    /// Consumes the controller: the line no longer exists, so neither does its
    /// interactive state.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted cart is missing, malformed or cannot
    /// be written.
    #[instrument(skip(self), fields(product_id = %self.entry.product_id()))]
    pub fn remove(self) -> Result<(), CartError> {
        let removed = self.store.remove(self.entry.product_id())?;
        self.events.notify();

        debug!(removed, "Line removed");
        Ok(())
    }
}
