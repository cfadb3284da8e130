//! Cart line state and its persistence.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the persisted cart (one JSON array under a single key
//!   in a [`KeyValueStore`]) and serializes every read-modify-write
//! - [`CartLineController`] is the interactive state of one cart line:
//!   quantity, derived total and cached favorite flag
//! - [`FavoritesRegistry`] is the source of truth for favorite flags
//! - [`CartEvents`] broadcasts a [`CartChanged`] signal after every successful
//!   quantity change or removal
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use souk_storefront::cart::{CartEvents, CartLineController, CartStore, InMemoryFavorites, MemoryStore};
//!
//! let store = CartStore::new(Arc::new(MemoryStore::new()));
//! store.ensure_initialized()?;
//! let entry = store.add(product, 2)?;
//!
//! let mut line = CartLineController::new(entry, store, Arc::new(InMemoryFavorites::new()), CartEvents::new());
//! line.adjust_quantity(-1)?;
//! line.remove()?;
//! ```

mod events;
mod favorites;
mod line;
mod store;

pub use events::{CartChanged, CartEvents};
pub use favorites::{FavoritesRegistry, InMemoryFavorites};
pub use line::CartLineController;
pub use store::{CART_KEY, CartStore, FileStore, KeyValueStore, MemoryStore, StoreError};

use thiserror::Error;

/// Errors that can occur when reading or writing the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart slot has never been written.
    #[error("Cart store not initialized: no `{0}` entry")]
    MissingStore(&'static str),

    /// The cart slot does not hold a JSON array of cart entries.
    #[error("Cart parse error: {0}")]
    Parse(serde_json::Error),

    /// The cart could not be serialized.
    #[error("Cart encode error: {0}")]
    Encode(serde_json::Error),

    /// The key-value backend failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::MissingStore(CART_KEY);
        assert_eq!(
            err.to_string(),
            "Cart store not initialized: no `cart-products` entry"
        );
    }
}
