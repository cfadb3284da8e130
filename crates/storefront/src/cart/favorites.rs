//! Favorite flags per product.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use souk_core::ProductId;

/// Registry of products the shopper has marked as favorite.
///
/// The registry is the source of truth; callers only cache what it returns.
pub trait FavoritesRegistry: Send + Sync {
    /// Whether `id` is currently a favorite.
    fn is_favorite(&self, id: &ProductId) -> bool;

    /// Flip the flag for `id` and return the new state.
    fn toggle_favorite(&self, id: &ProductId) -> bool;
}

/// Process-local favorites. Nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryFavorites {
    liked: RwLock<HashSet<ProductId>>,
}

impl InMemoryFavorites {
    /// Create a registry with no favorites.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with `ids` already marked as favorite.
    #[must_use]
    pub fn with_favorites(ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            liked: RwLock::new(ids.into_iter().collect()),
        }
    }
}

impl FavoritesRegistry for InMemoryFavorites {
    fn is_favorite(&self, id: &ProductId) -> bool {
        self.liked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    fn toggle_favorite(&self, id: &ProductId) -> bool {
        let mut liked = self.liked.write().unwrap_or_else(PoisonError::into_inner);
        if liked.remove(id) {
            false
        } else {
            liked.insert(id.clone());
            true
        }
    }
}
