//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers arrive as numbers from the remote API but are carried
//! as strings everywhere else (cart store, favorites, CLI arguments), so the
//! wrapper holds the string form.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Two products are the same cart line if and only if their `ProductId`s are
/// equal.
///
/// # Example
///
/// ```rust
/// # use souk_core::ProductId;
/// let from_api = ProductId::from(7_u64);
/// let from_cli = ProductId::new("7");
///
/// assert_eq!(from_api, from_cli);
/// assert_eq!(from_api.as_str(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ::core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
