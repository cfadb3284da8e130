//! Wire types of the remote catalog API.
//!
//! These mirror the JSON the catalog returns and are converted to
//! [`souk_core::Product`] before leaving this module tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record as returned by `GET /products` and `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    /// Numeric catalog ID.
    pub id: u64,
    pub title: String,
    /// Current price, a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    /// Not carried into [`souk_core::Product`].
    #[serde(default)]
    pub category: String,
    /// Image URL.
    pub image: String,
    pub rating: RawRating,
}

/// Review summary attached to a [`RawProduct`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRating {
    /// Average rating; not carried into [`souk_core::Product`].
    pub rate: f64,
    /// Number of reviews.
    pub count: u64,
}
