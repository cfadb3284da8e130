//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::line_total;
use super::product::Product;

/// One line of a shopping cart: a product and how many of it.
///
/// The line total is derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

impl CartEntry {
    /// Create a cart entry.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Identifier of the product on this line.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price x quantity`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }
}

/// Apply `delta` to `quantity`, never going below one.
///
/// Reaching zero (or less) does not delete the line; the quantity floors at 1.
/// Removal is a separate, explicit operation.
#[must_use]
pub fn adjust_quantity(quantity: u32, delta: i32) -> u32 {
    let adjusted = i64::from(quantity) + i64::from(delta);
    u32::try_from(adjusted.max(1)).unwrap_or(u32::MAX)
}

/// Sum of all line totals.
#[must_use]
pub fn cart_subtotal(entries: &[CartEntry]) -> Decimal {
    entries.iter().map(CartEntry::total).sum()
}
