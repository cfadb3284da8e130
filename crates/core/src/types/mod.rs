//! Core types for Souk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartEntry, adjust_quantity, cart_subtotal};
pub use id::ProductId;
pub use price::{line_total, mark_up, round_to_cents};
pub use product::Product;
