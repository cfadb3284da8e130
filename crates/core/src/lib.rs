//! Souk Core - Shared types library.
//!
//! This crate provides common types used across all Souk components:
//! - `storefront` - Cart line state and product catalog adapter
//! - `cli` - Command-line front end for the catalog and the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, products, cart entries and price math

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
