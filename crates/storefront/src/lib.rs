//! Souk Storefront library.
//!
//! Cart line state kept in step with a shared key-value store, and a client
//! that adapts a remote product catalog into [`souk_core::Product`]s.
//!
//! # Modules
//!
//! - [`cart`] - Cart persistence, line controller, favorites, change events
//! - [`catalog`] - Remote catalog client and record normalization
//! - [`config`] - Environment configuration
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod state;
