//! Integration tests for cart lines persisted in a file-backed store.
//!
//! Products come from the fake catalog so the full path
//! catalog -> cart -> store file -> cart is exercised.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use souk_core::{CartEntry, ProductId, cart_subtotal};
use souk_integration_tests::{FakeCatalog, TempStorePath};
use souk_storefront::cart::{
    CART_KEY, CartChanged, CartError, CartLineController, FileStore, InMemoryFavorites,
    KeyValueStore,
};
use souk_storefront::catalog::CatalogClient;
use souk_storefront::state::AppState;

fn state_with_store(catalog: &FakeCatalog, store: &TempStorePath) -> AppState {
    AppState::new(store.config(catalog.config_at("/"))).unwrap()
}

async fn add(state: &AppState, id: &str, quantity: u32) -> CartLineController {
    let product = state
        .catalog()
        .get_product(&ProductId::new(id))
        .await
        .unwrap()
        .unwrap();
    let entry = state.cart().add(product, quantity).unwrap();
    state.line(entry)
}

/// Raw JSON array stored under the cart key.
fn stored_cart(store: &TempStorePath) -> Vec<Value> {
    let raw = FileStore::new(store.path()).get(CART_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_new_state_initializes_empty_cart() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("init");

    let state = state_with_store(&catalog, &store);

    assert!(state.cart().load().unwrap().is_empty());
    assert!(stored_cart(&store).is_empty());
}

#[tokio::test]
async fn test_clamped_adjust_round_trips_through_file() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("clamp");
    let state = state_with_store(&catalog, &store);

    // price 50, quantity 2
    let mut line = add(&state, "2", 2).await;
    assert_eq!(line.total(), Decimal::ONE_HUNDRED);

    line.adjust_quantity(-2).unwrap();
    assert_eq!(line.quantity(), 1);
    assert_eq!(line.total(), Decimal::from(50));

    let stored = stored_cart(&store);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["product"]["id"], "2");
    assert_eq!(stored[0]["quantity"], 1);

    // A fresh state over the same file sees the same line.
    let reopened = state_with_store(&catalog, &store);
    let lines = reopened.cart_lines().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].entry(), line.entry());
}

#[tokio::test]
async fn test_adjust_keeps_one_entry_per_product() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("unique");
    let state = state_with_store(&catalog, &store);

    let mut backpack = add(&state, "1", 1).await;
    add(&state, "3", 1).await;

    for delta in [1, 1, -1, 3] {
        backpack.adjust_quantity(delta).unwrap();
    }

    let entries = state.cart().load().unwrap();
    let backpacks: Vec<&CartEntry> = entries
        .iter()
        .filter(|e| e.product.id.as_str() == "1")
        .collect();
    assert_eq!(backpacks.len(), 1);
    assert_eq!(backpacks[0].quantity, 5);
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_remove_leaves_other_lines_untouched() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("remove");
    let state = state_with_store(&catalog, &store);

    add(&state, "1", 1).await;
    let jacket = add(&state, "3", 2).await;
    add(&state, "2", 4).await;
    let before = state.cart().load().unwrap();

    jacket.remove().unwrap();

    let after = state.cart().load().unwrap();
    assert_eq!(after, vec![before[0].clone(), before[2].clone()]);
    assert!(
        stored_cart(&store)
            .iter()
            .all(|e| e["product"]["id"] != "3")
    );
}

#[tokio::test]
async fn test_cart_changed_is_broadcast() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("events");
    let state = state_with_store(&catalog, &store);
    let mut events = state.events().subscribe();

    let mut line = add(&state, "1", 1).await;
    line.adjust_quantity(2).unwrap();
    line.remove().unwrap();

    assert_eq!(events.recv().await.unwrap(), CartChanged);
    assert_eq!(events.recv().await.unwrap(), CartChanged);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_subtotal_over_persisted_lines() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("subtotal");
    let state = state_with_store(&catalog, &store);

    add(&state, "2", 2).await; // 100
    add(&state, "3", 1).await; // 100
    add(&state, "2", 1).await; // merged: 150

    let entries = state.cart().load().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(cart_subtotal(&entries), Decimal::from(250));
}

#[tokio::test]
async fn test_favorites_are_read_at_construction() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("favorites");
    let favorites = Arc::new(InMemoryFavorites::with_favorites([ProductId::new("3")]));
    let state = AppState::with_parts(
        store.config(catalog.config_at("/")),
        CatalogClient::new(&catalog.config_at("/")),
        Arc::new(FileStore::new(store.path())),
        favorites,
    )
    .unwrap();

    let mut jacket = add(&state, "3", 1).await;
    let mut backpack = add(&state, "1", 1).await;
    assert!(jacket.is_favorite());
    assert!(!backpack.is_favorite());

    assert!(!jacket.toggle_favorite());
    assert!(backpack.toggle_favorite());

    // New controllers see the registry's current state.
    let flags: Vec<_> = state
        .cart_lines()
        .unwrap()
        .iter()
        .map(|line| (line.product_id().to_string(), line.is_favorite()))
        .collect();
    assert_eq!(
        flags,
        vec![("3".to_string(), false), ("1".to_string(), true)]
    );
}

#[tokio::test]
async fn test_corrupt_cart_slot_surfaces_parse_error() {
    let catalog = FakeCatalog::start().await;
    let store = TempStorePath::new("corrupt");
    let state = state_with_store(&catalog, &store);
    let mut line = add(&state, "1", 1).await;

    FileStore::new(store.path())
        .set(CART_KEY, "not a cart")
        .unwrap();

    assert!(matches!(
        line.adjust_quantity(1).unwrap_err(),
        CartError::Parse(_)
    ));
    assert_eq!(line.quantity(), 1);
    assert!(store.dir().exists());
}
