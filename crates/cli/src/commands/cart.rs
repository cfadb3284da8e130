//! Cart management commands.
//!
//! Every command operates on the cart stored in `SOUK_STORE_PATH`.
//!
//! # Usage
//!
//! ```bash
//! souk cart add 3 --quantity 2
//! souk cart adjust 3 -1
//! souk cart remove 3
//! souk cart show
//! ```

use souk_core::{CartEntry, ProductId, cart_subtotal};
use souk_storefront::cart::CartLineController;
use souk_storefront::state::AppState;
use tracing::info;

/// Print every cart line with its total, then the subtotal.
///
/// # Errors
///
/// Returns an error if the cart cannot be read.
pub fn show(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let lines = state.cart_lines()?;
    let entries: Vec<_> = lines.iter().map(|line| line.entry().clone()).collect();

    print_lines(&lines);
    print_subtotal(&entries);
    Ok(())
}

/// Fetch a product from the catalog and add `quantity` units of it.
///
/// # Errors
///
/// Returns an error if the product does not exist or the cart cannot be
/// updated.
pub async fn add(
    state: &AppState,
    id: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get_product(&id)
        .await?
        .ok_or_else(|| format!("Product not found: {id}"))?;

    let entry = state.cart().add(product, quantity)?;
    info!(product_id = %id, quantity = entry.quantity, "Added to cart");

    print_lines(&[state.line(entry)]);
    Ok(())
}

/// Change the quantity of the line for `id` by `delta`.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or the cart cannot be
/// updated.
pub fn adjust(state: &AppState, id: &str, delta: i32) -> Result<(), Box<dyn std::error::Error>> {
    let mut line = find_line(state, id)?;
    line.adjust_quantity(delta)?;

    print_lines(&[line]);
    Ok(())
}

/// Drop the line for `id` from the cart.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or the cart cannot be
/// updated.
pub fn remove(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let line = find_line(state, id)?;
    line.remove()?;
    info!(product_id = %id, "Removed from cart");
    Ok(())
}

fn find_line(state: &AppState, id: &str) -> Result<CartLineController, Box<dyn std::error::Error>> {
    let id = ProductId::new(id);
    state
        .cart_lines()?
        .into_iter()
        .find(|line| line.product_id() == &id)
        .ok_or_else(|| format!("Product {id} is not in the cart").into())
}

#[allow(clippy::print_stdout)]
fn print_lines(lines: &[CartLineController]) {
    for line in lines {
        let entry = line.entry();
        println!(
            "{:>4}  {:>3} x {:>9.2} = {:>10.2}  {}{}",
            entry.product.id,
            entry.quantity,
            entry.product.price,
            line.total(),
            entry.product.name,
            if line.is_favorite() { " *" } else { "" }
        );
    }
}

#[allow(clippy::print_stdout)]
fn print_subtotal(entries: &[CartEntry]) {
    println!("{:>34.2}  subtotal", cart_subtotal(entries));
}
