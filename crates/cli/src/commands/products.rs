//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! souk products list
//! souk products get 3
//! ```

use souk_core::{Product, ProductId};
use souk_storefront::state::AppState;
use tracing::info;

/// Print every catalog product, one per line.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let products = state.catalog().list_products().await?;
    info!(count = products.len(), "Fetched catalog");

    for product in &products {
        print_summary(product);
    }
    Ok(())
}

/// Print one product in full.
///
/// # Errors
///
/// Returns an error if the catalog request fails or the product does not
/// exist.
pub async fn get(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get_product(&id)
        .await?
        .ok_or_else(|| format!("Product not found: {id}"))?;

    print_details(&product);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_summary(product: &Product) {
    println!(
        "{:>4}  {:>9.2}  (was {:>9.2})  {}",
        product.id, product.price, product.previous_price, product.name
    );
}

#[allow(clippy::print_stdout)]
fn print_details(product: &Product) {
    println!("{} [{}]", product.name, product.id);
    println!("  price:    {:.2} (was {:.2})", product.price, product.previous_price);
    println!("  reviews:  {}", product.reviews);
    println!("  image:    {}", product.url_img);
    println!();
    println!("{}", product.description);
}
