//! Souk CLI - Browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # List every catalog product
//! souk products list
//!
//! # Show one product
//! souk products get 3
//!
//! # Put two units of product 3 in the cart
//! souk cart add 3 --quantity 2
//!
//! # Change a line's quantity (never drops below one)
//! souk cart adjust 3 -1
//!
//! # Show the cart, then drop a line
//! souk cart show
//! souk cart remove 3
//! ```
//!
//! # Environment Variables
//!
//! - `SOUK_CATALOG_URL` - Catalog API base URL
//! - `SOUK_STORE_PATH` - Cart storage file
//! - `RUST_LOG` - Log filter (default: `souk_storefront=info,souk=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use souk_storefront::config::StorefrontConfig;
use souk_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "souk")]
#[command(author, version, about = "Souk storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the remote catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List every product
    List,
    /// Show one product
    Get {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show every cart line and the subtotal
    Show,
    /// Fetch a product and put it in the cart
    Add {
        /// Product ID
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity by a signed amount
    Adjust {
        /// Product ID
        id: String,

        /// Amount to add (negative to subtract)
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Drop a line from the cart
    Remove {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "souk_storefront=info,souk=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list(&state).await?,
            ProductsAction::Get { id } => commands::products::get(&state, &id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state)?,
            CartAction::Add { id, quantity } => commands::cart::add(&state, &id, quantity).await?,
            CartAction::Adjust { id, delta } => commands::cart::adjust(&state, &id, delta)?,
            CartAction::Remove { id } => commands::cart::remove(&state, &id)?,
        },
    }
    Ok(())
}
