//! Feira CLI - catalog browsing, cart management, and checkout.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! feira catalog list --category home --sort price-asc
//! feira catalog show p-42
//!
//! # Manage the cart
//! feira cart add p-42
//! feira cart set p-42 3
//! feira cart show
//!
//! # Place an order
//! feira checkout --name "Ana Souza" --email ana@example.com \
//!     --phone "+55 11 91234-5678" --address "Rua das Flores, 123" \
//!     --city "São Paulo" --state SP --zip 01310-100
//! ```
//!
//! # Commands
//!
//! - `catalog` - List and inspect products
//! - `cart` - Show and mutate the durable cart
//! - `checkout` - Validate shipping details and place a (simulated) order

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary's product is its stdout; the workspace-wide lints stay on for
// the libraries.
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};

use feira_storefront::catalog::ProductSort;
use feira_storefront::config::StorefrontConfig;
use feira_storefront::error::StorefrontError;
use feira_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "feira")]
#[command(author, version, about = "Feira storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show and mutate the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart contents
    Checkout(commands::checkout::CheckoutArgs),
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List visible products
    List {
        /// Restrict to a category slug
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order: newest, price-asc, price-desc, name
        #[arg(long, default_value = "newest")]
        sort: ProductSort,
    },
    /// Show one product in detail
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product id from the catalog
        product_id: String,
    },
    /// Set the quantity of a cart entry (0 or less removes it)
    Set {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove an entry from the cart
    Remove {
        product_id: String,
    },
    /// Empty the cart
    Clear,
    /// Show the cart total
    Total,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), StorefrontError> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                search,
                sort,
            } => commands::catalog::list(&state, category, search, sort)?,
            CatalogAction::Show { id } => commands::catalog::show(&state, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { product_id } => commands::cart::add(&state, &product_id)?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&state, &product_id, quantity)?,
            CartAction::Remove { product_id } => commands::cart::remove(&state, &product_id)?,
            CartAction::Clear => commands::cart::clear(&state)?,
            CartAction::Total => commands::cart::total(&state),
        },
        Commands::Checkout(args) => commands::checkout::run(&state, args)?,
    }
    Ok(())
}
