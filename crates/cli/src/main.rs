//! Saffron CLI - Terminal storefront for the Saffron commerce API.
//!
//! # Usage
//!
//! ```bash
//! # Log in (state persists under SAFFRON_STATE_DIR)
//! saffron auth login -e asha@example.com -p 'secret'
//!
//! # Browse and shop
//! saffron products list
//! saffron cart add p1 --quantity 2
//! saffron cart show
//!
//! # Check out with cash on delivery
//! saffron checkout --full-name "Asha Rao" --phone 9999999999 \
//!     --street "12 MG Road" --city Bengaluru --state Karnataka \
//!     --zip 560001
//!
//! # Track it
//! saffron orders list
//! saffron orders show <order-id>
//! ```
//!
//! # Commands
//!
//! - `auth` - Log in, register, log out, show the profile
//! - `products` - Browse and search the catalog
//! - `cart` - Manage the cart and coupons
//! - `wishlist` - Manage the wishlist
//! - `orders` - Order history, status timeline, cancellation
//! - `checkout` - Place an order from the current cart

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use saffron_client::{ClientConfig, Storefront};

mod commands;

#[derive(Parser)]
#[command(name = "saffron")]
#[command(author, version, about = "Saffron terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the session
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: commands::catalog::ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: commands::wishlist::WishlistAction,
    },
    /// Order history and tracking
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Place an order from the current cart
    Checkout(commands::checkout::CheckoutArgs),
}

#[tokio::main]
async fn main() {
    // Initialize tracing (RUST_LOG controls verbosity)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let mut shop = Storefront::new(&config)?;

    // A rejected session just means the next command starts logged out.
    shop.api.set_unauthorized_hook(|| {
        eprintln!("session expired; please log in again");
    });

    match cli.command {
        Commands::Auth { action } => commands::auth::run(&mut shop, action).await?,
        Commands::Products { action } => commands::catalog::run(&shop, action).await?,
        Commands::Cart { action } => commands::cart::run(&mut shop, action).await?,
        Commands::Wishlist { action } => commands::wishlist::run(&mut shop, action).await?,
        Commands::Orders { action } => commands::orders::run(&shop, action).await?,
        Commands::Checkout(args) => commands::checkout::run(&mut shop, args).await?,
    }
    Ok(())
}
