//! Saffron commerce client library.
//!
//! A typed client for the Saffron REST API: authentication session, cart
//! and wishlist stores with optimistic updates, the checkout workflow, and
//! read-only catalog access.
//!
//! # Architecture
//!
//! - One [`api::ApiClient`] is the single point of outbound HTTP. It
//!   attaches the bearer token, unwraps the uniform response envelope, and
//!   tears the session down on an authorization failure.
//! - Each store owns its snapshot exclusively and is single-writer;
//!   cross-store coordination happens through public operations only.
//! - Mutating stores follow one discipline, factored into
//!   [`speculative::Speculative`]: capture the snapshot, apply the local
//!   guess, then commit the server's full authoritative snapshot or
//!   restore the capture verbatim. Responses are never merged as deltas.
//! - Session and wishlist persist across restarts through the
//!   [`persist::StateStore`] port; the cart is always re-fetched.
//!
//! # Example
//!
//! ```rust,ignore
//! use saffron_client::{ClientConfig, Storefront};
//! use saffron_client::types::LoginRequest;
//!
//! let config = ClientConfig::from_env()?;
//! let mut shop = Storefront::new(&config)?;
//!
//! shop.session.login(&LoginRequest {
//!     email: "asha@example.com".into(),
//!     password: "…".into(),
//! }).await?;
//! shop.sync().await?;
//!
//! shop.cart.add_to_cart(&"p1".into(), 2).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod payments;
pub mod persist;
pub mod session;
pub mod speculative;
pub mod storefront;
pub mod types;
pub mod wishlist;

pub use api::ApiClient;
pub use cart::CartStore;
pub use catalog::CatalogClient;
pub use checkout::{CheckoutFlow, CheckoutStep, confirm_online_payment};
pub use config::ClientConfig;
pub use error::ApiError;
pub use orders::OrdersClient;
pub use payments::PaymentsClient;
pub use session::SessionStore;
pub use storefront::Storefront;
pub use wishlist::{WishlistAdd, WishlistStore};
