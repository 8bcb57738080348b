//! Saffron Core - Shared types library.
//!
//! This crate provides common types used across all Saffron components:
//! - `client` - The commerce client library (stores, checkout, API gateway)
//! - `cli` - Terminal storefront built on the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, roles, order statuses, addresses, and the
//!   client-side pricing preview rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
