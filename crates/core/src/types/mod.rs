//! Core types for Saffron.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod pricing;
pub mod role;
pub mod status;

pub use address::{Address, ShippingAddress};
pub use id::*;
pub use pricing::{
    FREE_SHIPPING_THRESHOLD, SHIPPING_COST, TAX_RATE, TotalsPreview, preview_totals,
};
pub use role::{Role, has_privileged_role};
pub use status::*;
