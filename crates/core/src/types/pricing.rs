//! Client-side order total preview.
//!
//! The server is the single source of truth for every amount a customer is
//! charged; these rules exist only so the checkout summary can render
//! before the authoritative totals arrive. They mirror the server's current
//! configuration and must be treated as an estimate.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// GST applied on the taxable amount.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Orders at or above this taxable amount ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Flat shipping charge below the free-shipping threshold.
pub const SHIPPING_COST: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Preview of order totals computed from a cart subtotal and discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsPreview {
    /// Sum of line subtotals before any discount.
    pub subtotal: Decimal,
    /// Coupon discount applied against the subtotal.
    pub discount: Decimal,
    /// `subtotal - discount`, floored at zero.
    pub taxable: Decimal,
    /// Tax on the taxable amount, rounded to two places.
    pub tax: Decimal,
    /// Shipping charge.
    pub shipping: Decimal,
    /// `taxable + tax + shipping`.
    pub total: Decimal,
}

/// Compute a preview of the order totals.
///
/// Tax is rounded half-up to two decimal places, matching the server.
#[must_use]
pub fn preview_totals(subtotal: Decimal, discount: Decimal) -> TotalsPreview {
    let taxable = (subtotal - discount).max(Decimal::ZERO);
    let shipping = if taxable >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        SHIPPING_COST
    };
    let tax = (taxable * TAX_RATE).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    TotalsPreview {
        subtotal,
        discount,
        taxable,
        tax,
        shipping,
        total: taxable + tax + shipping,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(TAX_RATE, dec("0.18"));
        assert_eq!(FREE_SHIPPING_THRESHOLD, dec("500"));
        assert_eq!(SHIPPING_COST, dec("50"));
    }

    #[test]
    fn test_preview_below_free_shipping() {
        // Two units at 200 each, no discount.
        let preview = preview_totals(dec("400"), Decimal::ZERO);
        assert_eq!(preview.taxable, dec("400"));
        assert_eq!(preview.tax, dec("72.00"));
        assert_eq!(preview.shipping, dec("50"));
        assert_eq!(preview.total, dec("522.00"));
    }

    #[test]
    fn test_preview_with_coupon_discount() {
        // Same cart with a 150 discount applied.
        let preview = preview_totals(dec("400"), dec("150"));
        assert_eq!(preview.taxable, dec("250"));
        assert_eq!(preview.tax, dec("45.00"));
        assert_eq!(preview.shipping, dec("50"));
        assert_eq!(preview.total, dec("345.00"));
    }

    #[test]
    fn test_preview_at_free_shipping_threshold() {
        let preview = preview_totals(dec("500"), Decimal::ZERO);
        assert_eq!(preview.shipping, Decimal::ZERO);
        assert_eq!(preview.total, dec("590.00"));
    }

    #[test]
    fn test_discount_never_drives_taxable_negative() {
        let preview = preview_totals(dec("100"), dec("250"));
        assert_eq!(preview.taxable, Decimal::ZERO);
        assert_eq!(preview.tax, dec("0.00"));
        assert_eq!(preview.total, dec("50.00"));
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 33.33 * 0.18 = 5.9994 -> 6.00
        let preview = preview_totals(dec("33.33"), Decimal::ZERO);
        assert_eq!(preview.tax, dec("6.00"));
    }
}
