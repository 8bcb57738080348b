//! Cart store.
//!
//! Mirrors the server-authoritative cart and speculatively edits it for
//! zero-latency UI updates. Every mutating response carries a full
//! snapshot, never a delta; the store always replaces wholesale. When two
//! updates race, the later response to resolve wins - acceptable because
//! each response is complete.
//!
//! The cart is never persisted client-side; prices and stock change
//! server-side, so it is re-fetched at session start.

use rust_decimal::Decimal;
use tracing::instrument;

use saffron_core::{CouponCode, ProductId, TotalsPreview, preview_totals};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::speculative::Speculative;
use crate::types::CartSnapshot;

/// Store for the customer's cart.
pub struct CartStore {
    api: ApiClient,
    cart: Speculative<Option<CartSnapshot>>,
}

impl CartStore {
    /// Create an empty store; call [`Self::fetch_cart`] at session start.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cart: Speculative::new(None),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The last-known snapshot, if the cart has been fetched.
    #[must_use]
    pub const fn cart(&self) -> Option<&CartSnapshot> {
        self.cart.get().as_ref()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart().map_or(0, |cart| cart.total_items)
    }

    /// Sum of line subtotals before discount.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart().map_or(Decimal::ZERO, |cart| cart.total_price)
    }

    /// Discount from the applied coupon.
    #[must_use]
    pub fn discount(&self) -> Decimal {
        self.cart()
            .and_then(|cart| cart.discount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Code of the applied coupon, if any.
    #[must_use]
    pub fn applied_coupon(&self) -> Option<&str> {
        self.cart().and_then(|cart| cart.applied_coupon.as_deref())
    }

    /// Estimated totals for display before the server's authoritative
    /// numbers arrive.
    #[must_use]
    pub fn preview(&self) -> TotalsPreview {
        preview_totals(self.subtotal(), self.discount())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace the local snapshot with server truth.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error; the local snapshot is left
    /// unchanged on failure.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&mut self) -> Result<(), ApiError> {
        let snapshot: CartSnapshot = self.api.get("/cart").await?;
        self.cart.commit(Some(snapshot));
        Ok(())
    }

    /// Add a product to the cart.
    ///
    /// No optimistic guess is made - the server computes pricing - so on
    /// failure the prior snapshot is untouched.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (for example, insufficient stock) or
    /// a transport error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let snapshot: CartSnapshot = self
            .api
            .post(
                "/cart/add",
                &serde_json::json!({ "productId": product_id, "quantity": quantity }),
            )
            .await?;
        self.cart.commit(Some(snapshot));
        Ok(())
    }

    /// Change a line's quantity.
    ///
    /// Quantities below 1 are rejected as a no-op without a network call;
    /// removal is a separate, explicit action. The local line is patched
    /// optimistically and `totalItems` recomputed; on failure the captured
    /// pre-mutation snapshot is restored verbatim.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip(self), fields(product_id = %product_id, quantity))]
    pub async fn update_item_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        if quantity < 1 {
            return Ok(());
        }

        let checkpoint = self.cart.checkpoint();
        self.cart.apply(|cart| {
            if let Some(cart) = cart.as_mut() {
                for line in &mut cart.items {
                    if line.product_id == *product_id {
                        line.quantity = quantity;
                    }
                }
                cart.total_items = cart.items.iter().map(|line| line.quantity).sum();
            }
        });

        let result: Result<CartSnapshot, ApiError> = self
            .api
            .put_empty(&format!("/cart/update/{product_id}?quantity={quantity}"))
            .await;

        match result {
            Ok(snapshot) => {
                self.cart.commit(Some(snapshot));
                Ok(())
            }
            Err(err) => {
                self.cart.restore(checkpoint);
                Err(err)
            }
        }
    }

    /// Remove a line from the cart.
    ///
    /// The line is filtered out optimistically; on failure the captured
    /// pre-mutation snapshot is restored verbatim.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<(), ApiError> {
        let checkpoint = self.cart.checkpoint();
        self.cart.apply(|cart| {
            if let Some(cart) = cart.as_mut() {
                cart.items.retain(|line| line.product_id != *product_id);
                cart.total_items = cart.items.iter().map(|line| line.quantity).sum();
            }
        });

        let result: Result<CartSnapshot, ApiError> = self
            .api
            .delete(&format!("/cart/remove/{product_id}"))
            .await;

        match result {
            Ok(snapshot) => {
                self.cart.commit(Some(snapshot));
                Ok(())
            }
            Err(err) => {
                self.cart.restore(checkpoint);
                Err(err)
            }
        }
    }

    /// Empty the cart.
    ///
    /// A confirmed, user-initiated action - no optimistic pre-clear.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error; the snapshot is unchanged on
    /// failure.
    #[instrument(skip(self))]
    pub async fn clear_cart(&mut self) -> Result<(), ApiError> {
        self.api.delete_unit("/cart/clear").await?;
        self.cart.commit(None);
        Ok(())
    }

    /// Apply a coupon to the cart.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection reason (invalid, expired, minimum
    /// order not met) without mutating local state.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn apply_coupon(&mut self, code: &CouponCode) -> Result<(), ApiError> {
        let snapshot: CartSnapshot = self
            .api
            .post("/cart/apply-coupon", &serde_json::json!({ "code": code }))
            .await?;
        self.cart.commit(Some(snapshot));
        Ok(())
    }

    /// Remove the applied coupon.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self))]
    pub async fn remove_coupon(&mut self) -> Result<(), ApiError> {
        let snapshot: CartSnapshot = self.api.delete("/cart/remove-coupon").await?;
        self.cart.commit(Some(snapshot));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn store() -> CartStore {
        let config = ClientConfig::new("http://localhost:1/api".parse().unwrap());
        CartStore::new(ApiClient::new(&config).unwrap())
    }

    #[test]
    fn test_reads_default_to_zero_when_uninitialized() {
        let store = store();
        assert!(store.cart().is_none());
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.subtotal(), Decimal::ZERO);
        assert_eq!(store.discount(), Decimal::ZERO);
        assert!(store.applied_coupon().is_none());
    }

    #[tokio::test]
    async fn test_quantity_guard_skips_network_entirely() {
        // The API client points at a closed port; reaching the network
        // would fail, so returning Ok proves no request was issued.
        let mut store = store();
        let result = store
            .update_item_quantity(&ProductId::new("p1"), 0)
            .await;
        assert!(result.is_ok());
        assert!(store.cart().is_none());
    }

    #[test]
    fn test_preview_uses_snapshot_values() {
        let mut store = store();
        store.cart.commit(Some(CartSnapshot {
            id: None,
            items: vec![],
            total_items: 2,
            total_price: Decimal::from(400),
            discount: Some(Decimal::from(150)),
            applied_coupon: Some("SAVE150".to_string()),
        }));

        let preview = store.preview();
        assert_eq!(preview.total, "345.00".parse().unwrap());
        assert_eq!(store.applied_coupon(), Some("SAVE150"));
    }
}
