//! Order history client.
//!
//! Orders are read-only from the client once placed, except for the cancel
//! transition. Status changes arrive through server-side transitions
//! reflected back on fetch; [`crate::types::Order::timeline`] projects
//! them onto the fulfillment timeline.

use tracing::instrument;

use saffron_core::OrderId;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::types::{CartSnapshot, Order, OrderRequest, Page};

/// Client for order creation and history.
#[derive(Clone)]
pub struct OrdersClient {
    api: ApiClient,
}

impl OrdersClient {
    /// Create an orders client.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create an order from the current cart.
    ///
    /// The server snapshots the cart lines, freezes prices, and computes
    /// the authoritative totals.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (empty cart, insufficient stock) or
    /// a transport error.
    #[instrument(skip_all, fields(payment_method = %request.payment_method))]
    pub async fn create(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        self.api.post("/orders", request).await
    }

    /// List the customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self))]
    pub async fn my_orders(&self, page: u32, size: u32) -> Result<Page<Order>, ApiError> {
        self.api
            .get(&format!("/orders?page={page}&size={size}"))
            .await
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.api.get(&format!("/orders/{id}")).await
    }

    /// Cancel an order, returning its updated state.
    ///
    /// Only pending and confirmed orders can be cancelled; the server
    /// enforces the window and its rejection is surfaced verbatim.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.api.post_empty(&format!("/orders/{id}/cancel")).await
    }

    /// Rebuild the cart from a past order, returning the new cart.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (for example, items no longer
    /// stocked) or a transport error.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn reorder(&self, id: &OrderId) -> Result<CartSnapshot, ApiError> {
        self.api.post_empty(&format!("/orders/{id}/reorder")).await
    }
}
