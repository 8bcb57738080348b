//! Payment gateway client.
//!
//! Two calls back the online-payment leg of checkout: creating a Razorpay
//! order scoped to a placed order, and verifying the gateway's signed
//! proof afterward. Amount and currency always come from the server; the
//! client never supplies them.

use tracing::instrument;

use saffron_core::OrderId;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::types::{PaymentOrder, PaymentProof};

/// Client for the payment endpoints.
#[derive(Clone)]
pub struct PaymentsClient {
    api: ApiClient,
    key_id: Option<String>,
}

impl PaymentsClient {
    /// Create a payments client.
    ///
    /// `key_id` is the public Razorpay key handed to the payment widget;
    /// it is not a secret and may be absent when online payment is
    /// disabled.
    #[must_use]
    pub const fn new(api: ApiClient, key_id: Option<String>) -> Self {
        Self { api, key_id }
    }

    /// The public gateway key for the payment widget, if configured.
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Create a gateway order for an unpaid order.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection message or a transport error.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn create_razorpay_order(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentOrder, ApiError> {
        self.api
            .post_empty(&format!("/payments/razorpay/order/{order_id}"))
            .await
    }

    /// Submit the gateway's signed proof for verification.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection when the signature does not check
    /// out, or a transport error.
    #[instrument(skip_all, fields(payment_id = %proof.payment_id))]
    pub async fn verify(&self, proof: &PaymentProof) -> Result<(), ApiError> {
        self.api.post_unit("/payments/razorpay/verify", proof).await
    }
}
