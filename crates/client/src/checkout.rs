//! Checkout workflow.
//!
//! A linear three-step machine: address, then payment method, then review.
//! Forward movement requires the current step to validate; backward
//! movement is always allowed. The terminal action submits the order, and
//! for online payment hands off to the gateway before the cart is cleared.

use thiserror::Error;
use tracing::{instrument, warn};

use saffron_core::{Address, AddressId, PaymentMethod, ShippingAddress};

use crate::cart::CartStore;
use crate::error::ApiError;
use crate::orders::OrdersClient;
use crate::payments::PaymentsClient;
use crate::types::{Order, OrderRequest, PaymentOrder, PaymentProof, UserProfile};

/// The three checkout steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum CheckoutStep {
    /// Collect the shipping address.
    #[default]
    Address,
    /// Pick how to pay.
    PaymentMethod,
    /// Review and place the order.
    Review,
}

/// Editable fields of the shipping address form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    FullName,
    Phone,
    Street,
    City,
    State,
    ZipCode,
    Country,
}

impl AddressField {
    /// Human-readable field name for validation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "full name",
            Self::Phone => "phone",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip code",
            Self::Country => "country",
        }
    }
}

/// Errors from the checkout workflow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required address field is empty; names the field.
    #[error("please enter {}", .0.label())]
    MissingField(AddressField),

    /// The terminal action was invoked before reaching review.
    #[error("checkout has not reached the review step")]
    NotAtReview,

    /// The gateway's proof failed server-side verification. The order
    /// remains unpaid; there is no automatic retry.
    #[error("payment verification failed: {0}")]
    PaymentVerificationFailed(String),

    /// An API call failed; the cart is untouched.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The working shipping address being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressForm {
    pub full_name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: "India".to_string(),
        }
    }
}

impl AddressForm {
    /// Validate the required fields, naming the first one missing.
    ///
    /// Country is pre-filled and not part of the required set.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] for the first empty field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            (AddressField::FullName, &self.full_name),
            (AddressField::Phone, &self.phone),
            (AddressField::Street, &self.street),
            (AddressField::City, &self.city),
            (AddressField::State, &self.state),
            (AddressField::ZipCode, &self.zip_code),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(field));
            }
        }
        Ok(())
    }

    /// The address value captured onto the order.
    #[must_use]
    pub fn to_shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: self.country.clone(),
        }
    }
}

/// Outcome of [`CheckoutFlow::place_order`].
#[derive(Debug)]
pub enum OrderPlacement {
    /// The order is placed and the cart cleared (cash on delivery).
    Completed(Order),
    /// The order is placed but unpaid; the gateway payment must be
    /// completed and verified before the cart clears.
    PaymentRequired {
        /// The placed order.
        order: Order,
        /// The gateway order to hand to the payment widget.
        payment: PaymentOrder,
    },
}

/// The checkout state machine.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    address: AddressForm,
    selected_address_id: Option<AddressId>,
    payment_method: PaymentMethod,
}

impl CheckoutFlow {
    /// Start a fresh checkout at the address step with cash on delivery
    /// pre-selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The working address form.
    #[must_use]
    pub const fn address(&self) -> &AddressForm {
        &self.address
    }

    /// The selected saved address, if the form still matches one.
    #[must_use]
    pub const fn selected_address_id(&self) -> Option<&AddressId> {
        self.selected_address_id.as_ref()
    }

    /// The selected payment method.
    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    // =========================================================================
    // Address Step
    // =========================================================================

    /// Copy a saved address into the working form.
    ///
    /// The recipient name and phone come from the profile; the selection is
    /// remembered until a field is hand-edited.
    pub fn select_saved_address(&mut self, user: &UserProfile, saved: &Address) {
        self.address = AddressForm {
            full_name: user.full_name(),
            phone: user.phone.clone().unwrap_or_default(),
            street: saved.street.clone(),
            city: saved.city.clone(),
            state: saved.state.clone(),
            zip_code: saved.zip_code.clone(),
            country: saved.country.clone(),
        };
        self.selected_address_id = Some(saved.id.clone());
    }

    /// Hand-edit one address field, clearing any saved-address selection.
    pub fn set_address_field(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AddressField::FullName => self.address.full_name = value,
            AddressField::Phone => self.address.phone = value,
            AddressField::Street => self.address.street = value,
            AddressField::City => self.address.city = value,
            AddressField::State => self.address.state = value,
            AddressField::ZipCode => self.address.zip_code = value,
            AddressField::Country => self.address.country = value,
        }
        self.selected_address_id = None;
    }

    // =========================================================================
    // Payment Step
    // =========================================================================

    /// Select the payment method.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move forward one step, validating the current one.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] when leaving the address
    /// step with a required field empty.
    pub fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let next = match self.step {
            CheckoutStep::Address => {
                self.address.validate()?;
                CheckoutStep::PaymentMethod
            }
            // A payment method is always selected (COD by default).
            CheckoutStep::PaymentMethod | CheckoutStep::Review => CheckoutStep::Review,
        };
        self.step = next;
        Ok(next)
    }

    /// Move backward one step. Always allowed.
    pub fn back(&mut self) -> CheckoutStep {
        let previous = match self.step {
            CheckoutStep::Address | CheckoutStep::PaymentMethod => CheckoutStep::Address,
            CheckoutStep::Review => CheckoutStep::PaymentMethod,
        };
        self.step = previous;
        previous
    }

    /// Jump to a step.
    ///
    /// Backward jumps always succeed; forward jumps validate every step
    /// crossed on the way.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] if the address step fails
    /// validation on a forward jump.
    pub fn go_to(&mut self, target: CheckoutStep) -> Result<(), CheckoutError> {
        if target > self.step && self.step == CheckoutStep::Address {
            self.address.validate()?;
        }
        self.step = target;
        Ok(())
    }

    // =========================================================================
    // Terminal Action
    // =========================================================================

    /// Place the order assembled from the current cart, address, and
    /// payment method.
    ///
    /// The server computes the charged total; the client never does. Cash
    /// on delivery clears the cart immediately; online payment leaves the
    /// cart intact until [`confirm_online_payment`] verifies the gateway's
    /// proof. Any failure leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotAtReview`] before the review step,
    /// [`CheckoutError::MissingField`] if the address re-check fails, or
    /// the underlying API error.
    #[instrument(skip_all, fields(payment_method = %self.payment_method))]
    pub async fn place_order(
        &self,
        cart: &mut CartStore,
        orders: &OrdersClient,
        payments: &PaymentsClient,
    ) -> Result<OrderPlacement, CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::NotAtReview);
        }
        // The form may have been edited after advancing; re-check it.
        self.address.validate()?;

        let order = orders
            .create(&OrderRequest {
                shipping_address: self.address.to_shipping_address(),
                payment_method: self.payment_method,
                notes: None,
            })
            .await?;

        match self.payment_method {
            PaymentMethod::Cod => {
                clear_cart_after_order(cart).await;
                Ok(OrderPlacement::Completed(order))
            }
            PaymentMethod::Razorpay => {
                let payment = payments.create_razorpay_order(&order.id).await?;
                Ok(OrderPlacement::PaymentRequired { order, payment })
            }
        }
    }
}

/// Submit the gateway's signed proof for verification, clearing the cart
/// only once the server confirms the payment.
///
/// On verification failure the order stays unpaid and the cart untouched;
/// the customer is told to contact support rather than retried
/// automatically.
///
/// # Errors
///
/// Returns [`CheckoutError::PaymentVerificationFailed`] when the server
/// rejects the proof.
#[instrument(skip_all, fields(payment_id = %proof.payment_id))]
pub async fn confirm_online_payment(
    cart: &mut CartStore,
    payments: &PaymentsClient,
    proof: &PaymentProof,
) -> Result<(), CheckoutError> {
    payments
        .verify(proof)
        .await
        .map_err(|err| CheckoutError::PaymentVerificationFailed(err.user_message()))?;

    clear_cart_after_order(cart).await;
    Ok(())
}

/// Clear the cart after a completed order.
///
/// The order already exists server-side, so a failed clear must not fail
/// the placement; the cart will reconcile on its next fetch.
async fn clear_cart_after_order(cart: &mut CartStore) {
    if let Err(err) = cart.clear_cart().await {
        warn!(error = %err, "Order placed but cart clear failed; will reconcile on next fetch");
    }
}
