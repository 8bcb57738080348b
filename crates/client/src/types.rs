//! Domain types for the Saffron REST API.
//!
//! Wire format is camelCase JSON inside the standard response envelope.
//! Monetary amounts arrive as JSON numbers and are carried as
//! `rust_decimal::Decimal`; the server computes every amount a customer is
//! actually charged.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saffron_core::{
    Address, CategoryId, OrderId, OrderStatus, OrderTimeline, PaymentId, PaymentMethod,
    PaymentStatus, ProductId, Role, ShippingAddress, UserId, has_privileged_role,
};

// =============================================================================
// User Types
// =============================================================================

/// The authenticated customer's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID.
    pub id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Roles granted to this account.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Saved address book.
    #[serde(default)]
    pub addresses: Vec<Address>,
    /// Avatar URL.
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl UserProfile {
    /// First and last name joined for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether this account can access the admin console.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        has_privileged_role(&self.roles)
    }

    /// The default shipping address, if one is saved.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|address| address.is_default)
    }
}

// =============================================================================
// Auth Payloads
// =============================================================================

/// Credentials for [`crate::session::SessionStore::login`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Payload for [`crate::session::SessionStore::register`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload for finalizing a password reset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// Reset token obtained from OTP verification.
    pub token: String,
    /// The new password.
    pub new_password: String,
}

/// Successful login/registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated profile.
    pub user: UserProfile,
}

/// Payload for creating or updating a saved address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    /// Street and house number.
    pub street: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
    /// Whether to make this the default shipping address.
    pub is_default: bool,
}

// =============================================================================
// Cart Types
// =============================================================================

/// A single line in the cart.
///
/// `price` is the unit price at the time the line was added; the server
/// re-prices on checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID.
    pub product_id: ProductId,
    /// Product display name.
    pub product_name: String,
    /// Product image URL.
    #[serde(default)]
    pub product_image: Option<String>,
    /// Unit price when the line was added.
    pub price: Decimal,
    /// Quantity, always at least 1.
    pub quantity: u32,
    /// Line subtotal as computed by the server.
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

/// The authoritative cart as last confirmed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Cart lines in server order.
    #[serde(default)]
    pub items: Vec<CartLine>,
    /// Sum of line quantities.
    #[serde(default)]
    pub total_items: u32,
    /// Sum of line subtotals before discount.
    #[serde(default)]
    pub total_price: Decimal,
    /// Discount from the applied coupon.
    #[serde(default)]
    pub discount: Option<Decimal>,
    /// Code of the applied coupon.
    #[serde(default)]
    pub applied_coupon: Option<String>,
}

impl CartSnapshot {
    /// Find the line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product_id == *product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Plain-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Brand name.
    #[serde(default)]
    pub brand: Option<String>,
    /// List price.
    pub price: Decimal,
    /// Discounted price, when on sale.
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    /// Category ID.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Category display name.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Units in stock.
    #[serde(default)]
    pub stock_quantity: i64,
    /// Whether the product is purchasable.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Whether the product is featured on the home page.
    #[serde(default)]
    pub featured: bool,
    /// Average review rating.
    #[serde(default)]
    pub average_rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: i64,
    /// Search tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

const fn default_true() -> bool {
    true
}

impl Product {
    /// The price the customer pays right now.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Parent category for subcategories.
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Total items across all pages.
    #[serde(default)]
    pub total_elements: i64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: i64,
    /// Zero-based page index.
    #[serde(default)]
    pub number: i64,
    /// Page size requested.
    #[serde(default)]
    pub size: i64,
}

// =============================================================================
// Order Types
// =============================================================================

/// A line on a placed order, price frozen at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: String,
    /// Product image at order time.
    #[serde(default)]
    pub product_image: Option<String>,
    /// Unit price frozen at order time.
    pub price: Decimal,
    /// Quantity ordered.
    pub quantity: u32,
    /// Line subtotal.
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

/// A placed order.
///
/// Immutable once created except for the status, payment, and tracking
/// fields, which only change through server-side transitions reflected
/// back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Human-facing order number.
    pub order_number: String,
    /// Ordered lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Shipping address captured at order time.
    pub shipping_address: ShippingAddress,
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    /// Shipping charge.
    pub shipping_cost: Decimal,
    /// Tax charged.
    #[serde(default)]
    pub tax: Decimal,
    /// Coupon discount applied.
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
    /// Applied coupon code.
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Total the customer is charged.
    pub total_amount: Decimal,
    /// Fulfillment status.
    #[serde(default)]
    pub order_status: OrderStatus,
    /// Payment status.
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// How the order is paid.
    pub payment_method: PaymentMethod,
    /// Carrier tracking number once shipped.
    #[serde(default)]
    pub tracking_number: Option<String>,
    /// Customer note.
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Order {
    /// Project this order's status onto the fulfillment timeline.
    #[must_use]
    pub fn timeline(&self) -> OrderTimeline {
        OrderTimeline::project(self.order_status)
    }
}

/// Payload for creating an order at checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Where to ship.
    pub shipping_address: ShippingAddress,
    /// How the customer pays.
    pub payment_method: PaymentMethod,
    /// Optional customer note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// Payment Types
// =============================================================================

/// A payment-gateway order created for an online payment.
///
/// Amount and currency come from the server; the client never supplies
/// them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    /// Internal payment record ID.
    pub id: PaymentId,
    /// Amount to charge.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Razorpay's order id, handed to the payment widget.
    pub razorpay_order_id: String,
}

/// The gateway's signed proof, submitted for server-side verification.
///
/// Field names match the gateway callback payload, which uses snake_case.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentProof {
    /// Razorpay order id from the callback.
    pub razorpay_order_id: String,
    /// Razorpay payment id from the callback.
    pub razorpay_payment_id: String,
    /// Signature over the order and payment ids.
    pub razorpay_signature: String,
    /// Internal payment record ID.
    pub payment_id: PaymentId,
}
