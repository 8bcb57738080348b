//! Integration tests for the Saffron commerce client.
//!
//! Tests drive the real [`saffron_client`] stores against a `wiremock`
//! server standing in for the REST API, asserting the optimistic-update,
//! rollback, and checkout semantics end to end.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p saffron-integration-tests
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use saffron_client::persist::MemoryStore;
use saffron_client::{ClientConfig, Storefront};

/// A config pointing at a mock server, with a short timeout so
/// delay-based tests stay fast.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
#[must_use]
pub fn test_config(server_uri: &str) -> ClientConfig {
    let url = format!("{server_uri}/api")
        .parse()
        .expect("mock server URI is a valid URL");
    ClientConfig::new(url).with_timeout(Duration::from_secs(2))
}

/// Assemble a storefront against a mock server with in-memory state.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn test_storefront(server_uri: &str) -> Storefront {
    Storefront::with_storage(&test_config(server_uri), Arc::new(MemoryStore::new()))
        .expect("storefront assembles")
}

/// Wrap a payload in the standard success envelope.
#[must_use]
pub fn ok_envelope(data: Value) -> Value {
    json!({ "success": true, "message": "OK", "data": data })
}

/// The standard error envelope.
#[must_use]
pub fn error_envelope(message: &str) -> Value {
    json!({ "success": false, "message": message, "data": null })
}

/// A cart with one line: 2 x p1 at 200 each.
#[must_use]
pub fn sample_cart() -> Value {
    json!({
        "id": "cart-1",
        "userId": "u-1",
        "items": [{
            "productId": "p1",
            "productName": "Steel Bottle",
            "productImage": "https://cdn.example/p1.jpg",
            "price": 200,
            "quantity": 2,
            "subtotal": 400
        }],
        "totalPrice": 400,
        "totalItems": 2
    })
}

/// A login payload for the standard test user.
#[must_use]
pub fn sample_auth_payload() -> Value {
    json!({
        "token": "tok-123",
        "type": "Bearer",
        "user": {
            "id": "u-1",
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha@example.com",
            "phone": "9999999999",
            "roles": ["USER"],
            "addresses": []
        }
    })
}

/// An order payload in the given status, mirroring what order creation
/// returns.
#[must_use]
pub fn sample_order(status: &str, payment_method: &str) -> Value {
    json!({
        "id": "o-1",
        "orderNumber": "ORD1700000000000",
        "items": [{
            "productId": "p1",
            "productName": "Steel Bottle",
            "price": 200,
            "quantity": 2,
            "subtotal": 400
        }],
        "shippingAddress": {
            "fullName": "Asha Rao",
            "phone": "9999999999",
            "street": "12 MG Road",
            "city": "Bengaluru",
            "state": "Karnataka",
            "zipCode": "560001",
            "country": "India"
        },
        "subtotal": 400,
        "shippingCost": 50,
        "tax": 72,
        "totalAmount": 522,
        "status": status,
        "orderStatus": status,
        "paymentStatus": "PENDING",
        "paymentMethod": payment_method,
        "createdAt": "2026-03-01T10:15:00"
    })
}
