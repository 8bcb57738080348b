//! End-to-end checkout tests: COD placement, online payment verification,
//! and the failure paths that must leave the cart untouched.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use saffron_core::{OrderStatus, PaymentId, PaymentMethod};
use saffron_client::checkout::{
    AddressField, CheckoutError, CheckoutFlow, OrderPlacement, confirm_online_payment,
};
use saffron_client::types::PaymentProof;
use saffron_integration_tests::{
    error_envelope, ok_envelope, sample_cart, sample_order, test_storefront,
};

fn filled_flow(payment_method: PaymentMethod) -> CheckoutFlow {
    let mut flow = CheckoutFlow::new();
    flow.set_address_field(AddressField::FullName, "Asha Rao");
    flow.set_address_field(AddressField::Phone, "9999999999");
    flow.set_address_field(AddressField::Street, "12 MG Road");
    flow.set_address_field(AddressField::City, "Bengaluru");
    flow.set_address_field(AddressField::State, "Karnataka");
    flow.set_address_field(AddressField::ZipCode, "560001");
    flow.set_payment_method(payment_method);
    flow.advance().expect("to payment method");
    flow.advance().expect("to review");
    flow
}

async fn mount_cart(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(sample_cart())))
        .mount(server)
        .await;
}

#[tokio::test]
async fn cod_order_clears_cart_and_starts_pending() {
    let server = MockServer::start().await;
    mount_cart(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({
            "shippingAddress": {
                "fullName": "Asha Rao",
                "phone": "9999999999",
                "street": "12 MG Road",
                "city": "Bengaluru",
                "state": "Karnataka",
                "zipCode": "560001",
                "country": "India"
            },
            "paymentMethod": "COD"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(sample_order("PENDING", "COD"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/clear"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "ok" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    shop.cart.fetch_cart().await.expect("fetch succeeds");

    let flow = filled_flow(PaymentMethod::Cod);
    let placement = flow
        .place_order(&mut shop.cart, &shop.orders, &shop.payments)
        .await
        .expect("order placed");

    let OrderPlacement::Completed(order) = placement else {
        panic!("COD placement must complete immediately");
    };
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert!(shop.cart.cart().is_none(), "cart must be cleared");
}

#[tokio::test]
async fn place_order_is_unreachable_before_review() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    let flow = CheckoutFlow::new();
    let err = flow
        .place_order(&mut shop.cart, &shop.orders, &shop.payments)
        .await
        .expect_err("must not place");
    assert!(matches!(err, CheckoutError::NotAtReview));
}

#[tokio::test]
async fn rejected_order_leaves_cart_untouched() {
    let server = MockServer::start().await;
    mount_cart(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(error_envelope("Insufficient stock")),
        )
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    shop.cart.fetch_cart().await.expect("fetch succeeds");
    let before = shop.cart.cart().cloned().expect("snapshot present");

    let flow = filled_flow(PaymentMethod::Cod);
    let err = flow
        .place_order(&mut shop.cart, &shop.orders, &shop.payments)
        .await
        .expect_err("order rejected");

    assert!(matches!(err, CheckoutError::Api(_)));
    assert_eq!(shop.cart.cart(), Some(&before));
}

#[tokio::test]
async fn online_order_defers_cart_clear_until_verification() {
    let server = MockServer::start().await;
    mount_cart(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(sample_order("PENDING", "RAZORPAY"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/razorpay/order/o-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "id": "pay-1",
            "amount": 522,
            "currency": "INR",
            "razorpayOrderId": "rzp-o-1"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/razorpay/verify"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "ok" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/clear"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "ok" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    shop.cart.fetch_cart().await.expect("fetch succeeds");

    let flow = filled_flow(PaymentMethod::Razorpay);
    let placement = flow
        .place_order(&mut shop.cart, &shop.orders, &shop.payments)
        .await
        .expect("order placed");

    let OrderPlacement::PaymentRequired { order, payment } = placement else {
        panic!("online placement must await payment");
    };
    assert_eq!(order.payment_method, PaymentMethod::Razorpay);
    assert_eq!(payment.razorpay_order_id, "rzp-o-1");
    // The amount came from the server's payment order, and the cart is
    // still intact while payment is pending.
    assert!(shop.cart.cart().is_some());

    let proof = PaymentProof {
        razorpay_order_id: payment.razorpay_order_id.clone(),
        razorpay_payment_id: "rzp-p-1".to_string(),
        razorpay_signature: "sig".to_string(),
        payment_id: PaymentId::new("pay-1"),
    };
    confirm_online_payment(&mut shop.cart, &shop.payments, &proof)
        .await
        .expect("verification succeeds");

    assert!(shop.cart.cart().is_none(), "cart clears after verification");
}

#[tokio::test]
async fn failed_verification_keeps_cart_and_reports() {
    let server = MockServer::start().await;
    mount_cart(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/payments/razorpay/verify"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(error_envelope("Payment signature mismatch")),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cart/clear"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    shop.cart.fetch_cart().await.expect("fetch succeeds");

    let proof = PaymentProof {
        razorpay_order_id: "rzp-o-1".to_string(),
        razorpay_payment_id: "rzp-p-1".to_string(),
        razorpay_signature: "bad-sig".to_string(),
        payment_id: PaymentId::new("pay-1"),
    };
    let err = confirm_online_payment(&mut shop.cart, &shop.payments, &proof)
        .await
        .expect_err("verification fails");

    assert!(matches!(err, CheckoutError::PaymentVerificationFailed(_)));
    assert_eq!(
        err.to_string(),
        "payment verification failed: Payment signature mismatch"
    );
    assert!(shop.cart.cart().is_some(), "cart must stay intact");
}
