//! Integration tests for the wishlist store: idempotent adds with
//! rollback, fire-and-forget removal.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use saffron_core::ProductId;
use saffron_client::WishlistAdd;
use saffron_client::types::Product;
use saffron_integration_tests::{error_envelope, ok_envelope, test_storefront};

fn product(id: &str) -> Product {
    serde_json::from_value(json!({
        "id": id,
        "name": format!("Product {id}"),
        "price": 100
    }))
    .expect("product fixture")
}

#[tokio::test]
async fn fetch_replaces_local_items_with_server_truth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            { "id": "p1", "name": "Steel Bottle", "price": 200 },
            { "id": "p2", "name": "Canvas Tote", "price": 350 }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    shop.wishlist.fetch_wishlist().await.expect("fetch succeeds");

    assert_eq!(shop.wishlist.item_count(), 2);
    assert!(shop.wishlist.is_in_wishlist(&ProductId::new("p2")));
}

#[tokio::test]
async fn add_syncs_and_keeps_the_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wishlist/add"))
        .and(body_json(json!({ "productId": "p1" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(ok_envelope(json!("success"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    let outcome = shop
        .wishlist
        .add_to_wishlist(product("p1"))
        .await
        .expect("add succeeds");

    assert_eq!(outcome, WishlistAdd::Added);
    assert!(shop.wishlist.is_in_wishlist(&ProductId::new("p1")));
}

#[tokio::test]
async fn duplicate_add_is_idempotent_and_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wishlist/add"))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok_envelope(json!("success"))))
        .expect(1)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    shop.wishlist
        .add_to_wishlist(product("p1"))
        .await
        .expect("first add succeeds");

    // Second add of the same id: the only observable effect is the
    // duplicate notice; the expect(1) above proves no second request.
    let outcome = shop
        .wishlist
        .add_to_wishlist(product("p1"))
        .await
        .expect("duplicate is not an error");

    assert_eq!(outcome, WishlistAdd::AlreadyPresent);
    assert_eq!(shop.wishlist.item_count(), 1);
}

#[tokio::test]
async fn rejected_add_rolls_back_the_optimistic_append() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wishlist/add"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_envelope("No such product")))
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    let err = shop
        .wishlist
        .add_to_wishlist(product("ghost"))
        .await
        .expect_err("server rejects");

    assert_eq!(err.user_message(), "No such product");
    assert_eq!(shop.wishlist.item_count(), 0);
}

#[tokio::test]
async fn removal_is_fire_and_forget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wishlist/add"))
        .respond_with(ResponseTemplate::new(201).set_body_json(ok_envelope(json!("success"))))
        .mount(&server)
        .await;
    // The sync fails, but the local removal stands.
    Mock::given(method("DELETE"))
        .and(path("/api/wishlist/remove/p1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_envelope("boom")))
        .expect(1)
        .mount(&server)
        .await;

    let mut shop = test_storefront(&server.uri());
    shop.wishlist
        .add_to_wishlist(product("p1"))
        .await
        .expect("add succeeds");

    shop.wishlist
        .remove_from_wishlist(&ProductId::new("p1"))
        .await;

    assert_eq!(shop.wishlist.item_count(), 0);
    assert!(!shop.wishlist.is_in_wishlist(&ProductId::new("p1")));
}
