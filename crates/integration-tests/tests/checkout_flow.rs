//! End-to-end checkout flow: cart mutations, snapshot submission, and the
//! resulting immutable order.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;

use bamazon_core::{PricingConfig, Product, ProductId};
use bamazon_cart::CartSession;
use bamazon_integration_tests::{send_json, submission_json, test_router, valid_address};

fn product(id: &str, cents: i64) -> Product {
    Product {
        id: ProductId::from(id),
        name: format!("Product {id}"),
        price: Decimal::new(cents, 2),
        image: None,
        category: Some("Electronics".to_owned()),
        stock: Some(25),
    }
}

#[tokio::test]
async fn test_checkout_happy_path_clears_cart() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CartSession::open(dir.path(), PricingConfig::default());
    session.add_item(&product("A", 2000), 1);
    session.add_item(&product("B", 3500), 1);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.total, Decimal::new(5940, 2));

    let app = test_router();
    let payload = submission_json(&snapshot, valid_address());
    let (status, body) = send_json(app, "POST", "/api/orders", Some(payload)).await;

    assert_eq!(status, 201);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["order"]["order_id"], 1);
    assert_eq!(body["order"]["total"], "59.40");
    assert_eq!(body["order"]["tax"], "4.40");
    assert_eq!(body["order"]["shipping"], "0.00");
    assert_eq!(body["order"]["user_id"], "single_user");
    assert_eq!(body["order"]["product_list"].as_array().unwrap().len(), 2);

    // Success: the originating cart is cleared and stays cleared on disk.
    session.clear();
    drop(session);
    let reopened = CartSession::open(dir.path(), PricingConfig::default());
    assert!(reopened.cart().is_empty());
}

#[tokio::test]
async fn test_placed_order_is_immune_to_later_cart_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CartSession::open(dir.path(), PricingConfig::default());
    let p = product("A", 2000);
    session.add_item(&p, 2);

    let snapshot = session.snapshot();
    let app = test_router();
    let payload = submission_json(&snapshot, valid_address());
    let (status, _) = send_json(app.clone(), "POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, 201);

    // Mutate the cart the snapshot came from.
    session.update_quantity(&p.id, 9);
    session.add_item(&product("B", 3500), 4);

    let (status, body) = send_json(app, "GET", "/api/orders/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["subtotal"], "40.00");
    assert_eq!(body["product_list"][0]["quantity"], 2);
    assert_eq!(body["product_list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sequential_checkouts_get_increasing_ids_and_newest_first_listing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CartSession::open(dir.path(), PricingConfig::default());
    session.add_item(&product("A", 1500), 1);
    let snapshot = session.snapshot();

    let app = test_router();
    for expected in 1..=3 {
        let payload = submission_json(&snapshot, valid_address());
        let (status, body) = send_json(app.clone(), "POST", "/api/orders", Some(payload)).await;
        assert_eq!(status, 201);
        assert_eq!(body["order"]["order_id"], expected);
    }

    let (status, body) = send_json(app, "GET", "/api/orders", None).await;
    assert_eq!(status, 200);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|order| order["order_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_empty_cart_submission_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let session = CartSession::open(dir.path(), PricingConfig::default());
    let snapshot = session.snapshot();

    let app = test_router();
    let payload = submission_json(&snapshot, valid_address());
    let (status, body) = send_json(app.clone(), "POST", "/api/orders", Some(payload)).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("empty cart"));

    // Nothing was persisted.
    let (_, orders) = send_json(app, "GET", "/api/orders", None).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_incomplete_address_rejected_and_cart_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CartSession::open(dir.path(), PricingConfig::default());
    session.add_item(&product("A", 2000), 1);
    let snapshot = session.snapshot();

    let bad_address = json!({
        "name": "Ada Lovelace",
        "address": "12 Analytical Way",
        "city": "London",
        "state": "LDN",
        "zip": ""
    });

    let app = test_router();
    let payload = submission_json(&snapshot, bad_address);
    let (status, body) = send_json(app, "POST", "/api/orders", Some(payload)).await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("zip"));

    // Failed placement: the cart is untouched, the user can retry.
    assert_eq!(session.cart().item_count(), 1);
}

#[tokio::test]
async fn test_unknown_order_id_is_404() {
    let app = test_router();
    let (status, body) = send_json(app, "GET", "/api/orders/99", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Order not found");
}

#[tokio::test]
async fn test_payment_method_defaults_to_credit_card() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = CartSession::open(dir.path(), PricingConfig::default());
    session.add_item(&product("A", 2000), 1);

    let mut payload = submission_json(&session.snapshot(), valid_address());
    payload.as_object_mut().unwrap().remove("payment_method");

    let app = test_router();
    let (status, body) = send_json(app, "POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, 201);
    assert_eq!(body["order"]["payment_method"], "credit_card");
}
