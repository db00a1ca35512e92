//! Integration test support for Bamazon.
//!
//! Provides an in-process orders API (router over the in-memory order
//! store) plus helpers for driving it with `tower::ServiceExt::oneshot`,
//! so the full cart-to-order flow can be exercised without Postgres or a
//! listening socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use bamazon_cart::CheckoutSnapshot;
use bamazon_server::config::ServerConfig;
use bamazon_server::db::MemoryOrderStore;
use bamazon_server::routes;
use bamazon_server::state::AppState;

/// Build an `AppState` over a fresh in-memory order store.
#[must_use]
pub fn test_state() -> AppState {
    let config = ServerConfig {
        database_url: None,
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
    };
    AppState::new(config, Arc::new(MemoryOrderStore::new()))
}

/// Build the orders API router over a fresh in-memory store.
#[must_use]
pub fn test_router() -> Router {
    routes::routes().with_state(test_state())
}

/// Send a request to the router and decode the JSON response body.
///
/// # Panics
///
/// Panics if the request cannot be built or the body is not JSON - both
/// indicate a broken test, not a broken server.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("failed to build request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request"),
    };

    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = serde_json::from_slice(&bytes).expect("response body was not JSON");
    (status, value)
}

/// A shipping address with all five required fields filled.
#[must_use]
pub fn valid_address() -> Value {
    json!({
        "name": "Ada Lovelace",
        "address": "12 Analytical Way",
        "city": "London",
        "state": "LDN",
        "zip": "12345"
    })
}

/// Build an order submission payload from a checkout snapshot.
///
/// # Panics
///
/// Panics if the snapshot fails to serialize (a broken test).
#[must_use]
pub fn submission_json(snapshot: &CheckoutSnapshot, shipping_address: Value) -> Value {
    let mut value = serde_json::to_value(snapshot).expect("snapshot serialization failed");
    value["shipping_address"] = shipping_address;
    value["payment_method"] = json!("credit_card");
    value
}
