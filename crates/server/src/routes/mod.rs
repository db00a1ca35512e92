//! HTTP route handlers for the orders API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health             - Liveness check
//! GET  /health/ready       - Readiness check (pings the order store)
//!
//! # Orders
//! POST /api/orders         - Place an order (201 on success)
//! GET  /api/orders         - List past orders, newest first
//! GET  /api/orders/{id}    - Fetch one past order by numeric ID
//! ```
//!
//! The product catalog, categories, and recommendation proxy are served by
//! external collaborators; this binary only owns the order surface.

pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list))
        .route("/{id}", get(orders::show))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/orders", order_routes())
}
