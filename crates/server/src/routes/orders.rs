//! Order route handlers.
//!
//! Wire shapes follow the order submission contract: monetary values are
//! decimal strings, line items travel as `product_list`, and the response
//! wraps the persisted order in a success envelope.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bamazon_core::{Order, OrderId, OrderLine, PaymentMethod, ShippingAddress};

use crate::error::{AppError, Result};
use crate::services::OrderSubmission;
use crate::state::AppState;

/// Order submission payload.
///
/// Totals are captured as submitted - the server records them on the
/// order, it does not recompute them from the line items.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub product_list: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Success envelope for a placed order.
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order: Order,
    pub message: String,
}

/// Place an order from a checkout submission.
///
/// Returns 201 with the persisted order (server-assigned `order_id` and
/// timestamp) on success. Validation failures are 400; a persistence
/// failure leaves nothing behind and the client may retry.
#[instrument(skip(state, request), fields(items = request.product_list.len()))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>)> {
    let order = state
        .finalizer()
        .place_order(OrderSubmission {
            product_list: request.product_list,
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            subtotal: request.subtotal,
            tax: request.tax,
            shipping: request.shipping,
            total: request.total,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            success: true,
            order,
            message: "Order placed successfully".to_owned(),
        }),
    ))
}

/// List all past orders, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = state.store().list().await?;
    Ok(Json(orders))
}

/// Fetch one past order by its numeric ID.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Order>> {
    let order = state
        .store()
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;
    Ok(Json(order))
}
