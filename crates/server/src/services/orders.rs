//! The order finalizer: checkout submission to immutable order.
//!
//! Validation happens synchronously before any persistence attempt and
//! never partially applies. A failed persistence leaves no state behind,
//! so the caller may retry the identical submission; the originating cart
//! is only cleared by the caller after a success result.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use bamazon_core::{AddressError, Order, OrderLine, PaymentMethod, ShippingAddress, SINGLE_USER_ID};

use crate::db::{NewOrder, OrderStore, RepositoryError};

/// A checkout submission: the frozen cart snapshot plus shipping and
/// payment metadata.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub product_list: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Why an order could not be placed.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The submission carried no line items.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// A required shipping address field was empty.
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    /// The order store rejected or failed the insert.
    #[error("failed to persist order: {0}")]
    Store(#[from] RepositoryError),
}

/// Accepts checkout submissions, assigns order identity, and persists
/// immutable order records.
#[derive(Clone)]
pub struct OrderFinalizer {
    store: Arc<dyn OrderStore>,
}

impl OrderFinalizer {
    /// Create a finalizer over the given order store.
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Validate the submission and persist it as the next order.
    ///
    /// Two successful calls with identical submissions produce two
    /// distinct orders; duplicate suppression is not this layer's job.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceOrderError::EmptyCart`] or
    /// [`PlaceOrderError::InvalidAddress`] before touching the store, and
    /// [`PlaceOrderError::Store`] when persistence fails (in which case
    /// nothing was written).
    pub async fn place_order(&self, submission: OrderSubmission) -> Result<Order, PlaceOrderError> {
        if submission.product_list.is_empty() {
            return Err(PlaceOrderError::EmptyCart);
        }
        submission.shipping_address.validate()?;

        let order = self
            .store
            .insert(NewOrder {
                user_id: SINGLE_USER_ID.to_owned(),
                product_list: submission.product_list,
                shipping_address: submission.shipping_address,
                payment_method: submission.payment_method,
                subtotal: submission.subtotal,
                tax: submission.tax,
                shipping: submission.shipping,
                total: submission.total,
            })
            .await?;

        tracing::info!(order_id = %order.order_id, total = %order.total, "order placed");
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bamazon_core::{OrderId, ProductId};

    use crate::db::MemoryOrderStore;

    use super::*;

    fn submission() -> OrderSubmission {
        OrderSubmission {
            product_list: vec![
                OrderLine {
                    product_id: ProductId::from("A"),
                    name: "Widget".to_owned(),
                    price: Decimal::new(2000, 2),
                    quantity: 1,
                    image: None,
                    category: None,
                },
                OrderLine {
                    product_id: ProductId::from("B"),
                    name: "Gadget".to_owned(),
                    price: Decimal::new(3500, 2),
                    quantity: 1,
                    image: None,
                    category: None,
                },
            ],
            shipping_address: ShippingAddress {
                name: "Ada Lovelace".to_owned(),
                address: "12 Analytical Way".to_owned(),
                city: "London".to_owned(),
                state: "LDN".to_owned(),
                zip: "12345".to_owned(),
            },
            payment_method: PaymentMethod::CreditCard,
            subtotal: Decimal::new(5500, 2),
            tax: Decimal::new(440, 2),
            shipping: Decimal::ZERO,
            total: Decimal::new(5940, 2),
        }
    }

    fn finalizer() -> (OrderFinalizer, Arc<MemoryOrderStore>) {
        let store = Arc::new(MemoryOrderStore::new());
        (OrderFinalizer::new(Arc::clone(&store) as _), store)
    }

    #[tokio::test]
    async fn test_place_order_assigns_id_and_timestamp() {
        let (finalizer, _store) = finalizer();

        let order = finalizer.place_order(submission()).await.unwrap();
        assert_eq!(order.order_id, OrderId::new(1));
        assert_eq!(order.total, Decimal::new(5940, 2));
        assert_eq!(order.user_id, SINGLE_USER_ID);
    }

    #[tokio::test]
    async fn test_sequential_orders_get_increasing_ids() {
        let (finalizer, _store) = finalizer();

        for expected in 1..=4_i64 {
            let order = finalizer.place_order(submission()).await.unwrap();
            assert_eq!(order.order_id, OrderId::new(expected));
        }
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_distinct_orders() {
        let (finalizer, store) = finalizer();

        let first = finalizer.place_order(submission()).await.unwrap();
        let second = finalizer.place_order(submission()).await.unwrap();
        assert_ne!(first.order_id, second.order_id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_before_persistence() {
        let (finalizer, store) = finalizer();

        let mut empty = submission();
        empty.product_list.clear();

        let err = finalizer.place_order(empty).await.unwrap_err();
        assert!(matches!(err, PlaceOrderError::EmptyCart));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_incomplete_address_is_rejected_before_persistence() {
        let (finalizer, store) = finalizer();

        let mut bad = submission();
        bad.shipping_address.zip = String::new();

        let err = finalizer.place_order(bad).await.unwrap_err();
        assert!(matches!(
            err,
            PlaceOrderError::InvalidAddress(AddressError("zip"))
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
