//! Order repository: sequential ID assignment and immutable persistence.
//!
//! Order IDs are strictly increasing unique integers starting at 1. The
//! Postgres backend computes the next ID inside the insert statement and
//! relies on the unique index on `order_id` to reject raced assignments,
//! retrying with a fresh ID; the in-memory backend serializes assignment
//! under a mutex. Neither backend reproduces the unprotected
//! count-then-increment scheme.

use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use bamazon_core::{Order, OrderId, OrderLine, PaymentMethod, ShippingAddress};

use super::RepositoryError;

/// Attempts at claiming an order ID before surfacing the conflict.
/// Conflicts fail immediately, so there is no backoff between attempts.
const MAX_ID_RETRIES: u32 = 3;

/// Order fields supplied by the finalizer; `order_id` and `timestamp` are
/// assigned by the store at insert time.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub product_list: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Append-only order storage.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Assign the next order ID and persist the order atomically.
    ///
    /// On success the returned [`Order`] carries the assigned ID and the
    /// server timestamp. On failure nothing is persisted, so the attempt
    /// is safely retryable by the caller.
    async fn insert(&self, new_order: NewOrder) -> Result<Order, RepositoryError>;

    /// All persisted orders, newest first.
    async fn list(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Fetch one order by its assigned ID.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Number of persisted orders.
    async fn count(&self) -> Result<u64, RepositoryError>;
}

// =============================================================================
// Postgres backend
// =============================================================================

/// `PostgreSQL`-backed order store.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

const ORDER_COLUMNS: &str = r#"order_id, "timestamp", user_id, product_list, shipping_address,
payment_method, subtotal, tax, shipping, total"#;

impl PgOrderStore {
    /// Create a store backed by the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn try_insert(
        &self,
        new_order: &NewOrder,
        timestamp: DateTime<Utc>,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO orders
                (order_id, "timestamp", user_id, product_list, shipping_address,
                 payment_method, subtotal, tax, shipping, total)
            SELECT COALESCE(MAX(order_id), 0) + 1, $1, $2, $3, $4, $5, $6, $7, $8, $9
            FROM orders
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(timestamp)
            .bind(&new_order.user_id)
            .bind(Json(&new_order.product_list))
            .bind(Json(&new_order.shipping_address))
            .bind(new_order.payment_method.to_string())
            .bind(new_order.subtotal)
            .bind(new_order.tax)
            .bind(new_order.shipping)
            .bind(new_order.total)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("order id already claimed".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        order_from_row(&row)
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let timestamp = Utc::now();

        let mut attempt = 1;
        loop {
            match self.try_insert(&new_order, timestamp).await {
                Err(RepositoryError::Conflict(reason)) if attempt < MAX_ID_RETRIES => {
                    tracing::warn!(attempt, %reason, "order id conflict, retrying");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            r#"SELECT {ORDER_COLUMNS} FROM orders ORDER BY "timestamp" DESC, order_id DESC"#
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(order_from_row).collect()
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!(r#"SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1"#);
        let row = sqlx::query(&sql)
            .bind(order_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM orders")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count.unsigned_abs())
    }
}

fn order_from_row(row: &PgRow) -> Result<Order, RepositoryError> {
    let payment_method: String = row.try_get("payment_method")?;
    let payment_method = PaymentMethod::from_str(&payment_method)
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

    let Json(product_list): Json<Vec<OrderLine>> = row.try_get("product_list")?;
    let Json(shipping_address): Json<ShippingAddress> = row.try_get("shipping_address")?;

    Ok(Order {
        order_id: row.try_get("order_id")?,
        timestamp: row.try_get("timestamp")?,
        user_id: row.try_get("user_id")?,
        product_list,
        shipping_address,
        payment_method,
        subtotal: row.try_get("subtotal")?,
        tax: row.try_get("tax")?,
        shipping: row.try_get("shipping")?,
        total: row.try_get("total")?,
    })
}

// =============================================================================
// In-memory backend
// =============================================================================

/// In-process order store.
///
/// Used by the test suite and as the fallback when no database URL is
/// configured. The mutex makes ID assignment and insertion one atomic
/// step, so concurrent checkouts cannot claim the same ID.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<Order>>,
}

impl MemoryOrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Order>>, RepositoryError> {
        self.orders
            .lock()
            .map_err(|_| RepositoryError::Unavailable("order store lock poisoned".to_owned()))
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let mut orders = self.lock()?;
        let next_id = orders
            .iter()
            .map(|order| order.order_id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        let order = Order {
            order_id: OrderId::new(next_id),
            timestamp: Utc::now(),
            user_id: new_order.user_id,
            product_list: new_order.product_list,
            shipping_address: new_order.shipping_address,
            payment_method: new_order.payment_method,
            subtotal: new_order.subtotal,
            tax: new_order.tax,
            shipping: new_order.shipping,
            total: new_order.total,
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.lock()?.clone();
        orders.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(b.order_id.cmp(&a.order_id))
        });
        Ok(orders)
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .find(|order| order.order_id == order_id)
            .cloned())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.lock()?.len() as u64)
    }
}
