//! Immutable order records and checkout metadata.
//!
//! Serde field names match the order wire contract (`product_list`,
//! `shipping_address`, `payment_method`, ...). An [`Order`] is a historical
//! snapshot: line items and totals are captured at submission time and
//! never recomputed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{OrderId, ProductId};

/// The single implicit user of the system (there is no authentication).
pub const SINGLE_USER_ID: &str = "single_user";

/// One product-and-quantity pair within an order, with price-at-purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price captured at checkout time.
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Shipping destination for an order. All five fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// A required shipping address field was empty.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required shipping field: {0}")]
pub struct AddressError(pub &'static str);

impl ShippingAddress {
    /// Check that every field is non-empty (ignoring surrounding whitespace).
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] naming the first empty field.
    pub fn validate(&self) -> Result<(), AddressError> {
        let fields = [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(AddressError(label));
            }
        }
        Ok(())
    }
}

/// Payment method tag collected at checkout.
///
/// Card details are collected by the form but never processed; only the
/// identifying tag is recorded on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "credit_card"),
        }
    }
}

/// An unrecognized payment method tag.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct PaymentMethodError(pub String);

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(Self::CreditCard),
            other => Err(PaymentMethodError(other.to_owned())),
        }
    }
}

/// An immutable record of a completed checkout.
///
/// `order_id` and `timestamp` are server-assigned; the monetary fields are
/// captured from the submitted cart snapshot, not derived from the line
/// items after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub product_list: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

fn default_user_id() -> String {
    SINGLE_USER_ID.to_owned()
}
