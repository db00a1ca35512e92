//! Core types for Bamazon.
//!
//! This module provides type-safe wrappers for the domain concepts shared
//! between the cart engine and the order finalizer.

pub mod id;
pub mod money;
pub mod order;
pub mod pricing;
pub mod product;

pub use id::{OrderId, ProductId};
pub use money::{format_usd, round_display};
pub use order::{
    AddressError, Order, OrderLine, PaymentMethod, PaymentMethodError, ShippingAddress,
    SINGLE_USER_ID,
};
pub use pricing::PricingConfig;
pub use product::Product;
