//! Bamazon Cart - Session cart engine.
//!
//! Owns the single authoritative cart for the current session: line items
//! keyed by product identity, mutation operations, derived monetary totals,
//! and durable local persistence. The engine is synchronous and
//! single-session; the order finalizer in `bamazon-server` is its only
//! downstream consumer, reached through the checkout snapshot.
//!
//! # Modules
//!
//! - [`cart`] - Cart state machine and checkout snapshot
//! - [`totals`] - Derived totals (subtotal, tax, shipping, grand total)
//! - [`store`] - Versioned file-backed persistence and [`store::CartSession`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod store;
pub mod totals;

pub use cart::{Cart, CheckoutSnapshot, LineItem};
pub use store::{CartSession, CartStoreError, FileCartStore, CART_STORAGE_KEY};
pub use totals::CartTotals;
