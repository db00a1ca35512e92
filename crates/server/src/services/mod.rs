//! Business logic services.

pub mod orders;

pub use orders::{OrderFinalizer, OrderSubmission, PlaceOrderError};
