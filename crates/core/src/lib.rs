//! Bamazon Core - Shared types library.
//!
//! This crate provides common types used across all Bamazon components:
//! - `cart` - Client-resident cart engine
//! - `server` - Order finalizer and orders API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money formatting, product/order records, and
//!   pricing configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
