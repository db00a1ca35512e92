//! Bamazon Server library.
//!
//! This crate provides the order finalizer and its REST surface as a
//! library, allowing it to be tested in-process and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
