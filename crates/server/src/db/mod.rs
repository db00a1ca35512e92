//! Order storage for the Bamazon server.
//!
//! The order store is an append-only shared resource: writers only insert,
//! never update or delete existing order records. Two backends implement
//! the [`orders::OrderStore`] seam:
//!
//! - `PgOrderStore` - `PostgreSQL` via sqlx (table `orders`)
//! - `MemoryOrderStore` - in-process, for tests and database-less runs
//!
//! Migrations live in `crates/server/migrations/` and are embedded with
//! `sqlx::migrate!`, run at server startup.

pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use orders::{MemoryOrderStore, NewOrder, OrderStore, PgOrderStore};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., a raced order ID).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The storage backend is unusable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
