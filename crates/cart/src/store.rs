//! Durable local cart persistence.
//!
//! The full cart state is serialized under one fixed storage key on every
//! mutation and reloaded on startup. A missing or corrupt persisted value
//! is never a fatal error - it loads as an empty cart with a warning. The
//! persisted blob carries an explicit schema version so malformed or
//! legacy carts are detected and discarded deliberately rather than
//! silently coerced.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bamazon_core::{PricingConfig, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CheckoutSnapshot, LineItem};
use crate::totals::CartTotals;

/// Fixed storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "bamazonCart";

/// Current persisted schema version.
const PERSISTED_VERSION: u32 = 1;

/// Versioned on-disk cart representation.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCart {
    version: u32,
    items: Vec<LineItem>,
}

/// Errors writing the cart to durable storage.
///
/// Load-side problems are deliberately not represented here: loading
/// always succeeds, degrading to an empty cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Filesystem error reading or writing the storage file.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Cart state could not be serialized.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed key-value store holding the serialized cart.
///
/// The durable analog of browser local storage: one JSON document under
/// the fixed key [`CART_STORAGE_KEY`] inside a caller-supplied directory.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CART_STORAGE_KEY}.json")),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted line items.
    ///
    /// Missing file, unreadable JSON, and unknown schema versions all load
    /// as an empty cart; the failure is logged, never propagated.
    #[must_use]
    pub fn load(&self) -> Vec<LineItem> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read persisted cart, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<PersistedCart>(&raw) {
            Ok(persisted) if persisted.version == PERSISTED_VERSION => persisted.items,
            Ok(persisted) => {
                tracing::warn!(
                    version = persisted.version,
                    "unknown persisted cart schema version, starting empty"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt persisted cart, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize and write the line items under the storage key.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] if serialization or the filesystem write
    /// fails.
    pub fn save(&self, items: &[LineItem]) -> Result<(), CartStoreError> {
        let persisted = PersistedCart {
            version: PERSISTED_VERSION,
            items: items.to_vec(),
        };
        let raw = serde_json::to_string(&persisted)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// A cart coupled to durable storage.
///
/// Every mutation updates the in-memory cart first (the source of truth
/// for subsequent reads) and then mirrors it to the store best-effort: a
/// failed write is logged and the session continues.
#[derive(Debug)]
pub struct CartSession {
    cart: Cart,
    store: FileCartStore,
}

impl CartSession {
    /// Open (or create) the session cart persisted under `dir`.
    #[must_use]
    pub fn open(dir: impl AsRef<Path>, pricing: PricingConfig) -> Self {
        let store = FileCartStore::new(dir);
        let cart = Cart::from_items(store.load(), pricing);
        Self { cart, store }
    }

    /// Read access to the underlying cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add `quantity` of `product`, then persist.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        self.cart.add_item(product, quantity);
        self.persist();
    }

    /// Remove the line item for `product_id`, then persist.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.cart.remove_item(product_id);
        self.persist();
    }

    /// Set the quantity for `product_id` (0 removes), then persist.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        self.cart.update_quantity(product_id, quantity);
        self.persist();
    }

    /// Empty the cart, then persist.
    ///
    /// Called by the checkout flow immediately after a successful order
    /// placement; on a failed placement the cart is left untouched so the
    /// user can retry.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Derive the current totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Freeze the cart into a checkout snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CheckoutSnapshot {
        self.cart.snapshot()
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(self.cart.items()) {
            tracing::warn!(error = %e, "failed to persist cart, in-memory state remains authoritative");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bamazon_core::{Product, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: Decimal::new(cents, 2),
            image: None,
            category: None,
            stock: None,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_unknown_version_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path());
        fs::write(store.path(), r#"{"version": 99, "items": []}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_items_and_totals() {
        let dir = tempfile::tempdir().unwrap();
        let pricing = PricingConfig::default();

        let mut cart = Cart::new(pricing);
        cart.add_item(&product("A", 1999), 1);
        cart.add_item(&product("B", 2999), 2);
        cart.add_item(&product("C", 499), 3);

        let store = FileCartStore::new(dir.path());
        store.save(cart.items()).unwrap();

        let reloaded = Cart::from_items(store.load(), pricing);
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(reloaded.item_count(), cart.item_count());
        assert_eq!(reloaded.totals().subtotal, cart.totals().subtotal);
    }

    #[test]
    fn test_session_persists_every_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let pricing = PricingConfig::default();

        {
            let mut session = CartSession::open(dir.path(), pricing);
            session.add_item(&product("A", 1999), 2);
            session.add_item(&product("B", 2999), 1);
            session.update_quantity(&ProductId::from("A"), 4);
            session.remove_item(&ProductId::from("B"));
        }

        let reopened = CartSession::open(dir.path(), pricing);
        assert_eq!(reopened.cart().quantity_of(&ProductId::from("A")), 4);
        assert!(!reopened.cart().is_in_cart(&ProductId::from("B")));
    }

    #[test]
    fn test_session_clear_persists_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let pricing = PricingConfig::default();

        let mut session = CartSession::open(dir.path(), pricing);
        session.add_item(&product("A", 1999), 2);
        session.clear();

        let reopened = CartSession::open(dir.path(), pricing);
        assert!(reopened.cart().is_empty());
    }
}
