//! Catalog product descriptor consumed by the cart engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as served by the catalog collaborator.
///
/// The cart engine stores a snapshot of these fields in a line item at
/// add-time; it does not own or validate the catalog schema beyond that.
/// `stock` is advisory only - stock limiting is the caller's concern and
/// the engine never rejects an add based on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let product: Product = serde_json::from_str(
            r#"{"id": "B001", "name": "USB Cable", "price": "12.50"}"#,
        )
        .unwrap();

        assert_eq!(product.id, ProductId::from("B001"));
        assert_eq!(product.price, Decimal::new(1250, 2));
        assert!(product.image.is_none());
        assert!(product.stock.is_none());
    }
}
