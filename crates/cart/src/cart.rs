//! Cart state machine and checkout snapshot.

use bamazon_core::{round_display, OrderLine, PricingConfig, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::totals::CartTotals;

/// One distinct product held in the cart.
///
/// Exactly one line item exists per distinct `product_id`; the quantity is
/// always at least 1 (a quantity that would drop to 0 removes the item).
/// The name, price, image, and category are snapshots of the product at
/// the moment it was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl LineItem {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }

    /// `unit_price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The ordered collection of line items for the current session.
///
/// Insertion order is stable for display; it carries no meaning for
/// totals. Derived totals are recomputed from the items on every access.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    pricing: PricingConfig,
}

impl Cart {
    /// Create an empty cart with the given pricing rules.
    #[must_use]
    pub const fn new(pricing: PricingConfig) -> Self {
        Self {
            items: Vec::new(),
            pricing,
        }
    }

    /// Rebuild a cart from previously persisted line items.
    #[must_use]
    pub const fn from_items(items: Vec<LineItem>, pricing: PricingConfig) -> Self {
        Self { items, pricing }
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The pricing rules this cart derives totals under.
    #[must_use]
    pub const fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// True when the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `product` to the cart.
    ///
    /// If a line item for the product already exists its quantity is
    /// incremented (not overwritten); otherwise a new line item is created
    /// from the product's fields at this moment. Adding a quantity of 0 is
    /// a no-op. Stock is never checked here - limiting adds to available
    /// stock is the caller's responsibility.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.find_mut(&product.id) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(LineItem::from_product(product, quantity)),
        }
    }

    /// Remove the line item for `product_id`. No-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|item| &item.product_id != product_id);
    }

    /// Set the line item's quantity to exactly `quantity`.
    ///
    /// A quantity of 0 removes the line item entirely. No-op if
    /// `product_id` is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
        } else if let Some(item) = self.find_mut(product_id) {
            item.quantity = quantity;
        }
    }

    /// Empty all line items unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// True iff a line item for `product_id` currently exists.
    #[must_use]
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    /// Current quantity for `product_id`, or 0 if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Derive the current monetary totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.items, &self.pricing)
    }

    /// Freeze the cart into a checkout snapshot.
    ///
    /// The snapshot is an independent copy: later mutations of this cart
    /// do not affect it. Monetary fields are rounded to cents here (the
    /// submission boundary), and the total is the sum of the rounded
    /// components so `total == subtotal + tax + shipping` holds exactly on
    /// the resulting order record.
    #[must_use]
    pub fn snapshot(&self) -> CheckoutSnapshot {
        let totals = self.totals();
        let subtotal = round_display(totals.subtotal);
        let tax = round_display(totals.tax);
        let shipping = round_display(totals.shipping);

        CheckoutSnapshot {
            product_list: self
                .items
                .iter()
                .map(|item| OrderLine {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    price: item.unit_price,
                    quantity: item.quantity,
                    image: item.image.clone(),
                    category: item.category.clone(),
                })
                .collect(),
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    fn find_mut(&mut self, product_id: &ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
    }
}

/// The frozen state of a cart at the moment of checkout submission.
///
/// Field names match the order submission wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    pub product_list: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}
