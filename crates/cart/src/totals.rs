//! Derived cart totals.
//!
//! Totals are always a pure function of the current line items and the
//! injected [`PricingConfig`] - they are recomputed on access and never
//! stored where they could desynchronize from the items.

use bamazon_core::PricingConfig;
use rust_decimal::Decimal;

use crate::cart::LineItem;

/// Monetary totals derived from a set of line items.
///
/// All values are exact `Decimal` arithmetic; rounding to cents happens
/// only at display or snapshot boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of `unit_price * quantity` over all items.
    pub subtotal: Decimal,
    /// `subtotal * tax_rate`, unrounded.
    pub tax: Decimal,
    /// Zero when the subtotal strictly exceeds the free-shipping
    /// threshold, otherwise the flat fee.
    pub shipping: Decimal,
    /// `subtotal + tax + shipping`.
    pub grand_total: Decimal,
}

impl CartTotals {
    /// Compute totals for `items` under `pricing`.
    #[must_use]
    pub fn compute(items: &[LineItem], pricing: &PricingConfig) -> Self {
        let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();
        let tax = subtotal * pricing.tax_rate;
        let shipping = if subtotal > pricing.shipping_threshold {
            Decimal::ZERO
        } else {
            pricing.shipping_fee
        };

        Self {
            subtotal,
            tax,
            shipping,
            grand_total: subtotal + tax + shipping,
        }
    }
}
