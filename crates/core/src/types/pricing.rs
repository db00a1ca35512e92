//! Pricing business rules injected into the cart engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax and shipping rules applied when deriving cart totals.
///
/// These are named configuration rather than inlined literals so they can
/// vary by locale/region without touching the cart engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fractional tax rate applied to the pre-tax subtotal.
    pub tax_rate: Decimal,
    /// Subtotal above which shipping is free (strict greater-than).
    pub shipping_threshold: Decimal,
    /// Flat shipping fee charged at or below the threshold.
    pub shipping_fee: Decimal,
}

impl Default for PricingConfig {
    /// US defaults: 8% tax, free shipping on subtotals over $50.00,
    /// otherwise a flat $9.99.
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            shipping_threshold: Decimal::new(50, 0),
            shipping_fee: Decimal::new(999, 2),
        }
    }
}
