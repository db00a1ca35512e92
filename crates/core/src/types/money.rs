//! Monetary rounding and display formatting.
//!
//! All monetary math in Bamazon uses [`rust_decimal::Decimal`], never
//! floats. Intermediate totals are carried at full precision; rounding to
//! cents happens only when a value crosses a display or snapshot boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for displayed/captured currency amounts.
pub const DISPLAY_SCALE: u32 = 2;

/// Round a monetary amount to cents, half away from zero.
///
/// The result always carries exactly two decimal places, so zero
/// serializes as `"0.00"` rather than `"0"`.
#[must_use]
pub fn round_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

/// Format a monetary amount as a dollar string (e.g., `$19.99`).
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", round_display(amount))
}
