//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done in `Decimal`, then converted to `f64`
//! for storage/serialization, rounded to 2 decimal places half-up.

use rust_decimal::prelude::*;
use shared::models::CartLine;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 monetary value to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round a monetary amount to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Line total: snapshot unit price times quantity
pub fn line_total(line: &CartLine) -> Decimal {
    to_decimal(line.unit_price) * Decimal::from(line.quantity)
}

/// Cart subtotal: sum of line totals
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(line_total).sum()
}
