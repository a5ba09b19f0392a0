//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for amounts when no precision is configured.
pub const DEFAULT_PRECISION: u32 = 2;

/// Rounds a monetary amount half-up (midpoint away from zero) to `precision`
/// decimal places.
///
/// Calculations apply this once to their final result, never to
/// intermediate terms.
///
/// # Examples
///
/// ```
/// use benefit_ledger::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("74.074074").unwrap(), 2), Decimal::from_str("74.07").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap(), 2), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_money(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}
