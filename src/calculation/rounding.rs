//! Monetary rounding policy.
//!
//! All reported amounts are rounded exactly once, at the end of each
//! per-type computation, to two decimal places using half-up rounding
//! (midpoint away from zero). Intermediate band arithmetic stays exact so
//! rounding drift cannot compound across bands.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for reported monetary amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount per the engine-wide policy.
///
/// # Example
///
/// ```
/// use statutory_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("1234.565").unwrap();
/// assert_eq!(round_money(amount), Decimal::from_str("1234.57").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(round_money(dec("0.005")), dec("0.01"));
        assert_eq!(round_money(dec("0.004")), dec("0.00"));
        assert_eq!(round_money(dec("2.675")), dec("2.68"));
    }

    #[test]
    fn test_negative_amounts_round_away_from_zero() {
        assert_eq!(round_money(dec("-0.005")), dec("-0.01"));
        assert_eq!(round_money(dec("-1.234")), dec("-1.23"));
    }

    #[test]
    fn test_exact_amounts_unchanged() {
        assert_eq!(round_money(dec("7000")), dec("7000"));
        assert_eq!(round_money(dec("123.45")), dec("123.45"));
    }
}
