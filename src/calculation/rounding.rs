//! Currency rounding.
//!
//! All stored amounts carry exactly [`CURRENCY_SCALE`] fractional digits.
//! Rounding is half-up (midpoint away from zero) everywhere.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for every monetary amount.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount half-up to [`CURRENCY_SCALE`] digits and pads it to that scale.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round_currency(Decimal::from(1000)).to_string(), "1000.00");
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(round_currency(dec("0.125")).to_string(), "0.13");
        assert_eq!(round_currency(dec("0.135")).to_string(), "0.14");
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_currency(dec("0.1249")).to_string(), "0.12");
    }

    #[test]
    fn test_negative_midpoint_rounds_away_from_zero() {
        assert_eq!(round_currency(dec("-0.125")).to_string(), "-0.13");
    }

    #[test]
    fn test_integer_is_padded_to_two_digits() {
        assert_eq!(round_currency(dec("50")).to_string(), "50.00");
        assert_eq!(round_currency(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_already_scaled_amount_is_unchanged() {
        assert_eq!(round_currency(dec("1234.56")).to_string(), "1234.56");
    }
}
