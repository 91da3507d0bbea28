//! Flat-rate deduction rule.
//!
//! Deductions are a single flat percentage of the basic salary. There are no
//! brackets, caps or exemptions.

use rust_decimal::Decimal;

use super::rounding::round_currency;

/// Returns the default deduction rate, 5%.
pub fn default_deduction_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Calculates the deduction for a basic salary at the given rate.
///
/// The product is rounded half-up to two fractional digits.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_deductions, default_deduction_rate};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let deductions = calculate_deductions(Decimal::from(1000), default_deduction_rate());
/// assert_eq!(deductions, Decimal::from_str("50.00").unwrap());
/// ```
pub fn calculate_deductions(basic: Decimal, rate: Decimal) -> Decimal {
    round_currency(basic * rate)
}
