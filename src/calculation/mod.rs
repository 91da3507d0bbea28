//! Calculation logic for the payroll engine.
//!
//! This module contains the pure pay rules: currency rounding, the flat-rate
//! deduction and the per-employee pay breakdown used by the calculation pass.

mod deductions;
mod pay_breakdown;
mod rounding;

pub use deductions::{calculate_deductions, default_deduction_rate};
pub use pay_breakdown::{PayBreakdown, calculate_pay};
pub use rounding::{CURRENCY_SCALE, round_currency};
