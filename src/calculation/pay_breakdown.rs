//! Per-employee pay calculation.
//!
//! This is the pure part of the calculation pass: it turns one employee
//! snapshot into the four monetary amounts of a pay line. Persistence and the
//! idempotent skip live in the engine.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Employee, PayrollItem};

use super::deductions::calculate_deductions;
use super::rounding::round_currency;

/// The amounts computed for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayBreakdown {
    /// Basic salary, rounded to currency scale.
    pub basic: Decimal,
    /// Flat-rate deductions.
    pub deductions: Decimal,
    /// Bonus; always zero until a bonus rule exists.
    pub bonus: Decimal,
    /// `basic + bonus - deductions`.
    pub net: Decimal,
}

impl PayBreakdown {
    /// Turns the breakdown into a new item for `run_id`.
    pub fn into_item(self, run_id: Uuid, employee_id: impl Into<String>) -> PayrollItem {
        PayrollItem {
            id: Uuid::new_v4(),
            run_id,
            employee_id: employee_id.into(),
            basic_salary: self.basic,
            deductions: self.deductions,
            bonus: self.bonus,
            net_salary: self.net,
        }
    }
}

/// Calculates the pay line for one employee.
///
/// A missing base salary counts as zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_pay, default_deduction_rate};
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     first_name: Some("John".to_string()),
///     last_name: Some("Doe".to_string()),
///     department: Some("ENG".to_string()),
///     base_salary: Some(Decimal::from(1000)),
/// };
///
/// let pay = calculate_pay(&employee, default_deduction_rate());
/// assert_eq!(pay.deductions.to_string(), "50.00");
/// assert_eq!(pay.net.to_string(), "950.00");
/// ```
pub fn calculate_pay(employee: &Employee, deduction_rate: Decimal) -> PayBreakdown {
    let basic = round_currency(employee.base_salary_or_zero());
    let deductions = calculate_deductions(basic, deduction_rate);
    let bonus = round_currency(Decimal::ZERO);
    let net = basic + bonus - deductions;

    PayBreakdown {
        basic,
        deductions,
        bonus,
        net,
    }
}
