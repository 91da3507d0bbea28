//! Payroll item models.
//!
//! A [`PayrollItem`] is one employee's computed pay line within a run. Items
//! are written once by the calculation pass and never updated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Employee;

/// One employee's computed pay line within a run.
///
/// At most one item exists per (run, employee) pair, and
/// `net_salary == basic_salary + bonus - deductions` always holds.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollItem;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let item = PayrollItem {
///     id: Uuid::new_v4(),
///     run_id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     basic_salary: Decimal::new(100000, 2),
///     deductions: Decimal::new(5000, 2),
///     bonus: Decimal::ZERO,
///     net_salary: Decimal::new(95000, 2),
/// };
/// assert!(item.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollItem {
    /// Opaque item identifier.
    pub id: Uuid,
    /// The run this item belongs to.
    pub run_id: Uuid,
    /// The employee this item pays.
    pub employee_id: String,
    /// Base salary at processing time.
    pub basic_salary: Decimal,
    /// Total deductions.
    pub deductions: Decimal,
    /// Total bonus.
    pub bonus: Decimal,
    /// Amount paid out.
    pub net_salary: Decimal,
}

impl PayrollItem {
    /// Returns true if the net salary equals basic plus bonus minus deductions.
    pub fn is_balanced(&self) -> bool {
        self.net_salary == self.basic_salary + self.bonus - self.deductions
    }
}

/// An item joined with the employee's display name.
///
/// This is the shape returned by item listings and payslip lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollItemView {
    /// The item id.
    pub id: Uuid,
    /// The employee this item pays.
    pub employee_id: String,
    /// The employee's display name; empty when the employee is unknown.
    pub employee_name: String,
    /// Base salary at processing time.
    pub basic_salary: Decimal,
    /// Total deductions.
    pub deductions: Decimal,
    /// Total bonus.
    pub bonus: Decimal,
    /// Amount paid out.
    pub net_salary: Decimal,
}

impl PayrollItemView {
    /// Builds the view from an item and, if still in the directory, its employee.
    pub fn new(item: PayrollItem, employee: Option<&Employee>) -> Self {
        Self {
            id: item.id,
            employee_name: employee.map(Employee::display_name).unwrap_or_default(),
            employee_id: item.employee_id,
            basic_salary: item.basic_salary,
            deductions: item.deductions,
            bonus: item.bonus,
            net_salary: item.net_salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_item() -> PayrollItem {
        PayrollItem {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            employee_id: "emp_002".to_string(),
            basic_salary: dec("100"),
            deductions: dec("5"),
            bonus: Decimal::ZERO,
            net_salary: dec("95"),
        }
    }

    #[test]
    fn test_balanced_item() {
        assert!(create_test_item().is_balanced());
    }

    #[test]
    fn test_unbalanced_item_is_detected() {
        let mut item = create_test_item();
        item.net_salary = dec("96");
        assert!(!item.is_balanced());
    }

    #[test]
    fn test_view_attaches_display_name() {
        let employee = Employee {
            id: "emp_002".to_string(),
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            department: None,
            base_salary: Some(dec("100")),
        };
        let item = create_test_item();
        let view = PayrollItemView::new(item.clone(), Some(&employee));

        assert_eq!(view.id, item.id);
        assert_eq!(view.employee_id, "emp_002");
        assert_eq!(view.employee_name, "A B");
        assert_eq!(view.net_salary, dec("95"));
    }

    #[test]
    fn test_view_without_employee_has_empty_name() {
        let view = PayrollItemView::new(create_test_item(), None);
        assert_eq!(view.employee_name, "");
    }

    #[test]
    fn test_serialize_item_money_as_strings() {
        let json = serde_json::to_value(create_test_item()).unwrap();
        assert_eq!(json["basic_salary"], "100");
        assert_eq!(json["net_salary"], "95");
    }
}
