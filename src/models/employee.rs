//! Employee snapshot read from the directory.
//!
//! The engine never writes employees; it reads a fully materialized list at
//! the moment a run is processed or a report is built.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A read-only view of one employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name, if recorded.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name, if recorded.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Department name as recorded; may be absent or blank.
    #[serde(default)]
    pub department: Option<String>,
    /// Monthly base salary; absent means zero.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
}

impl Employee {
    /// Returns first and last name joined by one space, trimmed.
    ///
    /// Missing parts are treated as empty strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: Some("Jane".to_string()),
    ///     last_name: None,
    ///     department: None,
    ///     base_salary: None,
    /// };
    /// assert_eq!(employee.display_name(), "Jane");
    /// ```
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", first, last).trim().to_string()
    }

    /// Returns the base salary, or zero when none is recorded.
    pub fn base_salary_or_zero(&self) -> Decimal {
        self.base_salary.unwrap_or(Decimal::ZERO)
    }
}
