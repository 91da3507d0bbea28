//! Summary and department-cost rollups.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DepartmentCostRow, Employee, PayPeriod, PayTotals, PayrollItem, PayrollRun, PayrollSummary,
};
use crate::store::{SharedDirectory, SharedItemStore, SharedRunStore};

/// Department name used when an employee has no usable department.
pub const UNKNOWN_DEPARTMENT: &str = "UNKNOWN";

/// Returns the department to group by.
///
/// A missing, empty or whitespace-only department becomes
/// [`UNKNOWN_DEPARTMENT`]; anything else is used verbatim.
///
/// # Example
///
/// ```
/// use payroll_engine::reporting::normalize_department;
///
/// assert_eq!(normalize_department(Some("ENG")), "ENG");
/// assert_eq!(normalize_department(Some("  ")), "UNKNOWN");
/// assert_eq!(normalize_department(None), "UNKNOWN");
/// ```
pub fn normalize_department(department: Option<&str>) -> &str {
    match department {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNKNOWN_DEPARTMENT,
    }
}

/// Groups items by department, in order of first appearance.
///
/// `employees` resolves each item's employee; items whose employee is not in
/// the map fall into [`UNKNOWN_DEPARTMENT`].
///
/// # Errors
///
/// [`EngineError::AmountOverflow`] if a department total leaves the decimal
/// range.
pub fn group_by_department(
    items: &[PayrollItem],
    employees: &HashMap<&str, &Employee>,
) -> EngineResult<Vec<DepartmentCostRow>> {
    let mut rows: Vec<DepartmentCostRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let department = normalize_department(
            employees
                .get(item.employee_id.as_str())
                .and_then(|employee| employee.department.as_deref()),
        );

        let position = *index.entry(department).or_insert_with(|| {
            rows.push(DepartmentCostRow {
                department: department.to_string(),
                totals: PayTotals::default(),
            });
            rows.len() - 1
        });
        rows[position].totals.add_item(item)?;
    }

    Ok(rows)
}

/// Read-only reports over the items of a run.
///
/// Reports are rebuilt from the current items on every call and may run
/// concurrently with a calculation pass; they see the items of a pass either
/// fully or not at all.
pub struct PayrollReports {
    pub(super) runs: SharedRunStore,
    pub(super) items: SharedItemStore,
    pub(super) directory: SharedDirectory,
}

impl PayrollReports {
    /// Creates the aggregator over the given stores.
    pub fn new(runs: SharedRunStore, items: SharedItemStore, directory: SharedDirectory) -> Self {
        Self {
            runs,
            items,
            directory,
        }
    }

    /// Returns the run for the period.
    pub(super) async fn run_for(&self, year: i32, month: u32) -> EngineResult<PayrollRun> {
        let period = PayPeriod::new(year, month)?;
        self.runs
            .find_by_period(period)
            .await?
            .ok_or(EngineError::PeriodNotFound { period })
    }

    /// Returns the employee count and exact totals for the period's run.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriod`] for an out-of-range year or month.
    /// - [`EngineError::PeriodNotFound`] if no run exists for the period.
    /// - [`EngineError::AmountOverflow`] if a total leaves the decimal range.
    pub async fn payroll_summary(&self, year: i32, month: u32) -> EngineResult<PayrollSummary> {
        let run = self.run_for(year, month).await?;
        let items = self.items.list_by_run(run.id).await?;

        let summary = PayrollSummary::from_items(run.period, &items)?;
        debug!(
            run_id = %run.id,
            period = %run.period,
            employee_count = summary.employee_count,
            total_net = %summary.totals.total_net,
            "Built payroll summary"
        );
        Ok(summary)
    }

    /// Returns per-department totals for the period's run.
    ///
    /// Rows appear in the order in which each department is first seen among
    /// the run's items; they are not sorted.
    ///
    /// # Errors
    ///
    /// Same as [`PayrollReports::payroll_summary`].
    pub async fn department_cost(
        &self,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<DepartmentCostRow>> {
        let run = self.run_for(year, month).await?;
        let items = self.items.list_by_run(run.id).await?;
        let employees = self.directory.list_employees().await?;
        let by_id: HashMap<&str, &Employee> =
            employees.iter().map(|e| (e.id.as_str(), e)).collect();

        let rows = group_by_department(&items, &by_id)?;
        debug!(
            run_id = %run.id,
            period = %run.period,
            departments = rows.len(),
            "Built department cost report"
        );
        Ok(rows)
    }
}
