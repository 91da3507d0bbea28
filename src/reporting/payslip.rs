//! Single-employee payslip lookup.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayrollItemView;

use super::PayrollReports;

impl PayrollReports {
    /// Returns one employee's pay line for the period, with their name attached.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmployeeNotFound`] if the employee is not in the directory.
    /// - [`EngineError::PeriodNotFound`] if no run exists for the period.
    /// - [`EngineError::ItemNotFound`] if the run holds no item for the
    ///   employee, e.g. because it has not been processed yet.
    pub async fn my_slip(
        &self,
        year: i32,
        month: u32,
        employee_id: &str,
    ) -> EngineResult<PayrollItemView> {
        let employee = self.directory.get_employee(employee_id).await?.ok_or_else(|| {
            EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            }
        })?;

        let run = self.run_for(year, month).await?;
        let item = self
            .items
            .find(run.id, employee_id)
            .await?
            .ok_or_else(|| EngineError::ItemNotFound {
                employee_id: employee_id.to_string(),
                period: run.period,
            })?;

        debug!(run_id = %run.id, %employee_id, "Payslip found");
        Ok(PayrollItemView::new(item, Some(&employee)))
    }
}
