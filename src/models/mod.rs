//! Core data models for the payroll engine.
//!
//! This module contains the run, item, employee and report types shared by
//! the engine, the stores and the reporting aggregator.

mod employee;
mod pay_period;
mod payroll_item;
mod payroll_run;
mod report;

pub use employee::Employee;
pub use pay_period::{MAX_YEAR, MIN_YEAR, PayPeriod};
pub use payroll_item::{PayrollItem, PayrollItemView};
pub use payroll_run::{PayrollRun, RunStatus};
pub use report::{DepartmentCostRow, PayTotals, PayrollSummary};
