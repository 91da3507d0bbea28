//! Reporting aggregator and payslip lookup.
//!
//! Everything here is read-only: reports are derived from the current items
//! of a run and never persisted.

mod aggregator;
mod payslip;

pub use aggregator::{PayrollReports, UNKNOWN_DEPARTMENT, group_by_department, normalize_department};
