//! Storage ports used by the engine and the reporting aggregator.
//!
//! Implementations must make the uniqueness checks atomic: a period can hold
//! at most one run and a run at most one item per employee, even when several
//! callers write at the same time.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Employee, PayPeriod, PayrollItem, PayrollRun, RunStatus};

/// Result of a batch item insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Items that were written, in input order.
    pub inserted: Vec<PayrollItem>,
    /// Number of items skipped because their (run, employee) pair already existed.
    pub skipped: usize,
}

/// Holds payroll runs keyed by id and by period.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Inserts a new run.
    ///
    /// Fails with `RunExists` if a run already holds the period.
    async fn insert(&self, run: PayrollRun) -> EngineResult<PayrollRun>;

    /// Returns the run with the given id.
    async fn get(&self, run_id: Uuid) -> EngineResult<Option<PayrollRun>>;

    /// Returns the run for the given period.
    async fn find_by_period(&self, period: PayPeriod) -> EngineResult<Option<PayrollRun>>;

    /// Returns all runs, newest period first.
    async fn list(&self) -> EngineResult<Vec<PayrollRun>>;

    /// Moves the run to `status`.
    ///
    /// Fails with `RunNotFound` for an unknown id and with `InvalidTransition`
    /// when `status` is lower than the current one.
    async fn advance_status(&self, run_id: Uuid, status: RunStatus) -> EngineResult<PayrollRun>;

    /// Removes the run. Fails with `RunNotFound` for an unknown id.
    async fn delete(&self, run_id: Uuid) -> EngineResult<()>;
}

/// Holds payroll items grouped by run.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Inserts one item.
    ///
    /// Fails with `DuplicateItem` if the (run, employee) pair already exists.
    async fn insert(&self, item: PayrollItem) -> EngineResult<PayrollItem>;

    /// Inserts every item whose (run, employee) pair is not yet present.
    ///
    /// The batch is applied as one unit: concurrent readers see either none or
    /// all of the inserted items. Every item must belong to `run_id`. The run's
    /// status is not checked here; callers serialize the batch against status
    /// changes of the run.
    async fn insert_missing(
        &self,
        run_id: Uuid,
        items: Vec<PayrollItem>,
    ) -> EngineResult<InsertOutcome>;

    /// Returns the run's items in insertion order.
    async fn list_by_run(&self, run_id: Uuid) -> EngineResult<Vec<PayrollItem>>;

    /// Returns the item for one employee within a run.
    async fn find(&self, run_id: Uuid, employee_id: &str) -> EngineResult<Option<PayrollItem>>;

    /// Removes all items of the run and returns how many were removed.
    async fn delete_by_run(&self, run_id: Uuid) -> EngineResult<usize>;
}

/// Read-only access to the employee directory.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Returns every employee, in directory order.
    async fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns one employee by id.
    async fn get_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;
}

/// Shared handle to a run store.
pub type SharedRunStore = Arc<dyn RunStore>;
/// Shared handle to an item store.
pub type SharedItemStore = Arc<dyn ItemStore>;
/// Shared handle to an employee directory.
pub type SharedDirectory = Arc<dyn EmployeeDirectory>;
