//! The payroll engine: run lifecycle and the calculation pass.
//!
//! Runs move `DRAFT -> PROCESSED -> LOCKED` and never backwards. The engine is
//! the only writer of payroll items. Process, lock and delete on a run are
//! serialized through that run's transition guard, so a run cannot be locked
//! or deleted while a calculation pass is writing its items. Different runs do
//! not wait for each other.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use payroll_engine::engine::PayrollEngine;
//! use payroll_engine::models::{Employee, RunStatus};
//! use payroll_engine::store::{InMemoryEmployeeDirectory, InMemoryItemStore, InMemoryRunStore};
//! use rust_decimal::Decimal;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let directory = InMemoryEmployeeDirectory::with_employees(vec![Employee {
//!     id: "emp_001".to_string(),
//!     first_name: Some("John".to_string()),
//!     last_name: Some("Doe".to_string()),
//!     department: Some("ENG".to_string()),
//!     base_salary: Some(Decimal::from(1000)),
//! }]);
//! let engine = PayrollEngine::new(
//!     Arc::new(InMemoryRunStore::new()),
//!     Arc::new(InMemoryItemStore::new()),
//!     Arc::new(directory),
//!     Default::default(),
//! );
//!
//! let run = engine.create_run(2025, 1).await.unwrap();
//! let run = engine.process_run(run.id).await.unwrap();
//! assert_eq!(run.status, RunStatus::Processed);
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_pay;
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, PayrollItem, PayrollItemView, PayrollRun, RunStatus};
use crate::store::{SharedDirectory, SharedItemStore, SharedRunStore};

/// Result of one calculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    /// The run after the pass, in [`RunStatus::Processed`].
    pub run: PayrollRun,
    /// Number of items written by this pass.
    pub created: usize,
    /// Number of employees that already had an item.
    pub skipped: usize,
}

/// Orchestrates run creation, the calculation pass, locking and deletion.
pub struct PayrollEngine {
    runs: SharedRunStore,
    items: SharedItemStore,
    directory: SharedDirectory,
    rules: PayrollRules,
    transitions: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl PayrollEngine {
    /// Creates an engine over the given stores and pay rules.
    pub fn new(
        runs: SharedRunStore,
        items: SharedItemStore,
        directory: SharedDirectory,
        rules: PayrollRules,
    ) -> Self {
        Self {
            runs,
            items,
            directory,
            rules,
            transitions: Mutex::new(HashMap::new()),
        }
    }

    /// Waits for the run's transition guard.
    async fn lock_transitions(&self, run_id: Uuid) -> OwnedMutexGuard<()> {
        let guard = {
            let mut guards = self.transitions.lock().await;
            Arc::clone(guards.entry(run_id).or_default())
        };
        guard.lock_owned().await
    }

    /// Takes the run's transition guard and loads the run under it.
    ///
    /// The guard entry is dropped again when the run does not exist.
    async fn guarded_run(
        &self,
        run_id: Uuid,
    ) -> EngineResult<(OwnedMutexGuard<()>, PayrollRun)> {
        let guard = self.lock_transitions(run_id).await;
        match self.get_run(run_id).await {
            Ok(run) => Ok((guard, run)),
            Err(err) => {
                self.transitions.lock().await.remove(&run_id);
                Err(err)
            }
        }
    }

    /// Creates a DRAFT run for the period.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriod`] for an out-of-range year or month.
    /// - [`EngineError::RunExists`] if the period already has a run.
    pub async fn create_run(&self, year: i32, month: u32) -> EngineResult<PayrollRun> {
        let period = PayPeriod::new(year, month)?;
        match self.runs.insert(PayrollRun::draft(period)).await {
            Ok(run) => {
                info!(run_id = %run.id, %period, "Payroll run created");
                Ok(run)
            }
            Err(err) => {
                warn!(%period, error = %err, "Payroll run creation rejected");
                Err(err)
            }
        }
    }

    /// Returns one run.
    pub async fn get_run(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        self.runs
            .get(run_id)
            .await?
            .ok_or(EngineError::RunNotFound { run_id })
    }

    /// Returns all runs, newest period first.
    pub async fn list_runs(&self) -> EngineResult<Vec<PayrollRun>> {
        self.runs.list().await
    }

    /// Runs the calculation pass and returns the run in PROCESSED.
    ///
    /// See [`PayrollEngine::process_run_detailed`].
    pub async fn process_run(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        Ok(self.process_run_detailed(run_id).await?.run)
    }

    /// Runs the calculation pass over the whole employee directory.
    ///
    /// Employees that already have an item in the run are skipped; their items
    /// are neither duplicated nor recomputed. All new items are written in one
    /// batch before the status moves to PROCESSED, so a failed pass leaves the
    /// status untouched.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RunNotFound`] if the run does not exist.
    /// - [`EngineError::RunLocked`] if the run is LOCKED.
    pub async fn process_run_detailed(&self, run_id: Uuid) -> EngineResult<ProcessOutcome> {
        let (_guard, run) = self.guarded_run(run_id).await?;
        if run.is_locked() {
            warn!(%run_id, period = %run.period, "Refusing to process locked run");
            return Err(EngineError::RunLocked { run_id });
        }

        let employees = self.directory.list_employees().await?;
        let candidates = self.missing_items(&run, &employees).await?;
        let already_present = employees.len() - candidates.len();
        debug!(
            %run_id,
            employees = employees.len(),
            candidates = candidates.len(),
            "Calculated pay lines"
        );

        let outcome = self.items.insert_missing(run_id, candidates).await?;
        let run = self.runs.advance_status(run_id, RunStatus::Processed).await?;

        let created = outcome.inserted.len();
        let skipped = already_present + outcome.skipped;
        info!(
            %run_id,
            period = %run.period,
            created,
            skipped,
            "Payroll run processed"
        );

        Ok(ProcessOutcome {
            run,
            created,
            skipped,
        })
    }

    /// Computes items for the employees the run does not cover yet.
    async fn missing_items(
        &self,
        run: &PayrollRun,
        employees: &[Employee],
    ) -> EngineResult<Vec<PayrollItem>> {
        let existing = self.items.list_by_run(run.id).await?;
        let covered: HashSet<&str> =
            existing.iter().map(|item| item.employee_id.as_str()).collect();

        Ok(employees
            .iter()
            .filter(|employee| !covered.contains(employee.id.as_str()))
            .map(|employee| {
                calculate_pay(employee, self.rules.deduction_rate).into_item(run.id, &employee.id)
            })
            .collect())
    }

    /// Moves the run to LOCKED, whatever its current status.
    ///
    /// Locking an already locked run succeeds and changes nothing.
    pub async fn lock_run(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        let (_guard, run) = self.guarded_run(run_id).await?;
        let previous = run.status;
        let run = self.runs.advance_status(run_id, RunStatus::Locked).await?;
        info!(%run_id, period = %run.period, from = %previous, "Payroll run locked");
        Ok(run)
    }

    /// Deletes a DRAFT run and all of its items.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RunNotFound`] if the run does not exist.
    /// - [`EngineError::RunNotDraft`] if the run has left DRAFT.
    pub async fn delete_run(&self, run_id: Uuid) -> EngineResult<()> {
        let (_guard, run) = self.guarded_run(run_id).await?;
        if run.status != RunStatus::Draft {
            warn!(%run_id, status = %run.status, "Refusing to delete non-draft run");
            return Err(EngineError::RunNotDraft {
                run_id,
                status: run.status,
            });
        }

        let removed_items = self.items.delete_by_run(run_id).await?;
        self.runs.delete(run_id).await?;
        self.transitions.lock().await.remove(&run_id);
        info!(%run_id, period = %run.period, removed_items, "Payroll run deleted");
        Ok(())
    }

    /// Returns the run's items joined with employee names, in insertion order.
    ///
    /// The directory is read once. Items whose employee has left the directory
    /// carry an empty name.
    pub async fn list_items(&self, run_id: Uuid) -> EngineResult<Vec<PayrollItemView>> {
        self.get_run(run_id).await?;

        let items = self.items.list_by_run(run_id).await?;
        let employees = self.directory.list_employees().await?;
        let by_id: HashMap<&str, &Employee> =
            employees.iter().map(|e| (e.id.as_str(), e)).collect();

        Ok(items
            .into_iter()
            .map(|item| {
                let employee = by_id.get(item.employee_id.as_str()).copied();
                PayrollItemView::new(item, employee)
            })
            .collect())
    }
}
