//! In-memory implementations of the storage ports.
//!
//! Each store keeps its tables behind one `tokio::sync::RwLock`. Uniqueness
//! checks and the matching insert happen under the same write guard, which
//! makes them atomic with respect to concurrent callers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, PayrollItem, PayrollRun, RunStatus};

use super::ports::{EmployeeDirectory, InsertOutcome, ItemStore, RunStore};

#[derive(Debug, Default)]
struct RunTable {
    runs: HashMap<Uuid, PayrollRun>,
    by_period: HashMap<PayPeriod, Uuid>,
}

/// A thread-safe in-memory store for payroll runs.
///
/// Runs are indexed by id and by period; the period index is the uniqueness
/// constraint.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRunStore {
    table: Arc<RwLock<RunTable>>,
}

impl InMemoryRunStore {
    /// Creates a new, empty run store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn insert(&self, run: PayrollRun) -> EngineResult<PayrollRun> {
        let mut table = self.table.write().await;
        if table.by_period.contains_key(&run.period) {
            return Err(EngineError::RunExists { period: run.period });
        }
        table.by_period.insert(run.period, run.id);
        table.runs.insert(run.id, run.clone());
        Ok(run)
    }

    async fn get(&self, run_id: Uuid) -> EngineResult<Option<PayrollRun>> {
        let table = self.table.read().await;
        Ok(table.runs.get(&run_id).cloned())
    }

    async fn find_by_period(&self, period: PayPeriod) -> EngineResult<Option<PayrollRun>> {
        let table = self.table.read().await;
        Ok(table
            .by_period
            .get(&period)
            .and_then(|id| table.runs.get(id))
            .cloned())
    }

    async fn list(&self) -> EngineResult<Vec<PayrollRun>> {
        let table = self.table.read().await;
        let mut runs: Vec<PayrollRun> = table.runs.values().cloned().collect();
        runs.sort_by(|a, b| b.period.cmp(&a.period));
        Ok(runs)
    }

    async fn advance_status(&self, run_id: Uuid, status: RunStatus) -> EngineResult<PayrollRun> {
        let mut table = self.table.write().await;
        let run = table
            .runs
            .get_mut(&run_id)
            .ok_or(EngineError::RunNotFound { run_id })?;

        if !run.status.can_advance_to(status) {
            return Err(EngineError::InvalidTransition {
                run_id,
                from: run.status,
                to: status,
            });
        }

        run.status = status;
        Ok(run.clone())
    }

    async fn delete(&self, run_id: Uuid) -> EngineResult<()> {
        let mut table = self.table.write().await;
        let run = table
            .runs
            .remove(&run_id)
            .ok_or(EngineError::RunNotFound { run_id })?;
        table.by_period.remove(&run.period);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ItemTable {
    by_run: HashMap<Uuid, Vec<PayrollItem>>,
    keys: HashSet<(Uuid, String)>,
}

impl ItemTable {
    fn try_insert(&mut self, item: PayrollItem) -> EngineResult<()> {
        if !self.keys.insert((item.run_id, item.employee_id.clone())) {
            return Err(EngineError::DuplicateItem {
                run_id: item.run_id,
                employee_id: item.employee_id,
            });
        }
        self.by_run.entry(item.run_id).or_default().push(item);
        Ok(())
    }
}

/// A thread-safe in-memory store for payroll items.
///
/// Items are kept per run in insertion order. The (run, employee) key set is
/// the uniqueness constraint.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemStore {
    table: Arc<RwLock<ItemTable>>,
}

impl InMemoryItemStore {
    /// Creates a new, empty item store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn insert(&self, item: PayrollItem) -> EngineResult<PayrollItem> {
        let mut table = self.table.write().await;
        table.try_insert(item.clone())?;
        Ok(item)
    }

    async fn insert_missing(
        &self,
        run_id: Uuid,
        items: Vec<PayrollItem>,
    ) -> EngineResult<InsertOutcome> {
        if let Some(stray) = items.iter().find(|item| item.run_id != run_id) {
            return Err(EngineError::Storage {
                message: format!(
                    "item for employee '{}' belongs to run {}, not {}",
                    stray.employee_id, stray.run_id, run_id
                ),
            });
        }

        let mut table = self.table.write().await;
        let mut outcome = InsertOutcome::default();
        for item in items {
            match table.try_insert(item.clone()) {
                Ok(()) => outcome.inserted.push(item),
                Err(EngineError::DuplicateItem { employee_id, .. }) => {
                    debug!(%run_id, %employee_id, "Item already present, skipping");
                    outcome.skipped += 1;
                }
                Err(other) => return Err(other),
            }
        }
        Ok(outcome)
    }

    async fn list_by_run(&self, run_id: Uuid) -> EngineResult<Vec<PayrollItem>> {
        let table = self.table.read().await;
        Ok(table.by_run.get(&run_id).cloned().unwrap_or_default())
    }

    async fn find(&self, run_id: Uuid, employee_id: &str) -> EngineResult<Option<PayrollItem>> {
        let table = self.table.read().await;
        Ok(table
            .by_run
            .get(&run_id)
            .and_then(|items| items.iter().find(|item| item.employee_id == employee_id))
            .cloned())
    }

    async fn delete_by_run(&self, run_id: Uuid) -> EngineResult<usize> {
        let mut table = self.table.write().await;
        let removed = table.by_run.remove(&run_id).unwrap_or_default();
        for item in &removed {
            table.keys.remove(&(run_id, item.employee_id.clone()));
        }
        Ok(removed.len())
    }
}

/// A thread-safe in-memory employee directory.
///
/// Keeps employees in insertion order; that order is the order in which the
/// calculation pass visits them.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmployeeDirectory {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates a new, empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given employees.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(RwLock::new(employees)),
        }
    }

    /// Adds an employee, or replaces the one with the same id in place.
    pub async fn upsert(&self, employee: Employee) {
        let mut employees = self.employees.write().await;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => employees.push(employee),
        }
    }

    /// Removes an employee. Returns false if the id was unknown.
    pub async fn remove(&self, employee_id: &str) -> bool {
        let mut employees = self.employees.write().await;
        let before = employees.len();
        employees.retain(|e| e.id != employee_id);
        employees.len() != before
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn get_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.iter().find(|e| e.id == employee_id).cloned())
    }
}
