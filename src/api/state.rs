//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::engine::PayrollEngine;
use crate::reporting::PayrollReports;
use crate::store::{InMemoryEmployeeDirectory, InMemoryItemStore, InMemoryRunStore};

/// Shared application state.
///
/// Holds the engine and the reporting aggregator, which share one set of
/// stores.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<PayrollEngine>,
    reports: Arc<PayrollReports>,
}

impl AppState {
    /// Creates the state from an engine and an aggregator.
    pub fn new(engine: PayrollEngine, reports: PayrollReports) -> Self {
        Self {
            engine: Arc::new(engine),
            reports: Arc::new(reports),
        }
    }

    /// Builds in-memory stores, seeds the directory from the configuration
    /// and wires the engine and aggregator over them.
    pub fn in_memory(config: &ConfigLoader) -> Self {
        let runs = Arc::new(InMemoryRunStore::new());
        let items = Arc::new(InMemoryItemStore::new());
        let directory = Arc::new(InMemoryEmployeeDirectory::with_employees(
            config.employees().to_vec(),
        ));

        let engine = PayrollEngine::new(
            runs.clone(),
            items.clone(),
            directory.clone(),
            config.rules().clone(),
        );
        let reports = PayrollReports::new(runs, items, directory);
        Self::new(engine, reports)
    }

    /// Returns the payroll engine.
    pub fn engine(&self) -> &PayrollEngine {
        &self.engine
    }

    /// Returns the reporting aggregator.
    pub fn reports(&self) -> &PayrollReports {
        &self.reports
    }
}
