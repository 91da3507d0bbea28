//! Error types for the payroll engine.
//!
//! Every operation returns [`EngineError`]. Callers that need to branch on the
//! failure category (HTTP status mapping, retries) use [`EngineError::kind`]
//! instead of matching individual variants.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{PayPeriod, RunStatus};

/// Machine-checkable category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A run, employee or item does not exist.
    NotFound,
    /// The operation collides with existing data or with the run's status.
    Conflict,
    /// The run is in a state that forbids the operation.
    InvalidState,
    /// An input value is out of range.
    InvalidArgument,
    /// Configuration could not be loaded.
    Config,
    /// The backing store failed.
    Internal,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
/// use payroll_engine::models::PayPeriod;
///
/// let period = PayPeriod::new(2025, 1).unwrap();
/// let error = EngineError::RunExists { period };
/// assert_eq!(error.to_string(), "Payroll run already exists for 2025-01");
/// assert_eq!(error.kind(), ErrorKind::Conflict);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No run exists with the given id.
    #[error("Payroll run not found: {run_id}")]
    RunNotFound {
        /// The id that was looked up.
        run_id: Uuid,
    },

    /// No run exists for the given period.
    #[error("Payroll run not found for {period}")]
    PeriodNotFound {
        /// The period that was looked up.
        period: PayPeriod,
    },

    /// The employee is not present in the directory.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was looked up.
        employee_id: String,
    },

    /// The run exists but holds no item for the employee.
    #[error("No payroll item for employee '{employee_id}' in the run for {period}")]
    ItemNotFound {
        /// The employee id that was looked up.
        employee_id: String,
        /// The period of the run.
        period: PayPeriod,
    },

    /// A run already exists for the period.
    #[error("Payroll run already exists for {period}")]
    RunExists {
        /// The period that is already taken.
        period: PayPeriod,
    },

    /// Deletion was attempted on a run that has left DRAFT.
    #[error("Only DRAFT runs can be deleted; run {run_id} is {status}")]
    RunNotDraft {
        /// The run that was targeted.
        run_id: Uuid,
        /// The run's current status.
        status: RunStatus,
    },

    /// An item already exists for the (run, employee) pair.
    #[error("Payroll item already exists for employee '{employee_id}' in run {run_id}")]
    DuplicateItem {
        /// The run the item belongs to.
        run_id: Uuid,
        /// The employee the item belongs to.
        employee_id: String,
    },

    /// Processing was attempted on a locked run.
    #[error("Run {run_id} is locked and cannot be processed")]
    RunLocked {
        /// The locked run.
        run_id: Uuid,
    },

    /// A status change would move the run backwards.
    #[error("Run {run_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The run that was targeted.
        run_id: Uuid,
        /// The run's current status.
        from: RunStatus,
        /// The requested status.
        to: RunStatus,
    },

    /// A year or month is outside the accepted range.
    #[error("Invalid period {field} '{value}': {message}")]
    InvalidPeriod {
        /// Either `year` or `month`.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Why the value was rejected.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A report total does not fit in a decimal.
    #[error("Total {field} overflowed while summing payroll items")]
    AmountOverflow {
        /// The total that overflowed, e.g. `total_basic`.
        field: &'static str,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::RunNotFound { .. }
            | EngineError::PeriodNotFound { .. }
            | EngineError::EmployeeNotFound { .. }
            | EngineError::ItemNotFound { .. } => ErrorKind::NotFound,
            EngineError::RunExists { .. }
            | EngineError::RunNotDraft { .. }
            | EngineError::DuplicateItem { .. } => ErrorKind::Conflict,
            EngineError::RunLocked { .. } | EngineError::InvalidTransition { .. } => {
                ErrorKind::InvalidState
            }
            EngineError::InvalidPeriod { .. } => ErrorKind::InvalidArgument,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Config
            }
            EngineError::AmountOverflow { .. } | EngineError::Storage { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
