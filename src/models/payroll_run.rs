//! Payroll run model and its lifecycle states.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// Lifecycle state of a payroll run.
///
/// States are ordered `Draft < Processed < Locked`; a run never moves to a
/// lower state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Created, no calculation pass has completed yet.
    Draft,
    /// At least one calculation pass has completed.
    Processed,
    /// Frozen; no further calculation passes are allowed.
    Locked,
}

impl RunStatus {
    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Draft => "DRAFT",
            RunStatus::Processed => "PROCESSED",
            RunStatus::Locked => "LOCKED",
        }
    }

    /// Returns true if moving to `next` does not go backwards.
    ///
    /// Staying in the same state counts as allowed.
    pub fn can_advance_to(self, next: RunStatus) -> bool {
        next >= self
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One payroll cycle for a given year and month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayPeriod, PayrollRun, RunStatus};
///
/// let run = PayrollRun::draft(PayPeriod::new(2025, 1).unwrap());
/// assert_eq!(run.status, RunStatus::Draft);
/// assert_eq!(run.period.year, 2025);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Opaque run identifier.
    pub id: Uuid,
    /// The month this run pays for.
    #[serde(flatten)]
    pub period: PayPeriod,
    /// Current lifecycle state.
    pub status: RunStatus,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
}

impl PayrollRun {
    /// Creates a new run in [`RunStatus::Draft`] with a fresh id.
    pub fn draft(period: PayPeriod) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            status: RunStatus::Draft,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the run is locked.
    pub fn is_locked(&self) -> bool {
        self.status == RunStatus::Locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_run_has_draft_status() {
        let run = PayrollRun::draft(PayPeriod::new(2025, 1).unwrap());
        assert_eq!(run.status, RunStatus::Draft);
        assert!(!run.is_locked());
    }

    #[test]
    fn test_draft_runs_get_distinct_ids() {
        let period = PayPeriod::new(2025, 1).unwrap();
        assert_ne!(PayrollRun::draft(period).id, PayrollRun::draft(period).id);
    }

    #[test]
    fn test_status_never_advances_backwards() {
        assert!(RunStatus::Draft.can_advance_to(RunStatus::Processed));
        assert!(RunStatus::Draft.can_advance_to(RunStatus::Locked));
        assert!(RunStatus::Processed.can_advance_to(RunStatus::Processed));
        assert!(RunStatus::Processed.can_advance_to(RunStatus::Locked));
        assert!(RunStatus::Locked.can_advance_to(RunStatus::Locked));
        assert!(!RunStatus::Locked.can_advance_to(RunStatus::Processed));
        assert!(!RunStatus::Processed.can_advance_to(RunStatus::Draft));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RunStatus::Draft).unwrap(),
            "\"DRAFT\""
        );
        assert_eq!(
            serde_json::to_string(&RunStatus::Processed).unwrap(),
            "\"PROCESSED\""
        );
        assert_eq!(
            serde_json::to_string(&RunStatus::Locked).unwrap(),
            "\"LOCKED\""
        );
    }

    #[test]
    fn test_serialize_run_flattens_period() {
        let run = PayrollRun::draft(PayPeriod::new(2025, 7).unwrap());
        let json: serde_json::Value = serde_json::to_value(&run).unwrap();
        assert_eq!(json["year"], 2025);
        assert_eq!(json["month"], 7);
        assert_eq!(json["status"], "DRAFT");
        assert!(json.get("period").is_none());
        assert!(json["created_at"].is_string());
    }
}
