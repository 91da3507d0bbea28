//! Pay period model.
//!
//! A [`PayPeriod`] identifies one monthly payroll cycle. At most one run may
//! exist per period.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Earliest accepted payroll year.
pub const MIN_YEAR: i32 = 2000;
/// Latest accepted payroll year.
pub const MAX_YEAR: i32 = 3000;

/// A calendar month for which payroll is run.
///
/// Construct through [`PayPeriod::new`], which rejects out-of-range values.
/// Periods order chronologically.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
///
/// let period = PayPeriod::new(2025, 1).unwrap();
/// assert_eq!(period.to_string(), "2025-01");
/// assert!(PayPeriod::new(2025, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The payroll year (2000–3000).
    pub year: i32,
    /// The payroll month (1–12).
    pub month: u32,
}

impl PayPeriod {
    /// Creates a period after validating the year and month ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when the year is outside
    /// `[2000, 3000]` or the month is outside `[1, 12]`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EngineError::InvalidPeriod {
                field: "year",
                value: i64::from(year),
                message: format!("must be between {} and {}", MIN_YEAR, MAX_YEAR),
            });
        }
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                field: "month",
                value: i64::from(month),
                message: "must be between 1 and 12".to_string(),
            });
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
