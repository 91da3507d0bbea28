//! Request types for the payroll API.
//!
//! Year and month arrive as plain integers and are range-checked here, before
//! they reach the engine.

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::models::{MAX_YEAR, MIN_YEAR, PayPeriod};

use super::response::ApiErrorResponse;

/// Header carrying the caller's role.
pub const ROLE_HEADER: &str = "x-role";
/// Header carrying the caller's employee id.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

/// Request body for `POST /api/v1/payroll/runs`, and the query of the report
/// endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The payroll year.
    pub year: i64,
    /// The payroll month.
    pub month: i64,
}

impl PeriodRequest {
    /// Checks the ranges and returns the period.
    pub fn validate(self) -> Result<PayPeriod, ApiErrorResponse> {
        let year = i32::try_from(self.year)
            .ok()
            .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
            .ok_or_else(|| {
                ApiErrorResponse::bad_request(format!(
                    "year must be between {} and {}, got {}",
                    MIN_YEAR, MAX_YEAR, self.year
                ))
            })?;
        let month = u32::try_from(self.month)
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| {
                ApiErrorResponse::bad_request(format!(
                    "month must be between 1 and 12, got {}",
                    self.month
                ))
            })?;
        PayPeriod::new(year, month).map_err(Into::into)
    }
}

/// Role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May administer runs and read reports.
    Admin,
    /// May read their own payslip.
    Employee,
}

impl Role {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "EMPLOYEE" => Some(Role::Employee),
            _ => None,
        }
    }
}

/// Caller identity as forwarded by the authentication layer in front of the
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// The caller's role, if the header was present and recognised.
    pub role: Option<Role>,
    /// The caller's employee id, if any.
    pub employee_id: Option<String>,
}

impl Caller {
    /// Reads the caller from the request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };
        Self {
            role: header(ROLE_HEADER).and_then(Role::parse),
            employee_id: header(EMPLOYEE_ID_HEADER).map(str::to_string),
        }
    }

    /// Succeeds only for administrators.
    pub fn require_admin(&self) -> Result<(), ApiErrorResponse> {
        match self.role {
            Some(Role::Admin) => Ok(()),
            Some(Role::Employee) => Err(ApiErrorResponse::forbidden(
                "This operation requires the ADMIN role",
            )),
            None => Err(ApiErrorResponse::unauthorized("Missing or unknown X-Role header")),
        }
    }

    /// Returns the caller's employee id.
    pub fn require_employee_id(&self) -> Result<&str, ApiErrorResponse> {
        self.employee_id
            .as_deref()
            .ok_or_else(|| ApiErrorResponse::unauthorized("Missing X-Employee-Id header"))
    }
}
