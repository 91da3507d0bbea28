//! HTTP API module for the payroll engine.
//!
//! A thin axum adapter over [`PayrollEngine`](crate::engine::PayrollEngine)
//! and [`PayrollReports`](crate::reporting::PayrollReports). Authentication
//! happens upstream; the caller's role and employee id arrive as headers.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{Caller, EMPLOYEE_ID_HEADER, PeriodRequest, ROLE_HEADER, Role};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
