//! Response types for the payroll API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with a `VALIDATION_ERROR` body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }

    /// A 401 for requests without caller identity.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("UNAUTHORIZED", message),
        }
    }

    /// A 403 for callers whose role does not allow the route.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            error: ApiError::new("FORBIDDEN", message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict | ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::Config | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = status_for(error.kind());
        let message = error.to_string();
        let error = match error {
            EngineError::RunNotFound { .. } | EngineError::PeriodNotFound { .. } => {
                ApiError::new("RUN_NOT_FOUND", message)
            }
            EngineError::EmployeeNotFound { .. } => ApiError::new("EMPLOYEE_NOT_FOUND", message),
            EngineError::ItemNotFound { .. } => ApiError::with_details(
                "PAYSLIP_NOT_FOUND",
                message,
                "The run has no item for this employee; it may not have been processed yet",
            ),
            EngineError::RunExists { .. } => ApiError::new("RUN_EXISTS", message),
            EngineError::RunNotDraft { .. } => ApiError::new("RUN_NOT_DRAFT", message),
            EngineError::DuplicateItem { .. } => ApiError::new("DUPLICATE_ITEM", message),
            EngineError::RunLocked { .. } => ApiError::new("RUN_LOCKED", message),
            EngineError::InvalidTransition { .. } => ApiError::new("INVALID_TRANSITION", message),
            EngineError::InvalidPeriod { .. } => ApiError::validation_error(message),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
            EngineError::AmountOverflow { .. } => ApiError::with_details(
                "AMOUNT_OVERFLOW",
                "Report totals exceed the supported amount range",
                message,
            ),
            EngineError::Storage { .. } => {
                ApiError::with_details("STORAGE_ERROR", "Storage failure", message)
            }
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::models::{PayPeriod, RunStatus};

    fn period() -> PayPeriod {
        PayPeriod::new(2025, 1).unwrap()
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        let api_error: ApiErrorResponse = EngineError::PeriodNotFound { period: period() }.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "RUN_NOT_FOUND");
        assert_eq!(api_error.error.message, "Payroll run not found for 2025-01");

        let api_error: ApiErrorResponse = EngineError::ItemNotFound {
            employee_id: "emp_001".to_string(),
            period: period(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "PAYSLIP_NOT_FOUND");
    }

    #[test]
    fn test_conflicts_and_invalid_state_map_to_409() {
        let run_id = Uuid::new_v4();
        let cases = vec![
            (EngineError::RunExists { period: period() }, "RUN_EXISTS"),
            (
                EngineError::RunNotDraft {
                    run_id,
                    status: RunStatus::Processed,
                },
                "RUN_NOT_DRAFT",
            ),
            (EngineError::RunLocked { run_id }, "RUN_LOCKED"),
        ];

        for (error, code) in cases {
            let api_error: ApiErrorResponse = error.into();
            assert_eq!(api_error.status, StatusCode::CONFLICT);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_invalid_period_maps_to_validation_error() {
        let error = PayPeriod::new(2025, 13).unwrap_err();
        let api_error: ApiErrorResponse = error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::Storage {
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.details.as_deref(), Some("Storage error: disk full"));
    }

    #[test]
    fn test_amount_overflow_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::AmountOverflow {
            field: "total_net",
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "AMOUNT_OVERFLOW");
    }
}
