//! Response types for the payroll engine API.
//!
//! This module defines the error body returned by every endpoint and the
//! mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::AllowanceSource;
use crate::error::EngineError;
use crate::models::{AllowanceBreakdown, AuditStep, PayPeriod, PayrollRecord};
use crate::report::Report;

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PERIOD",
                    message,
                    "Month must be between 1 and 12",
                ),
            ),
            EngineError::InvalidLeaveRequest { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_LEAVE_REQUEST", message),
            ),
            EngineError::DuplicateLeaveRequest { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_LEAVE_REQUEST", message),
            ),
            EngineError::LeaveAlreadyDecided { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("LEAVE_ALREADY_DECIDED", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::LeaveRequestNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("LEAVE_REQUEST_NOT_FOUND", message),
            ),
            EngineError::NoPayrollData { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "NO_PAYROLL_DATA",
                    message,
                    "Generate payroll for the period before requesting a report",
                ),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Response body for `POST /allowances/resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceResponse {
    /// The resolved allowance figures.
    pub allowances: AllowanceBreakdown,
    /// Whether the figures were stored or derived.
    pub source: AllowanceSource,
    /// Audit step describing the resolution.
    pub audit_step: AuditStep,
}

/// Response body for `POST /leave/approved-days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedLeaveDaysResponse {
    /// The employee whose leave was counted.
    pub employee_id: String,
    /// The period counted.
    pub period: PayPeriod,
    /// Approved leave days starting in the period.
    pub leave_days: u32,
    /// IDs of the contributing requests.
    pub request_ids: Vec<String>,
}

/// Response body for `POST /payroll/generate-all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPayrollResponse {
    /// The period generated.
    pub period: PayPeriod,
    /// One record per active employee, in input order.
    pub records: Vec<PayrollRecord>,
}

/// Response body for the report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse<S> {
    /// The structured summary.
    pub summary: S,
    /// The rendered text report.
    pub report: Report,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_no_payroll_data_is_not_found() {
        let api_error: ApiErrorResponse = EngineError::NoPayrollData {
            period: "March 2025".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "NO_PAYROLL_DATA");
        assert_eq!(api_error.error.message, "No payroll data found for March 2025");
    }

    #[test]
    fn test_invalid_period_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidPeriod { month: 13 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
        assert!(api_error.error.message.contains("13"));
    }

    #[test]
    fn test_duplicate_leave_request_is_conflict() {
        let api_error: ApiErrorResponse = EngineError::DuplicateLeaveRequest {
            leave_id: "leave-001".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "DUPLICATE_LEAVE_REQUEST");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "config/payroll.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
        assert!(api_error.error.details.unwrap().contains("payroll.yaml"));
    }
}
