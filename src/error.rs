//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine and its surrounding office layer recognise.

use thiserror::Error;

use crate::models::LeaveStatus;

/// The main error type for the payroll engine.
///
/// The calculation core itself is total; errors come from configuration
/// loading, period validation, leave-request lifecycle checks, lookups done
/// by the office layer, and report periods with no payroll data.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::NoPayrollData {
///     period: "March 2025".to_string(),
/// };
/// assert_eq!(error.to_string(), "No payroll data found for March 2025");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was outside its permitted range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A pay period was requested with a month outside 1..=12.
    #[error("Invalid pay period month: {month}")]
    InvalidPeriod {
        /// The month that was rejected.
        month: u32,
    },

    /// A leave request could not be created.
    #[error("Invalid leave request '{leave_id}': {message}")]
    InvalidLeaveRequest {
        /// The ID of the rejected leave request.
        leave_id: String,
        /// A description of what made the request invalid.
        message: String,
    },

    /// A leave request was submitted under an ID that is already in use.
    #[error("Leave request '{leave_id}' already exists")]
    DuplicateLeaveRequest {
        /// The ID that was already taken.
        leave_id: String,
    },

    /// A decision was attempted on a leave request that is no longer pending.
    #[error("Leave request '{leave_id}' has already been {status}")]
    LeaveAlreadyDecided {
        /// The ID of the leave request.
        leave_id: String,
        /// The status the request already holds.
        status: LeaveStatus,
    },

    /// No employee with the given ID exists.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee ID that was not found.
        employee_id: String,
    },

    /// No leave request with the given ID exists.
    #[error("Leave request not found: {leave_id}")]
    LeaveRequestNotFound {
        /// The leave request ID that was not found.
        leave_id: String,
    },

    /// A report was requested for a period with no payroll records.
    #[error("No payroll data found for {period}")]
    NoPayrollData {
        /// A human-readable description of the requested period.
        period: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
