//! Request types for the payroll engine API.
//!
//! The API holds no payroll state. Every request carries the collections the
//! operation needs, the same way the library functions take them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Allowance, Employee, LeaveRequest, PayPeriod, PayrollRecord};

/// A month and year as sent on the wire.
///
/// Validated into a [`PayPeriod`] by the handler so that a bad month is an
/// `INVALID_PERIOD` error rather than a JSON rejection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Month number, expected to be 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl PeriodRequest {
    /// Validates the month.
    pub fn to_period(self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.month, self.year)
    }
}

/// Request body for `POST /allowances/resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveAllowanceRequest {
    /// The employee to resolve allowances for.
    pub employee: Employee,
    /// Stored allowance records; at most one should match the employee.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}

/// Request body for `POST /leave/approved-days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedLeaveDaysRequest {
    /// The employee whose leave is counted.
    pub employee_id: String,
    /// The period to count leave for.
    #[serde(flatten)]
    pub period: PeriodRequest,
    /// Leave requests of any status and employee.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

/// Request body for `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// The employee to generate payroll for.
    pub employee: Employee,
    /// The period to generate payroll for.
    #[serde(flatten)]
    pub period: PeriodRequest,
    /// Leave requests of any status and employee.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Stored allowance records.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
    /// Timestamp stamped on the record; defaults to the time of the request.
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /payroll/generate-all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAllPayrollsRequest {
    /// Every employee; inactive ones are skipped.
    pub employees: Vec<Employee>,
    /// The period to generate payroll for.
    #[serde(flatten)]
    pub period: PeriodRequest,
    /// Leave requests of any status and employee.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Stored allowance records.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
    /// Timestamp stamped on every record; defaults to the time of the request.
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /reports/monthly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReportRequest {
    /// The month to summarise.
    #[serde(flatten)]
    pub period: PeriodRequest,
    /// Payroll records from any period.
    #[serde(default)]
    pub records: Vec<PayrollRecord>,
    /// Date printed on the report; defaults to today.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
}

/// Request body for `POST /reports/yearly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyReportRequest {
    /// The year to summarise.
    pub year: i32,
    /// Payroll records from any period.
    #[serde(default)]
    pub records: Vec<PayrollRecord>,
    /// Date printed on the report; defaults to today.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
}

/// Request body for `POST /reports/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeReportRequest {
    /// Every employee to include.
    pub employees: Vec<Employee>,
    /// Payroll records from any period.
    #[serde(default)]
    pub records: Vec<PayrollRecord>,
    /// Leave requests of any status.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Date printed on the report; defaults to today.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
}

/// Request body for `POST /reports/leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveReportRequest {
    /// Every employee to include.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Leave requests of any status.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Date printed on the report; defaults to today.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults_optional_collections() {
        let json = r#"{
            "employee": {
                "id": "emp-001",
                "first_name": "Asha",
                "last_name": "Rao",
                "base_salary": "65000",
                "is_active": true
            },
            "month": 3,
            "year": 2025
        }"#;

        let request: GeneratePayrollRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.period.month, 3);
        assert_eq!(request.period.year, 2025);
        assert!(request.leave_requests.is_empty());
        assert!(request.allowances.is_empty());
        assert!(request.generated_at.is_none());
        assert_eq!(request.employee.department, "");
    }

    #[test]
    fn test_out_of_range_month_parses_but_fails_validation() {
        let json = r#"{"month": 13, "year": 2025}"#;
        let request: MonthlyReportRequest = serde_json::from_str(json).unwrap();

        assert!(request.period.to_period().is_err());
        assert!(request.records.is_empty());
    }

    #[test]
    fn test_missing_year_is_rejected() {
        let json = r#"{"employee_id": "emp-001", "month": 3}"#;
        assert!(serde_json::from_str::<ApprovedLeaveDaysRequest>(json).is_err());
    }
}
