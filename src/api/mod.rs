//! HTTP API module for the payroll engine.
//!
//! This module exposes the calculation and reporting functions as JSON
//! endpoints. Requests carry the employee, leave, allowance and payroll
//! collections they operate on.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApprovedLeaveDaysRequest, EmployeeReportRequest, GenerateAllPayrollsRequest,
    GeneratePayrollRequest, LeaveReportRequest, MonthlyReportRequest, PeriodRequest,
    ResolveAllowanceRequest, YearlyReportRequest,
};
pub use response::{
    AllowanceResponse, ApiError, ApprovedLeaveDaysResponse, BatchPayrollResponse, ReportResponse,
};
pub use state::AppState;
