//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowance;
mod audit;
mod employee;
mod leave_request;
mod pay_period;
mod payroll_record;

pub use allowance::{Allowance, AllowanceBreakdown};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::Employee;
pub use leave_request::{LeaveDecision, LeaveRequest, LeaveStatus};
pub use pay_period::{PayPeriod, month_name};
pub use payroll_record::{Deductions, PayrollRecord};
