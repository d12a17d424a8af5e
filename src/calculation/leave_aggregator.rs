//! Leave aggregation functionality.
//!
//! Approved leave is attributed to the period containing its start date. A
//! request that runs into the following month still counts entirely against
//! the month it started in.

use crate::models::{AuditStep, LeaveRequest, PayPeriod};

/// The result of aggregating an employee's approved leave for a period.
#[derive(Debug, Clone)]
pub struct LeaveAggregation {
    /// Total approved leave days attributed to the period.
    pub leave_days: u32,
    /// IDs of the leave requests that contributed.
    pub request_ids: Vec<String>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

fn counts_against(request: &LeaveRequest, employee_id: &str, period: PayPeriod) -> bool {
    request.employee_id == employee_id
        && request.is_approved()
        && period.contains_date(request.start_date)
}

/// Sums the approved leave days an employee started within a period.
///
/// Returns 0 when nothing matches.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::approved_leave_days;
/// use payroll_engine::models::{LeaveDecision, LeaveRequest, PayPeriod};
/// use chrono::NaiveDate;
///
/// let request = LeaveRequest::new(
///     "leave-001",
///     "emp-001",
///     "Asha Rao",
///     NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
///     "Travel",
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
/// )
/// .unwrap()
/// .decide(LeaveDecision::Approve, None)
/// .unwrap();
///
/// let march = PayPeriod::new(3, 2025).unwrap();
/// let april = PayPeriod::new(4, 2025).unwrap();
///
/// assert_eq!(approved_leave_days("emp-001", march, &[request.clone()]), 7);
/// assert_eq!(approved_leave_days("emp-001", april, &[request]), 0);
/// ```
pub fn approved_leave_days(
    employee_id: &str,
    period: PayPeriod,
    leave_requests: &[LeaveRequest],
) -> u32 {
    leave_requests
        .iter()
        .filter(|r| counts_against(r, employee_id, period))
        .map(|r| r.days)
        .sum()
}

/// Aggregates approved leave for a period and records an audit step.
pub fn aggregate_leave(
    employee_id: &str,
    period: PayPeriod,
    leave_requests: &[LeaveRequest],
    step_number: u32,
) -> LeaveAggregation {
    let matching: Vec<&LeaveRequest> = leave_requests
        .iter()
        .filter(|r| counts_against(r, employee_id, period))
        .collect();

    let leave_days: u32 = matching.iter().map(|r| r.days).sum();
    let request_ids: Vec<String> = matching.iter().map(|r| r.id.clone()).collect();

    let reasoning = if matching.is_empty() {
        format!("No approved leave starting in {}", period)
    } else {
        format!(
            "{} approved request(s) starting in {} totalling {} day(s)",
            matching.len(),
            period,
            leave_days
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "approved_leave".to_string(),
        rule_name: "Approved Leave Aggregation".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
            "month": period.month,
            "year": period.year,
            "requests_considered": leave_requests.len()
        }),
        output: serde_json::json!({
            "leave_days": leave_days,
            "request_ids": request_ids
        }),
        reasoning,
    };

    LeaveAggregation {
        leave_days,
        request_ids,
        audit_step,
    }
}
