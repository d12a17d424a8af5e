//! Leave request model and its decision lifecycle.
//!
//! A leave request is created pending, decided exactly once by an admin, and
//! immutable afterwards.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The review status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted and awaiting an admin decision.
    Pending,
    /// Approved; counts towards payroll leave deductions.
    Approved,
    /// Rejected; never affects payroll.
    Rejected,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// An admin decision on a pending leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDecision {
    /// Approve the request.
    Approve,
    /// Reject the request.
    Reject,
}

impl LeaveDecision {
    /// The status a request holds after this decision.
    pub fn resulting_status(self) -> LeaveStatus {
        match self {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        }
    }
}

/// A claimed absence period for one employee.
///
/// `days` is the inclusive calendar-day span fixed when the request was
/// submitted.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{LeaveRequest, LeaveStatus};
/// use chrono::NaiveDate;
///
/// let request = LeaveRequest::new(
///     "leave-001",
///     "emp-001",
///     "Asha Rao",
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     "Family visit",
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(request.days, 5);
/// assert_eq!(request.status, LeaveStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The ID of the employee taking leave.
    pub employee_id: String,
    /// The employee's name at submission time.
    #[serde(default)]
    pub employee_name: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The reason given by the employee.
    #[serde(default)]
    pub reason: String,
    /// Current review status.
    pub status: LeaveStatus,
    /// The date the request was submitted.
    pub applied_date: NaiveDate,
    /// Optional note recorded with the admin decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    /// Inclusive number of calendar days covered.
    pub days: u32,
}

impl LeaveRequest {
    /// Creates a pending leave request, computing the inclusive day count.
    ///
    /// Returns `InvalidLeaveRequest` if `end_date` precedes `start_date`.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
        applied_date: NaiveDate,
    ) -> EngineResult<Self> {
        let id = id.into();
        let days = inclusive_days(start_date, end_date).ok_or_else(|| {
            EngineError::InvalidLeaveRequest {
                leave_id: id.clone(),
                message: format!("end date {} is before start date {}", end_date, start_date),
            }
        })?;

        Ok(Self {
            id,
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            start_date,
            end_date,
            reason: reason.into(),
            status: LeaveStatus::Pending,
            applied_date,
            admin_notes: None,
            days,
        })
    }

    /// Returns `true` if the request counts towards payroll deductions.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Applies an admin decision, consuming the pending request.
    ///
    /// Returns `LeaveAlreadyDecided` if the request is not pending.
    pub fn decide(
        mut self,
        decision: LeaveDecision,
        admin_notes: Option<String>,
    ) -> EngineResult<Self> {
        if self.status != LeaveStatus::Pending {
            return Err(EngineError::LeaveAlreadyDecided {
                leave_id: self.id,
                status: self.status,
            });
        }

        self.status = decision.resulting_status();
        self.admin_notes = admin_notes;
        Ok(self)
    }
}

fn inclusive_days(start_date: NaiveDate, end_date: NaiveDate) -> Option<u32> {
    let span = (end_date - start_date).num_days();
    if span < 0 {
        return None;
    }
    u32::try_from(span + 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_pending(start: NaiveDate, end: NaiveDate) -> LeaveRequest {
        LeaveRequest::new(
            "leave-001",
            "emp-001",
            "Asha Rao",
            start,
            end,
            "Rest",
            date(2025, 1, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_single_day_leave_counts_one_day() {
        let request = create_pending(date(2025, 3, 10), date(2025, 3, 10));
        assert_eq!(request.days, 1);
    }

    #[test]
    fn test_days_span_month_boundary() {
        let request = create_pending(date(2025, 3, 30), date(2025, 4, 2));
        assert_eq!(request.days, 4);
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let result = LeaveRequest::new(
            "leave-bad",
            "emp-001",
            "Asha Rao",
            date(2025, 3, 10),
            date(2025, 3, 9),
            "Oops",
            date(2025, 3, 1),
        );

        match result {
            Err(EngineError::InvalidLeaveRequest { leave_id, .. }) => {
                assert_eq!(leave_id, "leave-bad");
            }
            other => panic!("Expected InvalidLeaveRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_approve_pending_request() {
        let request = create_pending(date(2025, 3, 10), date(2025, 3, 12));
        let approved = request
            .decide(LeaveDecision::Approve, Some("Enjoy".to_string()))
            .unwrap();

        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.admin_notes.as_deref(), Some("Enjoy"));
        assert!(approved.is_approved());
    }

    #[test]
    fn test_second_decision_is_rejected() {
        let request = create_pending(date(2025, 3, 10), date(2025, 3, 12));
        let rejected = request.decide(LeaveDecision::Reject, None).unwrap();

        match rejected.decide(LeaveDecision::Approve, None) {
            Err(EngineError::LeaveAlreadyDecided { status, .. }) => {
                assert_eq!(status, LeaveStatus::Rejected);
            }
            other => panic!("Expected LeaveAlreadyDecided, got {:?}", other),
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(LeaveStatus::Pending.to_string(), "pending");
    }
}
