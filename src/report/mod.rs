//! Payroll and leave reporting.
//!
//! [`summary`] reduces record and request collections to summaries;
//! [`render`] turns those summaries into plain-text reports.

pub mod render;
pub mod summary;

pub use render::{
    Report, format_money, render_employee_summaries, render_leave_status, render_monthly,
    render_yearly,
};
pub use summary::{
    EmployeeLeaveSummary, EmployeeSummary, LeaveStatusCounts, LeaveStatusSummary, MonthBreakdown,
    MonthlyRecordLine, MonthlySummary, OverviewSummary, YearlySummary, employee_summaries,
    leave_status_summary, monthly_summary, overview_summary, yearly_summary,
};
