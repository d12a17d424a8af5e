//! Payroll and leave summaries.
//!
//! Every function here is a read-only reduction over the collections passed
//! in. Monthly and yearly summaries distinguish "no records for the period"
//! (`EngineError::NoPayrollData`) from a zero-valued summary.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveRequest, LeaveStatus, PayPeriod, PayrollRecord};

/// One payroll record's line in a monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecordLine {
    /// The employee's name as stored on the record.
    pub employee_name: String,
    /// Gross salary on the record.
    pub gross_salary: Decimal,
    /// Net salary on the record.
    pub net_salary: Decimal,
    /// Leave days deducted on the record.
    pub leave_days: u32,
}

/// Aggregate payroll figures for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The summarised period.
    pub period: PayPeriod,
    /// Number of payroll records in the period.
    pub employee_count: usize,
    /// Sum of gross salaries.
    pub total_gross: Decimal,
    /// Sum of net salaries.
    pub total_net: Decimal,
    /// `total_gross - total_net`.
    pub total_deductions: Decimal,
    /// One line per record, in input order.
    pub records: Vec<MonthlyRecordLine>,
}

/// One month's figures inside a yearly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBreakdown {
    /// Month number, 1 through 12.
    pub month: u32,
    /// Number of payroll records in the month.
    pub employee_count: usize,
    /// Sum of gross salaries for the month.
    pub total_gross: Decimal,
    /// Sum of net salaries for the month.
    pub total_net: Decimal,
}

/// Aggregate payroll figures for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// The summarised year.
    pub year: i32,
    /// Number of payroll records in the year.
    pub record_count: usize,
    /// Sum of gross salaries.
    pub total_gross: Decimal,
    /// Sum of net salaries.
    pub total_net: Decimal,
    /// `total_gross - total_net`.
    pub total_deductions: Decimal,
    /// Months 1..12 that have at least one record, in calendar order.
    pub months: Vec<MonthBreakdown>,
}

/// Lifetime payroll and leave figures for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's department.
    pub department: String,
    /// The employee's position.
    pub position: String,
    /// Current base salary.
    pub base_salary: Decimal,
    /// Whether the employee is active.
    pub is_active: bool,
    /// Number of payroll records for the employee.
    pub payroll_count: usize,
    /// Sum of gross salaries across those records.
    pub total_gross: Decimal,
    /// Sum of net salaries across those records.
    pub total_net: Decimal,
    /// Leave days across all requests, whatever their status.
    pub total_leave_days: u32,
    /// Leave days across approved requests only.
    pub approved_leave_days: u32,
}

/// Leave request counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStatusCounts {
    /// Number of requests of any status.
    pub total: usize,
    /// Number of pending requests.
    pub pending: usize,
    /// Number of approved requests.
    pub approved: usize,
    /// Number of rejected requests.
    pub rejected: usize,
}

impl LeaveStatusCounts {
    fn record(&mut self, status: LeaveStatus) {
        self.total += 1;
        match status {
            LeaveStatus::Pending => self.pending += 1,
            LeaveStatus::Approved => self.approved += 1,
            LeaveStatus::Rejected => self.rejected += 1,
        }
    }
}

/// One employee's leave figures inside a leave-status summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLeaveSummary {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's department.
    pub department: String,
    /// Request counts by status.
    pub counts: LeaveStatusCounts,
    /// Days across approved requests.
    pub approved_days: u32,
}

/// Leave request counts globally and per employee, with the full listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStatusSummary {
    /// Counts across every request.
    pub totals: LeaveStatusCounts,
    /// Per-employee figures, in employee input order.
    pub employees: Vec<EmployeeLeaveSummary>,
    /// Every request ordered by start date, then applied date, then ID.
    pub requests: Vec<LeaveRequest>,
}

/// Headline counts across the office for one pay period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewSummary {
    /// Every employee, active or not.
    pub total_employees: usize,
    /// Employees that are active.
    pub active_employees: usize,
    /// Leave requests of any status.
    pub total_leave_requests: usize,
    /// Leave requests still pending.
    pub pending_leave_requests: usize,
    /// Payroll records for the period.
    pub payrolls_this_period: usize,
}

fn sum_gross<'a>(records: impl Iterator<Item = &'a PayrollRecord>) -> Decimal {
    records.map(|r| r.gross_salary).sum()
}

fn sum_net<'a>(records: impl Iterator<Item = &'a PayrollRecord>) -> Decimal {
    records.map(|r| r.net_salary).sum()
}

/// Summarises the payroll records for one month.
///
/// Returns `NoPayrollData` if no record matches the period. Total deductions
/// are derived from the aggregate gross and net rather than re-summed per
/// record.
pub fn monthly_summary(records: &[PayrollRecord], period: PayPeriod) -> EngineResult<MonthlySummary> {
    let matching: Vec<&PayrollRecord> = records.iter().filter(|r| r.is_for(period)).collect();

    if matching.is_empty() {
        return Err(EngineError::NoPayrollData {
            period: period.to_string(),
        });
    }

    let total_gross = sum_gross(matching.iter().copied());
    let total_net = sum_net(matching.iter().copied());

    Ok(MonthlySummary {
        period,
        employee_count: matching.len(),
        total_gross,
        total_net,
        total_deductions: total_gross - total_net,
        records: matching
            .iter()
            .map(|r| MonthlyRecordLine {
                employee_name: r.employee_name.clone(),
                gross_salary: r.gross_salary,
                net_salary: r.net_salary,
                leave_days: r.deductions.leave_days,
            })
            .collect(),
    })
}

/// Summarises the payroll records for one year with a month-by-month breakdown.
///
/// Returns `NoPayrollData` if no record falls in the year. Months with no
/// records are omitted from the breakdown.
pub fn yearly_summary(records: &[PayrollRecord], year: i32) -> EngineResult<YearlySummary> {
    let matching: Vec<&PayrollRecord> = records.iter().filter(|r| r.year == year).collect();

    if matching.is_empty() {
        return Err(EngineError::NoPayrollData {
            period: year.to_string(),
        });
    }

    let total_gross = sum_gross(matching.iter().copied());
    let total_net = sum_net(matching.iter().copied());

    let months = (1..=12)
        .filter_map(|month| {
            let in_month: Vec<&PayrollRecord> = matching
                .iter()
                .copied()
                .filter(|r| r.month == month)
                .collect();
            if in_month.is_empty() {
                return None;
            }
            Some(MonthBreakdown {
                month,
                employee_count: in_month.len(),
                total_gross: sum_gross(in_month.iter().copied()),
                total_net: sum_net(in_month.iter().copied()),
            })
        })
        .collect();

    Ok(YearlySummary {
        year,
        record_count: matching.len(),
        total_gross,
        total_net,
        total_deductions: total_gross - total_net,
        months,
    })
}

/// Summarises payroll and leave for every employee, active or not.
///
/// Total leave days count requests of every status; approved leave days count
/// approved requests only.
pub fn employee_summaries(
    employees: &[Employee],
    records: &[PayrollRecord],
    leave_requests: &[LeaveRequest],
) -> Vec<EmployeeSummary> {
    employees
        .iter()
        .map(|employee| {
            let payrolls: Vec<&PayrollRecord> = records
                .iter()
                .filter(|r| r.employee_id == employee.id)
                .collect();
            let leaves = leave_requests
                .iter()
                .filter(|l| l.employee_id == employee.id);

            let (total_leave_days, approved_leave_days) =
                leaves.fold((0u32, 0u32), |(total, approved), leave| {
                    let approved_days = if leave.is_approved() { leave.days } else { 0 };
                    (total + leave.days, approved + approved_days)
                });

            EmployeeSummary {
                employee_id: employee.id.clone(),
                employee_name: employee.full_name(),
                department: employee.department.clone(),
                position: employee.position.clone(),
                base_salary: employee.base_salary,
                is_active: employee.is_active,
                payroll_count: payrolls.len(),
                total_gross: sum_gross(payrolls.iter().copied()),
                total_net: sum_net(payrolls.iter().copied()),
                total_leave_days,
                approved_leave_days,
            }
        })
        .collect()
}

/// Counts leave requests by status, globally and per employee.
pub fn leave_status_summary(
    employees: &[Employee],
    leave_requests: &[LeaveRequest],
) -> LeaveStatusSummary {
    let mut totals = LeaveStatusCounts::default();
    let mut per_employee: HashMap<&str, (LeaveStatusCounts, u32)> = HashMap::new();

    for leave in leave_requests {
        totals.record(leave.status);
        let entry = per_employee
            .entry(leave.employee_id.as_str())
            .or_default();
        entry.0.record(leave.status);
        if leave.is_approved() {
            entry.1 += leave.days;
        }
    }

    let employees = employees
        .iter()
        .map(|employee| {
            let (counts, approved_days) = per_employee
                .get(employee.id.as_str())
                .copied()
                .unwrap_or_default();
            EmployeeLeaveSummary {
                employee_id: employee.id.clone(),
                employee_name: employee.full_name(),
                department: employee.department.clone(),
                counts,
                approved_days,
            }
        })
        .collect();

    let mut requests = leave_requests.to_vec();
    requests.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.applied_date.cmp(&b.applied_date))
            .then_with(|| a.id.cmp(&b.id))
    });

    LeaveStatusSummary {
        totals,
        employees,
        requests,
    }
}

/// Counts employees, leave requests and the period's payroll records.
///
/// Unlike the monthly summary, an empty period is not an error.
pub fn overview_summary(
    employees: &[Employee],
    records: &[PayrollRecord],
    leave_requests: &[LeaveRequest],
    period: PayPeriod,
) -> OverviewSummary {
    OverviewSummary {
        total_employees: employees.len(),
        active_employees: employees.iter().filter(|e| e.is_active).count(),
        total_leave_requests: leave_requests.len(),
        pending_leave_requests: leave_requests
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .count(),
        payrolls_this_period: records.iter().filter(|r| r.is_for(period)).count(),
    }
}
