//! Plain-text rendering of summaries.
//!
//! A [`Report`] is just a filename and its contents. Writing it anywhere is
//! left to the caller.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::month_name;

use super::summary::{EmployeeSummary, LeaveStatusSummary, MonthlySummary, YearlySummary};

const EMPLOYEE_RULE_WIDTH: usize = 50;
const LEAVE_RULE_WIDTH: usize = 30;

/// A rendered text report and the filename it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Suggested filename, e.g. `monthly-salary-report-3-2025.txt`.
    pub filename: String,
    /// The report text.
    pub content: String,
}

/// Formats an amount with thousands separators, e.g. `$104,000` or `-$4,680`.
///
/// Fractional digits are kept only when non-zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::report::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::from(104000), "$"), "$104,000");
/// assert_eq!(format_money(Decimal::from(-4680), "$"), "-$4,680");
/// assert_eq!(format_money(Decimal::new(123456, 2), "$"), "$1,234.56");
/// ```
pub fn format_money(amount: Decimal, currency_symbol: &str) -> String {
    let normalized = amount.normalize();
    let negative = normalized < Decimal::ZERO;
    let digits = normalized.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{}{}{}.{}", sign, currency_symbol, grouped, fraction),
        None => format!("{}{}{}", sign, currency_symbol, grouped),
    }
}

fn write_generated(f: &mut fmt::Formatter<'_>, generated_on: NaiveDate) -> fmt::Result {
    writeln!(f, "Generated: {}", generated_on.format("%Y-%m-%d"))
}

fn active_label(is_active: bool) -> &'static str {
    if is_active { "Active" } else { "Inactive" }
}

struct MonthlyText<'a> {
    summary: &'a MonthlySummary,
    generated_on: NaiveDate,
    currency_symbol: &'a str,
}

impl fmt::Display for MonthlyText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = |amount| format_money(amount, self.currency_symbol);
        let summary = self.summary;

        writeln!(f, "MONTHLY SALARY REPORT")?;
        writeln!(f, "Month: {}", summary.period)?;
        write_generated(f, self.generated_on)?;
        writeln!(f)?;
        writeln!(f, "SUMMARY:")?;
        writeln!(f, "- Total Employees: {}", summary.employee_count)?;
        writeln!(f, "- Total Gross Salary: {}", money(summary.total_gross))?;
        writeln!(f, "- Total Deductions: {}", money(summary.total_deductions))?;
        writeln!(f, "- Total Net Salary: {}", money(summary.total_net))?;
        writeln!(f)?;
        writeln!(f, "EMPLOYEE DETAILS:")?;
        for line in &summary.records {
            writeln!(f)?;
            writeln!(f, "Employee: {}", line.employee_name)?;
            writeln!(f, "Gross Salary: {}", money(line.gross_salary))?;
            writeln!(f, "Net Salary: {}", money(line.net_salary))?;
            writeln!(f, "Leave Days: {}", line.leave_days)?;
        }
        Ok(())
    }
}

struct YearlyText<'a> {
    summary: &'a YearlySummary,
    generated_on: NaiveDate,
    currency_symbol: &'a str,
}

impl fmt::Display for YearlyText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = |amount| format_money(amount, self.currency_symbol);
        let summary = self.summary;

        writeln!(f, "YEARLY SALARY REPORT")?;
        writeln!(f, "Year: {}", summary.year)?;
        write_generated(f, self.generated_on)?;
        writeln!(f)?;
        writeln!(f, "ANNUAL SUMMARY:")?;
        writeln!(f, "- Total Payroll Records: {}", summary.record_count)?;
        writeln!(f, "- Total Gross Salary: {}", money(summary.total_gross))?;
        writeln!(f, "- Total Deductions: {}", money(summary.total_deductions))?;
        writeln!(f, "- Total Net Salary: {}", money(summary.total_net))?;
        writeln!(f)?;
        writeln!(f, "MONTHLY BREAKDOWN:")?;
        for month in &summary.months {
            writeln!(f)?;
            writeln!(f, "{}:", month_name(month.month))?;
            writeln!(f, "  Employees: {}", month.employee_count)?;
            writeln!(f, "  Gross: {}", money(month.total_gross))?;
            writeln!(f, "  Net: {}", money(month.total_net))?;
        }
        Ok(())
    }
}

struct EmployeeText<'a> {
    summaries: &'a [EmployeeSummary],
    generated_on: NaiveDate,
    currency_symbol: &'a str,
}

impl fmt::Display for EmployeeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = |amount| format_money(amount, self.currency_symbol);

        writeln!(f, "EMPLOYEE-WISE SALARY REPORT")?;
        write_generated(f, self.generated_on)?;
        for summary in self.summaries {
            writeln!(f)?;
            writeln!(f, "EMPLOYEE: {}", summary.employee_name)?;
            writeln!(f, "Employee ID: {}", summary.employee_id)?;
            writeln!(f, "Department: {}", summary.department)?;
            writeln!(f, "Position: {}", summary.position)?;
            writeln!(f, "Base Salary: {}", money(summary.base_salary))?;
            writeln!(f, "Status: {}", active_label(summary.is_active))?;
            writeln!(f)?;
            writeln!(f, "Payroll Records: {}", summary.payroll_count)?;
            writeln!(f, "Total Gross Earned: {}", money(summary.total_gross))?;
            writeln!(f, "Total Net Earned: {}", money(summary.total_net))?;
            writeln!(f, "Total Leave Days: {}", summary.total_leave_days)?;
            writeln!(f, "Approved Leave Days: {}", summary.approved_leave_days)?;
            writeln!(f, "{}", "=".repeat(EMPLOYEE_RULE_WIDTH))?;
        }
        Ok(())
    }
}

struct LeaveText<'a> {
    summary: &'a LeaveStatusSummary,
    generated_on: NaiveDate,
}

impl fmt::Display for LeaveText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        writeln!(f, "LEAVE REPORT")?;
        write_generated(f, self.generated_on)?;
        writeln!(f)?;
        writeln!(f, "SUMMARY:")?;
        writeln!(f, "- Total Leave Requests: {}", summary.totals.total)?;
        writeln!(f, "- Approved: {}", summary.totals.approved)?;
        writeln!(f, "- Pending: {}", summary.totals.pending)?;
        writeln!(f, "- Rejected: {}", summary.totals.rejected)?;
        writeln!(f)?;

        writeln!(f, "EMPLOYEE-WISE LEAVE DETAILS:")?;
        for employee in &summary.employees {
            writeln!(f)?;
            writeln!(f, "Employee: {}", employee.employee_name)?;
            writeln!(f, "Department: {}", employee.department)?;
            writeln!(f, "Total Requests: {}", employee.counts.total)?;
            writeln!(f, "Approved: {}", employee.counts.approved)?;
            writeln!(f, "Pending: {}", employee.counts.pending)?;
            writeln!(f, "Rejected: {}", employee.counts.rejected)?;
            writeln!(f, "Total Approved Days: {}", employee.approved_days)?;
        }
        writeln!(f)?;

        writeln!(f, "DETAILED LEAVE REQUESTS:")?;
        for request in &summary.requests {
            writeln!(f)?;
            writeln!(f, "Employee: {}", request.employee_name)?;
            writeln!(
                f,
                "Period: {} to {}",
                request.start_date.format("%Y-%m-%d"),
                request.end_date.format("%Y-%m-%d")
            )?;
            writeln!(f, "Days: {}", request.days)?;
            writeln!(f, "Reason: {}", request.reason)?;
            writeln!(f, "Status: {}", request.status.to_string().to_uppercase())?;
            writeln!(f, "Applied: {}", request.applied_date.format("%Y-%m-%d"))?;
            if let Some(notes) = request.admin_notes.as_deref().filter(|n| !n.is_empty()) {
                writeln!(f, "Admin Notes: {}", notes)?;
            }
            writeln!(f, "{}", "=".repeat(LEAVE_RULE_WIDTH))?;
        }
        Ok(())
    }
}

/// Renders a monthly summary to `monthly-salary-report-{m}-{y}.txt`.
pub fn render_monthly(
    summary: &MonthlySummary,
    generated_on: NaiveDate,
    currency_symbol: &str,
) -> Report {
    let text = MonthlyText {
        summary,
        generated_on,
        currency_symbol,
    };
    Report {
        filename: format!(
            "monthly-salary-report-{}-{}.txt",
            summary.period.month, summary.period.year
        ),
        content: text.to_string(),
    }
}

/// Renders a yearly summary to `yearly-salary-report-{y}.txt`.
pub fn render_yearly(
    summary: &YearlySummary,
    generated_on: NaiveDate,
    currency_symbol: &str,
) -> Report {
    let text = YearlyText {
        summary,
        generated_on,
        currency_symbol,
    };
    Report {
        filename: format!("yearly-salary-report-{}.txt", summary.year),
        content: text.to_string(),
    }
}

/// Renders per-employee summaries to `employee-wise-salary-report.txt`.
pub fn render_employee_summaries(
    summaries: &[EmployeeSummary],
    generated_on: NaiveDate,
    currency_symbol: &str,
) -> Report {
    let text = EmployeeText {
        summaries,
        generated_on,
        currency_symbol,
    };
    Report {
        filename: "employee-wise-salary-report.txt".to_string(),
        content: text.to_string(),
    }
}

/// Renders a leave-status summary to `leave-report.txt`.
///
/// Admin notes are printed only for requests that carry them.
pub fn render_leave_status(summary: &LeaveStatusSummary, generated_on: NaiveDate) -> Report {
    let text = LeaveText {
        summary,
        generated_on,
    };
    Report {
        filename: "leave-report.txt".to_string(),
        content: text.to_string(),
    }
}
