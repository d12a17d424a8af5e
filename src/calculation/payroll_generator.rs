//! Payroll generation functionality.
//!
//! This module combines the resolved allowances and approved leave for one
//! employee into a [`PayrollRecord`] for one [`PayPeriod`], and runs the same
//! computation for every active employee in a batch.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PayrollRules;
use crate::models::{
    Allowance, AuditStep, AuditTrace, AuditWarning, Deductions, Employee, LeaveRequest,
    PayPeriod, PayrollRecord,
};

use super::allowance_resolver::resolve_allowance;
use super::leave_aggregator::aggregate_leave;
use super::statutory::{calculate_leave_deduction, calculate_tax};

/// Warning code raised when deductions exceed gross salary.
pub const NEGATIVE_NET_SALARY: &str = "NEGATIVE_NET_SALARY";

/// A generated payroll record together with the audit trace of its derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The generated record.
    pub record: PayrollRecord,
    /// Every rule applied while generating the record.
    pub audit_trace: AuditTrace,
}

/// Generates a payroll record and explains how each figure was derived.
///
/// The computation is:
/// 1. resolve allowances (stored record, or derived HRA/DA)
/// 2. `gross = base + travel + medical + washing + hra + da`
/// 3. sum approved leave days starting in the period
/// 4. `leave_deduction = round(base / working_days * leave_days)`
/// 5. `tax = round(gross * tax_rate)`
/// 6. `net = gross - leave_deduction - tax`
///
/// Net salary is never clamped. A negative result is passed through and
/// flagged with a [`NEGATIVE_NET_SALARY`] warning in the audit trace.
///
/// The record ID is derived from the employee and period, so persisting it
/// by ID replaces any earlier record for the same period.
pub fn explain_payroll(
    employee: &Employee,
    period: PayPeriod,
    leave_requests: &[LeaveRequest],
    allowances: &[Allowance],
    rules: &PayrollRules,
    generated_at: DateTime<Utc>,
) -> PayrollCalculation {
    let start_time = Instant::now();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let base_salary = employee.base_salary;

    let resolution = resolve_allowance(employee, allowances, rules, 1);
    let resolved = resolution.allowances;
    steps.push(resolution.audit_step);

    let total_allowances = resolved.total();
    let gross_salary = base_salary + total_allowances;
    steps.push(AuditStep {
        step_number: 2,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "total_allowances": total_allowances.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string()
        }),
        reasoning: format!(
            "${} base + ${} allowances = ${}",
            base_salary.normalize(),
            total_allowances.normalize(),
            gross_salary.normalize()
        ),
    });

    let leave = aggregate_leave(&employee.id, period, leave_requests, 3);
    let leave_days = leave.leave_days;
    steps.push(leave.audit_step);

    let working_days = rules.working_days_per_month();
    let leave_deduction = calculate_leave_deduction(base_salary, leave_days, working_days);
    steps.push(AuditStep {
        step_number: 4,
        rule_id: "leave_deduction".to_string(),
        rule_name: "Leave Deduction".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "leave_days": leave_days,
            "working_days_per_month": working_days.normalize().to_string()
        }),
        output: serde_json::json!({
            "leave_deduction": leave_deduction.normalize().to_string()
        }),
        reasoning: format!(
            "${} / {} days x {} leave day(s) = ${} (rounded)",
            base_salary.normalize(),
            working_days.normalize(),
            leave_days,
            leave_deduction.normalize()
        ),
    });

    let tax = calculate_tax(gross_salary, rules.tax_rate());
    steps.push(AuditStep {
        step_number: 5,
        rule_id: "tax".to_string(),
        rule_name: "Flat Tax".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "tax_rate": rules.tax_rate().normalize().to_string()
        }),
        output: serde_json::json!({
            "tax": tax.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} = ${} (rounded)",
            gross_salary.normalize(),
            rules.tax_rate().normalize(),
            tax.normalize()
        ),
    });

    let net_salary = gross_salary - leave_deduction - tax;
    steps.push(AuditStep {
        step_number: 6,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "leave_deduction": leave_deduction.normalize().to_string(),
            "tax": tax.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} - ${} = ${}",
            gross_salary.normalize(),
            leave_deduction.normalize(),
            tax.normalize(),
            net_salary.normalize()
        ),
    });

    if net_salary < Decimal::ZERO {
        warn!(
            employee_id = %employee.id,
            period = %period,
            net_salary = %net_salary,
            "Deductions exceed gross salary"
        );
        warnings.push(AuditWarning {
            code: NEGATIVE_NET_SALARY.to_string(),
            message: format!(
                "Net salary for {} in {} is negative (${})",
                employee.id,
                period,
                net_salary.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    let record = PayrollRecord {
        id: PayrollRecord::derive_id(&employee.id, period),
        employee_id: employee.id.clone(),
        employee_name: employee.full_name(),
        month: period.month,
        year: period.year,
        base_salary,
        allowances: resolved,
        deductions: Deductions {
            leave_days,
            leave_deduction,
            tax,
        },
        gross_salary,
        net_salary,
        generated_date: generated_at,
    };

    debug!(
        record_id = %record.id,
        gross_salary = %record.gross_salary,
        net_salary = %record.net_salary,
        leave_days,
        "Generated payroll record"
    );

    PayrollCalculation {
        record,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}

/// Generates one employee's payroll record for a period.
///
/// This is [`explain_payroll`] without the audit trace. It never looks the
/// employee up and never fails.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::generate_payroll;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{Employee, PayPeriod};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp-001".to_string(),
///     first_name: "Asha".to_string(),
///     last_name: "Rao".to_string(),
///     department: "Engineering".to_string(),
///     position: "Developer".to_string(),
///     base_salary: Decimal::from(65000),
///     is_active: true,
/// };
///
/// let period = PayPeriod::new(3, 2025).unwrap();
/// let record = generate_payroll(&employee, period, &[], &[], &PayrollRules::default(), Utc::now());
///
/// assert_eq!(record.id, "payroll-emp-001-3-2025");
/// assert_eq!(record.gross_salary, Decimal::from(104000));
/// assert_eq!(record.net_salary, Decimal::from(93600));
/// ```
pub fn generate_payroll(
    employee: &Employee,
    period: PayPeriod,
    leave_requests: &[LeaveRequest],
    allowances: &[Allowance],
    rules: &PayrollRules,
    generated_at: DateTime<Utc>,
) -> PayrollRecord {
    explain_payroll(
        employee,
        period,
        leave_requests,
        allowances,
        rules,
        generated_at,
    )
    .record
}

/// Generates payroll for every active employee, in input order.
///
/// Inactive employees are skipped entirely: no record is produced for them.
pub fn generate_all_payrolls(
    employees: &[Employee],
    period: PayPeriod,
    leave_requests: &[LeaveRequest],
    allowances: &[Allowance],
    rules: &PayrollRules,
    generated_at: DateTime<Utc>,
) -> Vec<PayrollRecord> {
    let records: Vec<PayrollRecord> = employees
        .iter()
        .filter(|e| e.is_active)
        .map(|e| generate_payroll(e, period, leave_requests, allowances, rules, generated_at))
        .collect();

    info!(
        period = %period,
        employees = employees.len(),
        generated = records.len(),
        skipped_inactive = employees.len() - records.len(),
        "Batch payroll generation completed"
    );

    records
}
