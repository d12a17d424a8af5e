//! Allowance resolution functionality.
//!
//! This module decides which allowance figures apply to an employee's
//! payroll: the stored record if one exists, otherwise zero discretionary
//! allowances with HRA and DA derived from the current base salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::models::{Allowance, AllowanceBreakdown, AuditStep, Employee};

use super::statutory::{calculate_da, calculate_hra};

/// Where a resolved set of allowances came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceSource {
    /// Copied verbatim from the employee's stored allowance record.
    Stored,
    /// Synthesized because no record exists for the employee.
    Derived,
}

/// The result of resolving allowances, including the figures and audit step.
#[derive(Debug, Clone)]
pub struct AllowanceResolution {
    /// The allowance figures to apply.
    pub allowances: AllowanceBreakdown,
    /// Whether the figures were stored or derived.
    pub source: AllowanceSource,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves the allowances that apply to an employee.
///
/// If `stored_allowances` holds a record for the employee, its five figures
/// are used verbatim, including HRA and DA snapshots that may predate a salary
/// change. Otherwise travel, medical and washing are zero and HRA/DA are
/// derived from the employee's current base salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{AllowanceSource, resolve_allowance};
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::Employee;
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
/// let result = resolve_allowance(&employee, &[], &PayrollRules::default(), 1);
///
/// assert_eq!(result.source, AllowanceSource::Derived);
/// assert_eq!(result.allowances.hra, Decimal::from(26000));
/// assert_eq!(result.allowances.da, Decimal::from(13000));
/// ```
pub fn resolve_allowance(
    employee: &Employee,
    stored_allowances: &[Allowance],
    rules: &PayrollRules,
    step_number: u32,
) -> AllowanceResolution {
    let stored = stored_allowances
        .iter()
        .find(|a| a.employee_id == employee.id);

    let (allowances, source, reasoning) = match stored {
        Some(allowance) => (
            AllowanceBreakdown::from(allowance),
            AllowanceSource::Stored,
            "Stored allowance record found - figures applied verbatim".to_string(),
        ),
        None => {
            let hra = calculate_hra(employee.base_salary, rules.hra_rate());
            let da = calculate_da(employee.base_salary, rules.da_rate());
            let reasoning = format!(
                "No stored allowance record - HRA {} x ${} = ${}, DA {} x ${} = ${}",
                rules.hra_rate().normalize(),
                employee.base_salary.normalize(),
                hra.normalize(),
                rules.da_rate().normalize(),
                employee.base_salary.normalize(),
                da.normalize()
            );
            (
                AllowanceBreakdown {
                    travel: Decimal::ZERO,
                    medical: Decimal::ZERO,
                    washing: Decimal::ZERO,
                    hra,
                    da,
                },
                AllowanceSource::Derived,
                reasoning,
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowance_resolution".to_string(),
        rule_name: "Allowance Resolution".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "base_salary": employee.base_salary.normalize().to_string(),
            "has_stored_allowance": stored.is_some()
        }),
        output: serde_json::json!({
            "source": source,
            "travel": allowances.travel.normalize().to_string(),
            "medical": allowances.medical.normalize().to_string(),
            "washing": allowances.washing.normalize().to_string(),
            "hra": allowances.hra.normalize().to_string(),
            "da": allowances.da.normalize().to_string(),
            "total": allowances.total().normalize().to_string()
        }),
        reasoning,
    };

    AllowanceResolution {
        allowances,
        source,
        audit_step,
    }
}

/// Builds the allowance record saved when an admin edits allowances.
///
/// HRA and DA are always recomputed from the employee's current base salary
/// and stored alongside the admin-entered figures.
pub fn configure_allowance(
    employee: &Employee,
    travel_allowance: Decimal,
    medical_allowance: Decimal,
    washing_allowance: Decimal,
    rules: &PayrollRules,
) -> Allowance {
    Allowance {
        employee_id: employee.id.clone(),
        travel_allowance,
        medical_allowance,
        washing_allowance,
        hra: calculate_hra(employee.base_salary, rules.hra_rate()),
        da: calculate_da(employee.base_salary, rules.da_rate()),
    }
}
