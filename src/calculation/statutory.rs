//! Statutory payroll formulas.
//!
//! HRA, DA, tax and leave deduction are each a rate applied to a salary
//! figure and rounded half-up to a whole currency unit.

use rust_decimal::Decimal;

/// Rounds half-up to the nearest whole currency unit.
///
/// Halves round toward positive infinity, so `2.5` becomes `3` and `-2.5`
/// becomes `-2`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up(Decimal::from_str("10833.33").unwrap()), Decimal::from(10833));
/// assert_eq!(round_half_up(Decimal::from_str("2.5").unwrap()), Decimal::from(3));
/// assert_eq!(round_half_up(Decimal::from_str("-2.5").unwrap()), Decimal::from(-2));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// House Rent Allowance: `round(rate * base_salary)`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_hra;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_hra(Decimal::from(65000), Decimal::new(40, 2)), Decimal::from(26000));
/// ```
pub fn calculate_hra(base_salary: Decimal, rate: Decimal) -> Decimal {
    round_half_up(base_salary * rate)
}

/// Dearness Allowance: `round(rate * base_salary)`.
pub fn calculate_da(base_salary: Decimal, rate: Decimal) -> Decimal {
    round_half_up(base_salary * rate)
}

/// Flat tax: `round(rate * gross_salary)`.
pub fn calculate_tax(gross_salary: Decimal, rate: Decimal) -> Decimal {
    round_half_up(gross_salary * rate)
}

/// Leave deduction: `round(base_salary / working_days * leave_days)`.
///
/// Salary is treated as earned over a flat `working_days` month regardless of
/// the calendar. The product is formed before the division so that exact
/// halves are not lost to a truncated daily rate.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_leave_deduction;
/// use rust_decimal::Decimal;
///
/// let deduction = calculate_leave_deduction(Decimal::from(65000), 5, Decimal::from(30));
/// assert_eq!(deduction, Decimal::from(10833));
/// ```
pub fn calculate_leave_deduction(
    base_salary: Decimal,
    leave_days: u32,
    working_days: Decimal,
) -> Decimal {
    if leave_days == 0 {
        return Decimal::ZERO;
    }
    round_half_up(base_salary * Decimal::from(leave_days) / working_days)
}
