//! Allowance models.
//!
//! [`Allowance`] is the stored, admin-configured record for one employee.
//! [`AllowanceBreakdown`] is the resolved set of five figures that flows into
//! a payroll record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-employee configured allowances.
///
/// `hra` and `da` are snapshots derived from the base salary at the time the
/// record was saved. They are not refreshed when the salary alone changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// The employee this record belongs to; at most one record per employee.
    pub employee_id: String,
    /// Admin-entered travel allowance.
    pub travel_allowance: Decimal,
    /// Admin-entered medical allowance.
    pub medical_allowance: Decimal,
    /// Admin-entered washing allowance.
    pub washing_allowance: Decimal,
    /// House Rent Allowance snapshot.
    pub hra: Decimal,
    /// Dearness Allowance snapshot.
    pub da: Decimal,
}

/// The five allowance figures applied to one payroll record.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AllowanceBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = AllowanceBreakdown {
///     travel: Decimal::from(1000),
///     medical: Decimal::from(500),
///     washing: Decimal::from(200),
///     hra: Decimal::from(26000),
///     da: Decimal::from(13000),
/// };
///
/// assert_eq!(breakdown.total(), Decimal::from(40700));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// Travel allowance.
    pub travel: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Washing allowance.
    pub washing: Decimal,
    /// House Rent Allowance.
    pub hra: Decimal,
    /// Dearness Allowance.
    pub da: Decimal,
}

impl AllowanceBreakdown {
    /// Sum of all five allowances.
    pub fn total(&self) -> Decimal {
        self.travel + self.medical + self.washing + self.hra + self.da
    }
}

impl From<&Allowance> for AllowanceBreakdown {
    fn from(allowance: &Allowance) -> Self {
        Self {
            travel: allowance.travel_allowance,
            medical: allowance.medical_allowance,
            washing: allowance.washing_allowance,
            hra: allowance.hra,
            da: allowance.da,
        }
    }
}
