//! Payroll record model.
//!
//! A [`PayrollRecord`] is the immutable snapshot of one employee's pay for one
//! [`PayPeriod`]. Its ID is derived from the employee and period, so saving a
//! regenerated record replaces the earlier one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AllowanceBreakdown, PayPeriod};

/// Deductions applied to gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Approved leave days attributed to the period.
    pub leave_days: u32,
    /// Salary withheld for those leave days.
    pub leave_deduction: Decimal,
    /// Flat tax on gross salary.
    pub tax: Decimal,
}

impl Deductions {
    /// Leave deduction plus tax.
    pub fn total(&self) -> Decimal {
        self.leave_deduction + self.tax
    }
}

/// One employee's pay for one period.
///
/// `gross_salary == base_salary + allowances.total()` and
/// `net_salary == gross_salary - deductions.total()`. Net salary is not
/// clamped and may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// `"payroll-{employee_id}-{month}-{year}"`.
    pub id: String,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The employee's name at generation time.
    pub employee_name: String,
    /// Month of the period, stored as the numeral string "1".."12".
    #[serde(with = "month_numeral")]
    pub month: u32,
    /// Year of the period.
    pub year: i32,
    /// Base salary copied from the employee at generation time.
    pub base_salary: Decimal,
    /// Allowances applied.
    pub allowances: AllowanceBreakdown,
    /// Deductions applied.
    pub deductions: Deductions,
    /// Base salary plus allowances.
    pub gross_salary: Decimal,
    /// Gross salary minus deductions.
    pub net_salary: Decimal,
    /// When the record was generated.
    pub generated_date: DateTime<Utc>,
}

impl PayrollRecord {
    /// Builds the repository key for an employee's record in a period.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{PayPeriod, PayrollRecord};
    ///
    /// let period = PayPeriod::new(3, 2025).unwrap();
    /// assert_eq!(PayrollRecord::derive_id("emp-001", period), "payroll-emp-001-3-2025");
    /// ```
    pub fn derive_id(employee_id: &str, period: PayPeriod) -> String {
        format!("payroll-{}-{}-{}", employee_id, period.month, period.year)
    }

    /// The period this record covers.
    pub fn period(&self) -> PayPeriod {
        PayPeriod {
            year: self.year,
            month: self.month,
        }
    }

    /// Checks if this record covers the given period.
    pub fn is_for(&self, period: PayPeriod) -> bool {
        self.year == period.year && self.month == period.month
    }
}

/// Serializes the month as a string numeral and accepts either a string or a
/// number when reading.
mod month_numeral {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeral {
        Text(String),
        Number(u32),
    }

    pub fn serialize<S: Serializer>(month: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&month.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Numeral::deserialize(deserializer)? {
            Numeral::Number(month) => Ok(month),
            Numeral::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid month numeral '{}'", text))),
        }
    }
}
