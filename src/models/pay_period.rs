//! Pay period model.
//!
//! A pay period is one calendar month of one year. All payroll records and
//! leave attribution are keyed by it.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A (month, year) payroll cycle.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(3, 2025).unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
/// assert_eq!(period.to_string(), "March 2025");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The year of the period.
    pub year: i32,
    /// The month of the period, 1 through 12.
    pub month: u32,
}

impl PayPeriod {
    /// Creates a pay period, rejecting months outside 1..=12.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod { month });
        }
        Ok(Self { year, month })
    }

    /// Returns the period a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Checks if a date falls inside this calendar month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The English month name, e.g. "March".
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Returns the English name of a month number, or `"Unknown"` outside 1..=12.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}
