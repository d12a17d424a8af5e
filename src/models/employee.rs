//! Employee model.
//!
//! The engine only reads employees; they are created and edited elsewhere.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee whose pay is computed by the engine.
///
/// # Example
///
/// ```
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
/// assert_eq!(employee.full_name(), "Asha Rao");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The department the employee belongs to.
    #[serde(default)]
    pub department: String,
    /// The employee's job title.
    #[serde(default)]
    pub position: String,
    /// Monthly base salary, expected to be non-negative.
    pub base_salary: Decimal,
    /// Whether the employee is included in batch payroll runs.
    pub is_active: bool,
}

impl Employee {
    /// Returns the employee's display name, `"{first} {last}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
