//! Calculation logic for the payroll engine.
//!
//! This module contains the statutory formulas (HRA, DA, flat tax, leave
//! deduction), allowance resolution, approved-leave aggregation, and payroll
//! generation for a single employee or a batch of active employees.

mod allowance_resolver;
mod leave_aggregator;
mod payroll_generator;
mod statutory;

pub use allowance_resolver::{
    AllowanceResolution, AllowanceSource, configure_allowance, resolve_allowance,
};
pub use leave_aggregator::{LeaveAggregation, aggregate_leave, approved_leave_days};
pub use payroll_generator::{
    NEGATIVE_NET_SALARY, PayrollCalculation, explain_payroll, generate_all_payrolls,
    generate_payroll,
};
pub use statutory::{
    calculate_da, calculate_hra, calculate_leave_deduction, calculate_tax, round_half_up,
};
