//! Payroll Computation and Aggregation Engine
//!
//! This crate turns an employee's base salary, configured allowances and
//! approved leave into a monthly payroll record, and rolls many records into
//! monthly, yearly, per-employee and leave-status reports.
//!
//! The calculation and reporting functions are pure and take every
//! collection they need as a slice. [`office::PayrollOffice`] layers
//! repository-backed workflows on top, and [`api`] exposes the functions over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod office;
pub mod report;
pub mod store;
