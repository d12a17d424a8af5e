//! Configuration loading and management for the payroll engine.
//!
//! This module loads the payroll rules (allowance fractions, tax rate and the
//! working-day convention) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("HRA rate: {}", config.rules().hra_rate());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, RULES_FILE_NAME};
pub use types::PayrollRules;
