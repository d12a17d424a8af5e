//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollRules};

/// Shared application state.
///
/// Holds only the loaded payroll rules; payroll data arrives with each request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Shorthand for the loaded payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        self.config.rules()
    }
}
