//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll rules
//! from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollRules, RulesFile};

/// The rules file name inside a configuration directory.
pub const RULES_FILE_NAME: &str = "payroll.yaml";

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── payroll.yaml   # Allowance, tax and leave-deduction rules
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Tax rate: {}", loader.rules().tax_rate());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: PayrollRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `payroll.yaml` is missing (`ConfigNotFound`)
    /// - the file contains invalid YAML or is missing a field (`ConfigParseError`)
    /// - a value is out of range (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rules_path = path.as_ref().join(RULES_FILE_NAME);
        let file = Self::load_yaml::<RulesFile>(&rules_path)?;
        let rules = PayrollRules::try_from(file)?;

        tracing::info!(
            path = %rules_path.display(),
            hra_rate = %rules.hra_rate(),
            da_rate = %rules.da_rate(),
            tax_rate = %rules.tax_rate(),
            working_days = %rules.working_days_per_month(),
            "Loaded payroll rules"
        );

        Ok(Self { rules })
    }

    /// Wraps an in-memory rule set.
    pub fn from_rules(rules: PayrollRules) -> Self {
        Self { rules }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_rules(PayrollRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.rules(), &PayrollRules::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join(RULES_FILE_NAME), "hra_rate: [unterminated").unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_out_of_range_value_returns_invalid_config() {
        let dir = scratch_dir("invalid");
        fs::write(
            dir.join(RULES_FILE_NAME),
            "hra_rate: 0.4\nda_rate: 0.2\ntax_rate: 0.1\nworking_days_per_month: 0\n",
        )
        .unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_custom_rates() {
        let dir = scratch_dir("custom");
        fs::write(
            dir.join(RULES_FILE_NAME),
            "currency_symbol: \"Rs \"\nhra_rate: 0.5\nda_rate: 0.25\ntax_rate: 0.15\nworking_days_per_month: 26\n",
        )
        .unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.rules().hra_rate(), Decimal::new(5, 1));
        assert_eq!(loader.rules().working_days_per_month(), Decimal::from(26));
        assert_eq!(loader.rules().currency_symbol(), "Rs ");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_default_loader_uses_default_rules() {
        assert_eq!(ConfigLoader::default().rules(), &PayrollRules::default());
    }
}
