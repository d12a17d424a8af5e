//! Configuration types for payroll rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the `payroll.yaml` configuration file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The `payroll.yaml` file structure, before validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RulesFile {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    pub hra_rate: Decimal,
    pub da_rate: Decimal,
    pub tax_rate: Decimal,
    pub working_days_per_month: Decimal,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// Validated payroll rules.
///
/// The defaults are the statutory figures: HRA 40% and DA 20% of base salary,
/// tax 10% of gross, and a flat 30-day month for leave deductions.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.hra_rate(), Decimal::new(40, 2));
/// assert_eq!(rules.working_days_per_month(), Decimal::from(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRules {
    currency_symbol: String,
    hra_rate: Decimal,
    da_rate: Decimal,
    tax_rate: Decimal,
    working_days_per_month: Decimal,
}

impl PayrollRules {
    /// Creates a validated rule set.
    ///
    /// Returns `InvalidConfig` if any rate is negative or the working-day
    /// count is not positive.
    pub fn new(
        hra_rate: Decimal,
        da_rate: Decimal,
        tax_rate: Decimal,
        working_days_per_month: Decimal,
    ) -> EngineResult<Self> {
        for (field, rate) in [
            ("hra_rate", hra_rate),
            ("da_rate", da_rate),
            ("tax_rate", tax_rate),
        ] {
            if rate < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", rate),
                });
            }
        }

        if working_days_per_month <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "working_days_per_month".to_string(),
                message: format!("must be greater than zero, got {}", working_days_per_month),
            });
        }

        Ok(Self {
            currency_symbol: default_currency_symbol(),
            hra_rate,
            da_rate,
            tax_rate,
            working_days_per_month,
        })
    }

    /// Replaces the currency symbol used in rendered reports.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Fraction of base salary paid as House Rent Allowance.
    pub fn hra_rate(&self) -> Decimal {
        self.hra_rate
    }

    /// Fraction of base salary paid as Dearness Allowance.
    pub fn da_rate(&self) -> Decimal {
        self.da_rate
    }

    /// Fraction of gross salary withheld as tax.
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Days per month used to derive a daily salary.
    pub fn working_days_per_month(&self) -> Decimal {
        self.working_days_per_month
    }

    /// Currency symbol printed in reports.
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            hra_rate: Decimal::new(40, 2),
            da_rate: Decimal::new(20, 2),
            tax_rate: Decimal::new(10, 2),
            working_days_per_month: Decimal::from(30),
        }
    }
}

impl TryFrom<RulesFile> for PayrollRules {
    type Error = EngineError;

    fn try_from(file: RulesFile) -> EngineResult<Self> {
        Ok(PayrollRules::new(
            file.hra_rate,
            file.da_rate,
            file.tax_rate,
            file.working_days_per_month,
        )?
        .with_currency_symbol(file.currency_symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_statutory_figures() {
        let rules = PayrollRules::default();
        assert_eq!(rules.hra_rate(), Decimal::new(4, 1));
        assert_eq!(rules.da_rate(), Decimal::new(2, 1));
        assert_eq!(rules.tax_rate(), Decimal::new(1, 1));
        assert_eq!(rules.working_days_per_month(), Decimal::from(30));
        assert_eq!(rules.currency_symbol(), "$");
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let result = PayrollRules::new(
            Decimal::new(-1, 1),
            Decimal::new(2, 1),
            Decimal::new(1, 1),
            Decimal::from(30),
        );

        match result {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "hra_rate"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_working_days_is_rejected() {
        let result = PayrollRules::new(
            Decimal::new(4, 1),
            Decimal::new(2, 1),
            Decimal::new(1, 1),
            Decimal::ZERO,
        );

        match result {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "working_days_per_month")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_rates_are_allowed() {
        let rules = PayrollRules::new(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::from(22),
        )
        .unwrap();
        assert_eq!(rules.tax_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_rules_file_parses_from_yaml() {
        let yaml = "hra_rate: 0.40\nda_rate: 0.20\ntax_rate: 0.10\nworking_days_per_month: 30\n";
        let file: RulesFile = serde_yaml::from_str(yaml).unwrap();
        let rules = PayrollRules::try_from(file).unwrap();
        assert_eq!(rules, PayrollRules::default());
    }
}
