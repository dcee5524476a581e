use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, RoundingPolicy};
use crate::errors::{FinancingError, Result};

/// crate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingConfig {
    pub policy: SimulationPolicy,
    pub rounding: RoundingPolicy,
    pub logging: LoggingConfig,
    /// how many simulations a summary lists as recent
    pub recent_limit: usize,
}

/// application bounds on simulation inputs, all inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationPolicy {
    pub min_amount: Money,
    pub max_amount: Money,
    pub min_installments: u32,
    pub max_installments: u32,
    /// monthly rate bounds, in percent
    pub min_rate_percent: Decimal,
    pub max_rate_percent: Decimal,
}

/// logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// env-filter directive used when RUST_LOG is unset
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl Default for FinancingConfig {
    fn default() -> Self {
        Self {
            policy: SimulationPolicy::default(),
            rounding: RoundingPolicy::HalfUp,
            logging: LoggingConfig::default(),
            recent_limit: 5,
        }
    }
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            min_amount: Money::from_major(1_000),
            max_amount: Money::from_major(1_000_000),
            min_installments: 1,
            max_installments: 360,
            min_rate_percent: dec!(0),
            max_rate_percent: dec!(50),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "financing_simulator=info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl FinancingConfig {
    /// parse from toml; missing sections fall back to defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: FinancingConfig =
            toml::from_str(s).map_err(|e| FinancingError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// load from a toml file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| FinancingError::InvalidConfiguration {
                message: format!("cannot read {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;

        if self.recent_limit == 0 {
            return Err(FinancingError::InvalidConfiguration {
                message: "recent_limit must be at least 1".to_string(),
            });
        }

        if self.logging.filter.trim().is_empty() {
            return Err(FinancingError::InvalidConfiguration {
                message: "logging filter cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl SimulationPolicy {
    pub fn validate(&self) -> Result<()> {
        if !self.min_amount.is_positive() {
            return Err(FinancingError::InvalidConfiguration {
                message: format!("min_amount must be positive, got {}", self.min_amount),
            });
        }

        if self.min_amount > self.max_amount {
            return Err(FinancingError::InvalidConfiguration {
                message: format!(
                    "amount bounds inverted: {} > {}",
                    self.min_amount, self.max_amount
                ),
            });
        }

        if self.min_installments == 0 {
            return Err(FinancingError::InvalidConfiguration {
                message: "min_installments must be at least 1".to_string(),
            });
        }

        if self.min_installments > self.max_installments {
            return Err(FinancingError::InvalidConfiguration {
                message: format!(
                    "installment bounds inverted: {} > {}",
                    self.min_installments, self.max_installments
                ),
            });
        }

        if self.min_rate_percent < Decimal::ZERO {
            return Err(FinancingError::InvalidConfiguration {
                message: format!(
                    "min_rate_percent cannot be negative, got {}",
                    self.min_rate_percent
                ),
            });
        }

        if self.min_rate_percent > self.max_rate_percent {
            return Err(FinancingError::InvalidConfiguration {
                message: format!(
                    "rate bounds inverted: {} > {}",
                    self.min_rate_percent, self.max_rate_percent
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_application_bounds() {
        let policy = SimulationPolicy::default();
        assert_eq!(policy.min_amount, Money::from_major(1_000));
        assert_eq!(policy.max_amount, Money::from_major(1_000_000));
        assert_eq!(policy.min_installments, 1);
        assert_eq!(policy.max_installments, 360);
        assert_eq!(policy.max_rate_percent, dec!(50));
        assert!(FinancingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FinancingConfig::from_toml_str(
            r#"
            rounding = "half_even"
            recent_limit = 3

            [policy]
            max_installments = 120
            max_rate_percent = "10"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.rounding, RoundingPolicy::HalfEven);
        assert_eq!(config.recent_limit, 3);
        assert_eq!(config.policy.max_installments, 120);
        assert_eq!(config.policy.max_rate_percent, dec!(10));
        assert_eq!(config.policy.min_amount, Money::from_major(1_000));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "financing_simulator=info");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = FinancingConfig::from_toml_str("").unwrap();
        assert_eq!(config, FinancingConfig::default());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = FinancingConfig::from_toml_str(
            r#"
            [policy]
            min_installments = 400
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, FinancingError::InvalidConfiguration { .. }));

        let policy = SimulationPolicy {
            min_amount: Money::ZERO,
            ..SimulationPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = FinancingConfig::from_toml_str("recent_limit = \"many\"").unwrap_err();
        assert!(matches!(err, FinancingError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = FinancingConfig::from_file("/nonexistent/financing.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
