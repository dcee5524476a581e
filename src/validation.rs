use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SimulationPolicy;
use crate::decimal::Money;

/// a single broken policy rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    AmountOutOfRange {
        amount: Money,
        min: Money,
        max: Money,
    },
    InstallmentCountOutOfRange {
        count: i64,
        min: u32,
        max: u32,
    },
    InterestRateOutOfRange {
        rate_percent: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

impl Violation {
    /// human readable sentence for display
    pub fn message(&self) -> String {
        match self {
            Violation::AmountOutOfRange { min, max, .. } => {
                format!("Total amount must be between {} and {}.", min, max)
            }
            Violation::InstallmentCountOutOfRange { min, max, .. } => {
                format!("Number of installments must be between {} and {}.", min, max)
            }
            Violation::InterestRateOutOfRange { min, max, .. } => {
                format!(
                    "Monthly interest rate must be between {}% and {}%.",
                    min.normalize(),
                    max.normalize()
                )
            }
        }
    }
}

/// result of validating simulation inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
    #[serde(skip)]
    violations: Vec<Violation>,
}

impl ValidationOutcome {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            errors: violations.iter().map(Violation::message).collect(),
            violations,
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// checks raw inputs against the simulation policy
///
/// Every rule is evaluated; violations are reported in rule order
/// (amount, installments, rate) so callers can show them all at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputValidator {
    policy: SimulationPolicy,
}

impl InputValidator {
    pub fn new(policy: SimulationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SimulationPolicy {
        &self.policy
    }

    /// `installment_count` is signed so out-of-range input from callers can be reported
    pub fn validate(
        &self,
        principal: Money,
        installment_count: i64,
        monthly_rate_percent: Decimal,
    ) -> ValidationOutcome {
        let policy = &self.policy;
        let mut violations = Vec::new();

        if principal < policy.min_amount || principal > policy.max_amount {
            violations.push(Violation::AmountOutOfRange {
                amount: principal,
                min: policy.min_amount,
                max: policy.max_amount,
            });
        }

        if installment_count < i64::from(policy.min_installments)
            || installment_count > i64::from(policy.max_installments)
        {
            violations.push(Violation::InstallmentCountOutOfRange {
                count: installment_count,
                min: policy.min_installments,
                max: policy.max_installments,
            });
        }

        if monthly_rate_percent < policy.min_rate_percent
            || monthly_rate_percent > policy.max_rate_percent
        {
            violations.push(Violation::InterestRateOutOfRange {
                rate_percent: monthly_rate_percent,
                min: policy.min_rate_percent,
                max: policy.max_rate_percent,
            });
        }

        ValidationOutcome::from_violations(violations)
    }
}

/// validate against the default application policy
pub fn validate_simulation_inputs(
    principal: Money,
    installment_count: i64,
    monthly_rate_percent: Decimal,
) -> ValidationOutcome {
    InputValidator::default().validate(principal, installment_count, monthly_rate_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_inputs() {
        let outcome = validate_simulation_inputs(Money::from_major(50_000), 60, dec!(2));
        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
        assert!(outcome.violations().is_empty());
    }

    #[test]
    fn test_zero_amount() {
        let outcome = validate_simulation_inputs(Money::ZERO, 60, dec!(2));
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors, vec!["Total amount must be between 1000 and 1000000.".to_string()]);
        assert!(matches!(
            outcome.violations()[0],
            Violation::AmountOutOfRange { .. }
        ));
    }

    #[test]
    fn test_amount_above_ceiling() {
        let outcome = validate_simulation_inputs(Money::from_major(2_000_000), 60, dec!(2));
        assert!(!outcome.is_valid);
        assert_eq!(outcome.violations().len(), 1);
    }

    #[test]
    fn test_multiple_violations_in_rule_order() {
        let outcome = validate_simulation_inputs(Money::from_major(-100), 0, dec!(-5));
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 3);
        assert!(matches!(outcome.violations()[0], Violation::AmountOutOfRange { .. }));
        assert!(matches!(
            outcome.violations()[1],
            Violation::InstallmentCountOutOfRange { count: 0, .. }
        ));
        assert!(matches!(
            outcome.violations()[2],
            Violation::InterestRateOutOfRange { .. }
        ));
    }

    #[test]
    fn test_installment_violation_only() {
        let outcome = validate_simulation_inputs(Money::from_major(50_000), 0, dec!(2));
        assert!(!outcome.is_valid);
        assert_eq!(
            outcome.errors,
            vec!["Number of installments must be between 1 and 360.".to_string()]
        );
    }

    #[test]
    fn test_rate_violation_only() {
        let outcome = validate_simulation_inputs(Money::from_major(50_000), 60, dec!(60));
        assert!(!outcome.is_valid);
        assert_eq!(
            outcome.errors,
            vec!["Monthly interest rate must be between 0% and 50%.".to_string()]
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let validator = InputValidator::default();
        assert!(validator.validate(Money::from_major(1_000), 1, dec!(0)).is_valid);
        assert!(validator.validate(Money::from_major(1_000_000), 360, dec!(50)).is_valid);
        assert!(!validator.validate(Money::from_str_exact("999.99").unwrap(), 1, dec!(0)).is_valid);
        assert!(!validator.validate(Money::from_major(1_000), 361, dec!(0)).is_valid);
        assert!(!validator.validate(Money::from_major(1_000), 1, dec!(50.01)).is_valid);
    }

    #[test]
    fn test_custom_policy() {
        let validator = InputValidator::new(SimulationPolicy {
            max_installments: 120,
            ..SimulationPolicy::default()
        });
        let outcome = validator.validate(Money::from_major(50_000), 240, dec!(2));
        assert_eq!(
            outcome.errors,
            vec!["Number of installments must be between 1 and 120.".to_string()]
        );
    }
}
