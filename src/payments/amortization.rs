use rust_decimal::Decimal;

use crate::decimal::{Money, Rate, RoundingPolicy};
use crate::errors::{FinancingError, Result};
use crate::payments::{LoanParameters, PaymentResult};

/// Fixed monthly payment for a fully amortizing loan (Price formula).
///
/// `PMT = principal × i / (1 − (1 + i)^−n)`, or `principal / n` when `i == 0`,
/// rounded half-up to cents.
///
/// Returns `None` for inputs outside the formula's domain: zero installments,
/// a rate at or below -100%, or intermediate values that overflow the decimal
/// range. Those are never coerced to a number.
pub fn compute_monthly_payment(
    principal: Money,
    monthly_rate: Rate,
    installment_count: u32,
) -> Option<Money> {
    AmortizationCalculator::default().monthly_payment(principal, monthly_rate, installment_count)
}

/// amortization calculator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmortizationCalculator {
    rounding: RoundingPolicy,
}

impl AmortizationCalculator {
    pub fn new(rounding: RoundingPolicy) -> Self {
        Self { rounding }
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// payment rounded to cents; `None` outside the formula's domain
    pub fn monthly_payment(
        &self,
        principal: Money,
        monthly_rate: Rate,
        installment_count: u32,
    ) -> Option<Money> {
        let exact = exact_payment(
            principal.as_decimal(),
            monthly_rate.as_decimal(),
            installment_count,
        )?;

        Some(Money::from_decimal(
            exact.round_dp_with_strategy(2, self.rounding.strategy()),
        ))
    }

    /// payment for parameters that already satisfy the loan invariants
    pub fn calculate(&self, params: &LoanParameters) -> Result<PaymentResult> {
        let monthly_payment = self
            .monthly_payment(params.principal(), params.monthly_rate(), params.installment_count())
            .ok_or_else(|| FinancingError::CalculationError {
                message: format!(
                    "payment undefined for principal {}, rate fraction {}, {} installments",
                    params.principal(),
                    params.monthly_rate().as_decimal(),
                    params.installment_count()
                ),
            })?;

        Ok(PaymentResult::new(params, monthly_payment))
    }
}

/// unrounded payment
fn exact_payment(principal: Decimal, rate: Decimal, installments: u32) -> Option<Decimal> {
    if installments == 0 {
        return None;
    }

    let periods = Decimal::from(installments);

    if rate.is_zero() {
        return principal.checked_div(periods);
    }

    let growth = Decimal::ONE.checked_add(rate)?;
    if growth <= Decimal::ZERO {
        return None;
    }

    // (1 + i)^-n taken as a power of the discount factor, which stays below one
    // for positive rates and so cannot overflow
    let discount = Decimal::ONE.checked_div(growth)?;
    let remaining = checked_powu(discount, installments)?;
    let denominator = Decimal::ONE - remaining;

    if denominator.is_zero() {
        // rate below decimal resolution; the zero-rate limit applies
        return principal.checked_div(periods);
    }

    principal.checked_mul(rate)?.checked_div(denominator)
}

/// exponentiation by squaring with overflow detection
fn checked_powu(base: Decimal, exp: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut base = base;
    let mut exp = exp;

    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.checked_mul(base)?;
        }
    }

    Some(result)
}
