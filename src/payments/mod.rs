pub mod amortization;

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{FinancingError, Result};

pub use amortization::{compute_monthly_payment, AmortizationCalculator};

/// loan inputs to the payment calculation
///
/// Holds only the invariants intrinsic to the formula. Application bounds
/// (amount, installment and rate ceilings) belong to the input validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanParameters {
    principal: Money,
    installment_count: u32,
    monthly_rate: Rate,
}

impl LoanParameters {
    pub fn new(principal: Money, installment_count: u32, monthly_rate: Rate) -> Result<Self> {
        if !principal.is_positive() {
            return Err(FinancingError::InvalidPrincipal { amount: principal });
        }

        if installment_count == 0 {
            return Err(FinancingError::InvalidInstallmentCount {
                count: i64::from(installment_count),
            });
        }

        if monthly_rate.is_negative() {
            return Err(FinancingError::InvalidInterestRate { rate: monthly_rate });
        }

        Ok(Self {
            principal,
            installment_count,
            monthly_rate,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn installment_count(&self) -> u32 {
        self.installment_count
    }

    pub fn monthly_rate(&self) -> Rate {
        self.monthly_rate
    }
}

/// payment calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub monthly_payment: Money,
    pub installment_count: u32,
    pub principal: Money,
}

impl PaymentResult {
    pub fn new(params: &LoanParameters, monthly_payment: Money) -> Self {
        Self {
            monthly_payment,
            installment_count: params.installment_count(),
            principal: params.principal(),
        }
    }

    /// sum of all installments
    pub fn total_payment(&self) -> Money {
        calculate_total_payment(self.monthly_payment, self.installment_count)
    }

    /// amount paid above the principal
    pub fn total_interest(&self) -> Money {
        calculate_total_interest(self.total_payment(), self.principal)
    }
}

pub fn calculate_total_payment(monthly_payment: Money, installment_count: u32) -> Money {
    monthly_payment.times(installment_count)
}

pub fn calculate_total_interest(total_payment: Money, principal: Money) -> Money {
    total_payment - principal
}
