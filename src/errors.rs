use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::{SimulationId, StudentId};

#[derive(Error, Debug)]
pub enum FinancingError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid installment count: {count}")]
    InvalidInstallmentCount {
        count: i64,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("simulation rejected: {}", .errors.join("; "))]
    ValidationFailed {
        errors: Vec<String>,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("simulation not found: {id}")]
    SimulationNotFound {
        id: SimulationId,
    },

    #[error("simulation {id} does not belong to student {student_id}")]
    SimulationNotOwned {
        id: SimulationId,
        student_id: StudentId,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("repository error: {message}")]
    Repository {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FinancingError {
    /// messages carried by a validation failure, empty otherwise
    pub fn validation_errors(&self) -> &[String] {
        match self {
            FinancingError::ValidationFailed { errors } => errors,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, FinancingError>;
