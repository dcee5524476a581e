use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::payments::{calculate_total_interest, calculate_total_payment};
use crate::types::{SimulationId, StudentId};

/// stored simulation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub id: SimulationId,
    pub student_id: StudentId,
    pub total_amount: Money,
    pub installments_number: u32,
    /// monthly rate in percent, as entered
    pub interest_per_month: Decimal,
    pub monthly_installment_value: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Simulation {
    pub fn monthly_rate(&self) -> Rate {
        Rate::from_percent(self.interest_per_month)
    }

    pub fn total_payment(&self) -> Money {
        calculate_total_payment(self.monthly_installment_value, self.installments_number)
    }

    pub fn total_interest(&self) -> Money {
        calculate_total_interest(self.total_payment(), self.total_amount)
    }

    pub fn belongs_to(&self, student_id: &StudentId) -> bool {
        self.student_id == *student_id
    }
}

/// request body for creating a simulation
///
/// Fields are kept wide (signed installments, unbounded decimals) so that
/// out-of-policy input reaches the validator instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSimulationRequest {
    pub total_amount: Money,
    pub installments_number: i64,
    pub interest_per_month: Decimal,
}

impl CreateSimulationRequest {
    pub fn new(total_amount: Money, installments_number: i64, interest_per_month: Decimal) -> Self {
        Self {
            total_amount,
            installments_number,
            interest_per_month,
        }
    }
}

/// optional, inclusive bounds for narrowing a simulation list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationFilters {
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
    pub min_installments: Option<u32>,
    pub max_installments: Option<u32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl SimulationFilters {
    pub fn is_empty(&self) -> bool {
        *self == SimulationFilters::default()
    }

    pub fn matches(&self, simulation: &Simulation) -> bool {
        let amount = simulation.total_amount;
        let installments = simulation.installments_number;
        let created = simulation.created_at;

        self.min_amount.map_or(true, |min| amount >= min)
            && self.max_amount.map_or(true, |max| amount <= max)
            && self.min_installments.map_or(true, |min| installments >= min)
            && self.max_installments.map_or(true, |max| installments <= max)
            && self.start_date.map_or(true, |start| created >= start)
            && self.end_date.map_or(true, |end| created <= end)
    }

    pub fn apply(&self, simulations: Vec<Simulation>) -> Vec<Simulation> {
        simulations.into_iter().filter(|s| self.matches(s)).collect()
    }
}

/// dashboard aggregate over one student's simulations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_simulations: usize,
    pub total_amount: Money,
    pub average_installments: Decimal,
    pub average_interest: Decimal,
    pub recent_simulations: Vec<Simulation>,
}

impl SimulationSummary {
    /// `simulations` must already be ordered newest first
    pub fn from_simulations(simulations: &[Simulation], recent_limit: usize) -> Self {
        let total_simulations = simulations.len();

        let total_amount = simulations
            .iter()
            .map(|s| s.total_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        let (average_installments, average_interest) = if total_simulations == 0 {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let count = Decimal::from(total_simulations as u64);
            let installments: Decimal = simulations
                .iter()
                .map(|s| Decimal::from(s.installments_number))
                .sum();
            let interest: Decimal = simulations.iter().map(|s| s.interest_per_month).sum();
            ((installments / count).round_dp(2), (interest / count).round_dp(2))
        };

        Self {
            total_simulations,
            total_amount,
            average_installments,
            average_interest,
            recent_simulations: simulations.iter().take(recent_limit).cloned().collect(),
        }
    }
}

/// newest first; ties broken by id so listings are stable
pub fn sort_newest_first(simulations: &mut [Simulation]) {
    simulations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
