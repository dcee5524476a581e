/// serializable views handed to presentation layers
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::simulation::{CreateSimulationRequest, Simulation, SimulationSummary};
use crate::types::{SimulationId, StudentId};

/// a simulation with its derived totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationView {
    pub id: SimulationId,
    pub student_id: StudentId,
    pub total_amount: Money,
    pub installments_number: u32,
    pub interest_per_month: Decimal,
    pub monthly_installment_value: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SimulationView {
    pub fn from_simulation(simulation: &Simulation) -> Self {
        SimulationView {
            id: simulation.id,
            student_id: simulation.student_id,
            total_amount: simulation.total_amount,
            installments_number: simulation.installments_number,
            interest_per_month: simulation.interest_per_month,
            monthly_installment_value: simulation.monthly_installment_value,
            total_payment: simulation.total_payment(),
            total_interest: simulation.total_interest(),
            created_at: simulation.created_at,
            updated_at: simulation.updated_at,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub total_simulations: usize,
    pub total_amount: Money,
    pub average_installments: Decimal,
    pub average_interest: Decimal,
    pub recent_simulations: Vec<SimulationView>,
}

impl SummaryView {
    pub fn from_summary(summary: &SimulationSummary) -> Self {
        SummaryView {
            total_simulations: summary.total_simulations,
            total_amount: summary.total_amount,
            average_installments: summary.average_installments,
            average_interest: summary.average_interest,
            recent_simulations: summary
                .recent_simulations
                .iter()
                .map(SimulationView::from_simulation)
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// list of simulations as a json array
pub fn simulations_to_json(simulations: &[Simulation]) -> Result<String> {
    let views: Vec<SimulationView> = simulations.iter().map(SimulationView::from_simulation).collect();
    Ok(serde_json::to_string(&views)?)
}

/// parse a create-simulation body (`total_amount`, `installments_number`, `interest_per_month`)
pub fn parse_create_request(body: &str) -> Result<CreateSimulationRequest> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FinancingError;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn simulation() -> Simulation {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Simulation {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            total_amount: Money::from_major(10_000),
            installments_number: 12,
            interest_per_month: dec!(2),
            monthly_installment_value: Money::from_str_exact("945.60").unwrap(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_view_carries_totals() {
        let view = SimulationView::from_simulation(&simulation());
        let json: serde_json::Value = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["total_amount"], "10000");
        assert_eq!(json["monthly_installment_value"], "945.60");
        assert_eq!(json["total_payment"], "11347.20");
        assert_eq!(json["total_interest"], "1347.20");
        assert_eq!(json["installments_number"], 12);
        assert_eq!(json["created_at"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn test_view_round_trips() {
        let view = SimulationView::from_simulation(&simulation());
        let parsed: SimulationView = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, view);
    }

    #[test]
    fn test_summary_view() {
        let sims = vec![simulation(), simulation()];
        let summary = SimulationSummary::from_simulations(&sims, 1);
        let view = SummaryView::from_summary(&summary);

        assert_eq!(view.total_simulations, 2);
        assert_eq!(view.recent_simulations.len(), 1);
        assert_eq!(view.recent_simulations[0].total_payment, Money::from_str_exact("11347.20").unwrap());

        let json: serde_json::Value = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["total_amount"], "20000");
    }

    #[test]
    fn test_simulations_to_json() {
        let json = simulations_to_json(&[simulation()]).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["interest_per_month"], "2");
    }

    #[test]
    fn test_parse_create_request() {
        let request = parse_create_request(
            r#"{"total_amount": "10000.00", "installments_number": 12, "interest_per_month": "2"}"#,
        )
        .unwrap();

        assert_eq!(request.total_amount, Money::from_major(10_000));
        assert_eq!(request.installments_number, 12);
        assert_eq!(request.interest_per_month, dec!(2));
    }

    #[test]
    fn test_malformed_body_is_serialization_error() {
        let err = parse_create_request(r#"{"total_amount": "10000.00""#).unwrap_err();
        assert!(matches!(err, FinancingError::Serialization(_)));
        assert!(err.to_string().starts_with("serialization error"));
    }
}
