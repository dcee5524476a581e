use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FinancingConfig;
use crate::decimal::Rate;
use crate::errors::{FinancingError, Result};
use crate::events::{Event, EventStore};
use crate::payments::{AmortizationCalculator, LoanParameters, PaymentResult};
use crate::repository::SimulationRepository;
use crate::simulation::{
    sort_newest_first, CreateSimulationRequest, Simulation, SimulationFilters, SimulationSummary,
};
use crate::types::{SimulationId, StudentId};
use crate::validation::{InputValidator, ValidationOutcome};

/// advisory result for live form previews; nothing is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationPreview {
    pub outcome: ValidationOutcome,
    pub payment: Option<PaymentResult>,
}

/// creates, lists and summarizes simulations on top of a repository
pub struct SimulationService<R: SimulationRepository> {
    repository: R,
    validator: InputValidator,
    calculator: AmortizationCalculator,
    recent_limit: usize,
    events: EventStore,
}

impl<R: SimulationRepository> SimulationService<R> {
    /// service with the default application policy
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, &FinancingConfig::default())
    }

    pub fn with_config(repository: R, config: &FinancingConfig) -> Self {
        Self {
            repository,
            validator: InputValidator::new(config.policy.clone()),
            calculator: AmortizationCalculator::new(config.rounding),
            recent_limit: config.recent_limit,
            events: EventStore::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// validate, price and store a new simulation
    pub fn create(
        &mut self,
        student_id: StudentId,
        request: &CreateSimulationRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<Simulation> {
        let now = time_provider.now();

        let outcome = self.validator.validate(
            request.total_amount,
            request.installments_number,
            request.interest_per_month,
        );

        if !outcome.is_valid {
            warn!(%student_id, errors = ?outcome.errors, "simulation rejected");
            self.events.emit(Event::SimulationRejected {
                student_id,
                errors: outcome.errors.clone(),
                timestamp: now,
            });
            return Err(FinancingError::ValidationFailed {
                errors: outcome.errors,
            });
        }

        let params = loan_parameters(request)?;
        let payment = self.calculator.calculate(&params)?;

        let simulation = Simulation {
            id: Uuid::new_v4(),
            student_id,
            total_amount: params.principal(),
            installments_number: params.installment_count(),
            interest_per_month: request.interest_per_month,
            monthly_installment_value: payment.monthly_payment,
            created_at: now,
            updated_at: now,
        };

        self.repository.save(&simulation)?;

        info!(
            simulation_id = %simulation.id,
            %student_id,
            total_amount = %simulation.total_amount,
            installments = simulation.installments_number,
            monthly_installment = %simulation.monthly_installment_value,
            "simulation created"
        );

        self.events.emit(Event::SimulationCreated {
            simulation_id: simulation.id,
            student_id,
            total_amount: simulation.total_amount,
            installments_number: simulation.installments_number,
            monthly_installment_value: simulation.monthly_installment_value,
            timestamp: now,
        });

        Ok(simulation)
    }

    /// validate and price without storing
    pub fn preview(&self, request: &CreateSimulationRequest) -> Result<SimulationPreview> {
        let outcome = self.validator.validate(
            request.total_amount,
            request.installments_number,
            request.interest_per_month,
        );

        let payment = if outcome.is_valid {
            let params = loan_parameters(request)?;
            Some(self.calculator.calculate(&params)?)
        } else {
            None
        };

        Ok(SimulationPreview { outcome, payment })
    }

    /// the student's simulations, newest first
    pub fn list_by_student(&self, student_id: StudentId) -> Result<Vec<Simulation>> {
        let mut simulations = self.repository.list_by_student(&student_id)?;
        sort_newest_first(&mut simulations);
        debug!(%student_id, count = simulations.len(), "listed simulations");
        Ok(simulations)
    }

    pub fn get(&self, student_id: StudentId, id: SimulationId) -> Result<Simulation> {
        let simulation = self
            .repository
            .get(&id)?
            .ok_or(FinancingError::SimulationNotFound { id })?;

        if !simulation.belongs_to(&student_id) {
            return Err(FinancingError::SimulationNotOwned { id, student_id });
        }

        Ok(simulation)
    }

    /// the student's simulations matching every set filter, newest first
    pub fn filter(
        &self,
        student_id: StudentId,
        filters: &SimulationFilters,
    ) -> Result<Vec<Simulation>> {
        let simulations = filters.apply(self.list_by_student(student_id)?);
        debug!(%student_id, count = simulations.len(), ?filters, "filtered simulations");
        Ok(simulations)
    }

    pub fn summary(&self, student_id: StudentId) -> Result<SimulationSummary> {
        let simulations = self.list_by_student(student_id)?;
        Ok(SimulationSummary::from_simulations(&simulations, self.recent_limit))
    }

    pub fn delete(
        &mut self,
        student_id: StudentId,
        id: SimulationId,
        time_provider: &SafeTimeProvider,
    ) -> Result<()> {
        // ownership check first
        self.get(student_id, id)?;

        if !self.repository.delete(&id)? {
            return Err(FinancingError::SimulationNotFound { id });
        }

        info!(simulation_id = %id, %student_id, "simulation deleted");
        self.events.emit(Event::SimulationDeleted {
            simulation_id: id,
            student_id,
            timestamp: time_provider.now(),
        });

        Ok(())
    }
}

/// build loan parameters from a request that passed policy validation
fn loan_parameters(request: &CreateSimulationRequest) -> Result<LoanParameters> {
    let installments = u32::try_from(request.installments_number).map_err(|_| {
        FinancingError::InvalidInstallmentCount {
            count: request.installments_number,
        }
    })?;

    LoanParameters::new(
        request.total_amount,
        installments,
        Rate::from_percent(request.interest_per_month),
    )
}
