pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod logging;
pub mod payments;
pub mod repository;
pub mod serialization;
pub mod service;
pub mod simulation;
pub mod types;
pub mod validation;

// re-export key types
pub use config::{FinancingConfig, LogFormat, LoggingConfig, SimulationPolicy};
pub use decimal::{decimal_to_percentage, percentage_to_decimal, Money, Rate, RoundingPolicy};
pub use errors::{FinancingError, Result};
pub use events::{Event, EventStore};
pub use payments::{
    calculate_total_interest, calculate_total_payment, compute_monthly_payment,
    AmortizationCalculator, LoanParameters, PaymentResult,
};
pub use repository::{InMemorySimulationRepository, RepositoryError, SimulationRepository};
pub use serialization::{parse_create_request, SimulationView, SummaryView};
pub use service::{SimulationPreview, SimulationService};
pub use simulation::{CreateSimulationRequest, Simulation, SimulationFilters, SimulationSummary};
pub use types::{SimulationId, StudentId};
pub use validation::{validate_simulation_inputs, InputValidator, ValidationOutcome, Violation};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
