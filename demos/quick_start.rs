/// quick start - price, store and list simulations for one student
use financing_simulator::{
    logging, parse_create_request, CreateSimulationRequest, Decimal, FinancingConfig,
    InMemorySimulationRepository, Money, SafeTimeProvider, SimulationService, SimulationView,
    TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = FinancingConfig::default();
    logging::init_logging(&config.logging)?;

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut service = SimulationService::with_config(InMemorySimulationRepository::new(), &config);
    let student = Uuid::new_v4();

    // R$ 10.000 over 12 months at 2% a month
    let request = CreateSimulationRequest::new(Money::from_major(10_000), 12, Decimal::from(2));
    let simulation = service.create(student, &request, &time)?;
    println!("{}", SimulationView::from_simulation(&simulation).to_json_pretty()?);

    // the same shape arrives as a json body
    let body = r#"{"total_amount": "25000", "installments_number": 24, "interest_per_month": "1.5"}"#;
    let from_body = service.create(student, &parse_create_request(body)?, &time)?;
    println!("24 installments of {}", from_body.monthly_installment_value);

    // out-of-policy input reports every violation at once
    let rejected = CreateSimulationRequest::new(Money::from_major(-100), 0, Decimal::from(-5));
    if let Err(err) = service.create(student, &rejected, &time) {
        for message in err.validation_errors() {
            println!("rejected: {}", message);
        }
    }

    let summary = service.summary(student)?;
    println!("{} simulation(s), total {}", summary.total_simulations, summary.total_amount);

    Ok(())
}
