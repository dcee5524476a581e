use uuid::Uuid;

/// unique identifier for a simulation
pub type SimulationId = Uuid;

/// opaque identifier of the student owning a simulation; issued by the auth layer
pub type StudentId = Uuid;
