use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::errors::FinancingError;
use crate::simulation::Simulation;
use crate::types::{SimulationId, StudentId};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("duplicate simulation: {id}")]
    Duplicate {
        id: SimulationId,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

impl From<RepositoryError> for FinancingError {
    fn from(err: RepositoryError) -> Self {
        FinancingError::Repository {
            message: err.to_string(),
        }
    }
}

/// storage for simulation records
pub trait SimulationRepository: Send + Sync {
    /// insert a new record; existing ids are rejected
    fn save(&self, simulation: &Simulation) -> RepositoryResult<()>;

    fn get(&self, id: &SimulationId) -> RepositoryResult<Option<Simulation>>;

    /// all records owned by the student, in no particular order
    fn list_by_student(&self, student_id: &StudentId) -> RepositoryResult<Vec<Simulation>>;

    /// returns whether a record was removed
    fn delete(&self, id: &SimulationId) -> RepositoryResult<bool>;

    fn count(&self) -> RepositoryResult<u64>;
}

/// thread-safe map-backed repository; clones share storage
#[derive(Debug, Clone, Default)]
pub struct InMemorySimulationRepository {
    storage: Arc<RwLock<HashMap<SimulationId, Simulation>>>,
}

impl InMemorySimulationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.storage.write().clear();
    }
}

impl SimulationRepository for InMemorySimulationRepository {
    fn save(&self, simulation: &Simulation) -> RepositoryResult<()> {
        let mut storage = self.storage.write();
        if storage.contains_key(&simulation.id) {
            return Err(RepositoryError::Duplicate { id: simulation.id });
        }
        storage.insert(simulation.id, simulation.clone());
        Ok(())
    }

    fn get(&self, id: &SimulationId) -> RepositoryResult<Option<Simulation>> {
        Ok(self.storage.read().get(id).cloned())
    }

    fn list_by_student(&self, student_id: &StudentId) -> RepositoryResult<Vec<Simulation>> {
        let storage = self.storage.read();
        Ok(storage
            .values()
            .filter(|s| s.belongs_to(student_id))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &SimulationId) -> RepositoryResult<bool> {
        Ok(self.storage.write().remove(id).is_some())
    }

    fn count(&self) -> RepositoryResult<u64> {
        Ok(self.storage.read().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn record(student_id: StudentId) -> Simulation {
        let now = Utc::now();
        Simulation {
            id: Uuid::new_v4(),
            student_id,
            total_amount: Money::from_major(10_000),
            installments_number: 12,
            interest_per_month: dec!(2),
            monthly_installment_value: Money::from_str_exact("945.60").unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_repository_is_empty() {
        let repo = InMemorySimulationRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_get() {
        let repo = InMemorySimulationRepository::new();
        let sim = record(Uuid::new_v4());

        repo.save(&sim).unwrap();

        assert_eq!(repo.get(&sim.id).unwrap(), Some(sim));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let repo = InMemorySimulationRepository::new();
        let sim = record(Uuid::new_v4());

        repo.save(&sim).unwrap();
        let err = repo.save(&sim).unwrap_err();

        assert!(matches!(err, RepositoryError::Duplicate { .. }));
        let financing: FinancingError = err.into();
        assert!(financing.to_string().starts_with("repository error"));
    }

    #[test]
    fn test_list_by_student_isolates_owners() {
        let repo = InMemorySimulationRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.save(&record(alice)).unwrap();
        repo.save(&record(alice)).unwrap();
        repo.save(&record(bob)).unwrap();

        assert_eq!(repo.list_by_student(&alice).unwrap().len(), 2);
        assert_eq!(repo.list_by_student(&bob).unwrap().len(), 1);
        assert!(repo.list_by_student(&Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let repo = InMemorySimulationRepository::new();
        let sim = record(Uuid::new_v4());
        repo.save(&sim).unwrap();

        assert!(repo.delete(&sim.id).unwrap());
        assert!(!repo.delete(&sim.id).unwrap());
        assert!(repo.get(&sim.id).unwrap().is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let repo = InMemorySimulationRepository::new();
        let shared = repo.clone();

        shared.save(&record(Uuid::new_v4())).unwrap();
        assert_eq!(repo.len(), 1);

        repo.clear();
        assert!(shared.is_empty());
    }
}
