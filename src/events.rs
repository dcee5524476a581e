use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{SimulationId, StudentId};

/// events emitted by the simulation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    SimulationCreated {
        simulation_id: SimulationId,
        student_id: StudentId,
        total_amount: Money,
        installments_number: u32,
        monthly_installment_value: Money,
        timestamp: DateTime<Utc>,
    },
    SimulationRejected {
        student_id: StudentId,
        errors: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    SimulationDeleted {
        simulation_id: SimulationId,
        student_id: StudentId,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_take_events_drains() {
        let mut store = EventStore::new();
        store.emit(Event::SimulationRejected {
            student_id: Uuid::nil(),
            errors: vec!["bad amount".to_string()],
            timestamp: Utc::now(),
        });

        assert_eq!(store.events().len(), 1);
        let taken = store.take_events();
        assert_eq!(taken.len(), 1);
        assert!(store.events().is_empty());
    }
}
