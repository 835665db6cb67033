use crate::{
    metrics::Observation,
    PollError,
};
use std::sync::{
    Mutex,
    PoisonError,
};

/// Destination of collection results.
///
/// Methods take `&self` so results of concurrently polled endpoints can be
/// handed over from any task.
pub trait Accumulator: Send + Sync {
    fn add_observation(&self, observation: Observation);

    fn add_error(&self, error: PollError);
}

/// Keeps everything it receives in memory.
#[derive(Debug, Default)]
pub struct MemoryAccumulator {
    observations: Mutex<Vec<Observation>>,
    errors: Mutex<Vec<PollError>>,
}

impl MemoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.observations.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn take_observations(&self) -> Vec<Observation> {
        std::mem::take(&mut *self.observations.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn take_errors(&self) -> Vec<PollError> {
        std::mem::take(&mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Accumulator for MemoryAccumulator {
    fn add_observation(&self, observation: Observation) {
        self.observations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observation);
    }

    fn add_error(&self, error: PollError) {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner).push(error);
    }
}
