// Bounded execution slots in front of the shared query engine

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

use statcheck_core::{Error, Result};

/// Caps how many engine calls of a check are in flight at once
#[derive(Clone)]
pub struct QuerySlots {
    semaphore: Arc<Semaphore>,
    max_slots: usize,
}

impl QuerySlots {
    pub fn new(max_slots: usize) -> Self {
        let max_slots = max_slots.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(max_slots)),
            max_slots,
        }
    }

    /// Run `call` while holding a slot. The slot is released when the call
    /// finishes or its future is dropped.
    pub async fn run<F, T>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| Error::Cancelled("query slots closed".to_string()))?;
        call.await
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }
}
