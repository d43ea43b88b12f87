use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Progress tracking and cooperative cancellation for a Monte Carlo run.
///
/// Clones share the same counters, so a UI thread can poll `completed()` or call
/// `cancel()` while the engine runs elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl MonteCarloProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of finished trials
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    /// Ask the engine to stop before its next trial
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
