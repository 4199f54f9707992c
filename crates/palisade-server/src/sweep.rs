//! The expiry sweep task.
//!
//! One periodic background task deletes expired indicators from every
//! category with auto-cleanup enabled. A failed pass logs and retries on
//! the next tick; shutdown finishes the in-flight pass before exiting
//! (deletion is idempotent, so a crash mid-pass cannot double-delete or
//! resurrect anything).

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{interval, Duration, Instant};

use palisade_store::MemoryStore;

/// Periodic expiry sweeper.
pub struct Sweeper {
    store: MemoryStore,
    interval_secs: u64,
}

impl Sweeper {
    pub fn new(store: MemoryStore, interval_secs: u64) -> Self {
        Self {
            store,
            interval_secs,
        }
    }

    /// Run sweep passes until the shutdown signal flips.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(Duration::from_secs(self.interval_secs));
        tracing::info!(interval_secs = self.interval_secs, "Sweeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("Sweeper shutting down");
                        return;
                    }
                }
            }
        }
    }

    /// Execute a single pass. Never panics the scheduler.
    pub fn sweep_once(&self) {
        let started = Instant::now();
        let outcome = self.store.sweep_expired(Utc::now());
        let duration_ms = started.elapsed().as_millis();

        if outcome.removed > 0 {
            tracing::info!(
                removed = outcome.removed,
                categories = outcome.categories_swept,
                duration_ms,
                "Sweep removed expired indicators"
            );
        } else {
            tracing::debug!(duration_ms, "Sweep found nothing to remove");
        }
    }
}
