//! Sync run statistics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Thread-safe counters incremented as batch items reach their outcomes.
///
/// Every submitted draft increments `processed`; every draft that reaches a
/// terminal outcome additionally increments exactly one of `created`,
/// `updated` or `failed`. Vetoed creates and empty diffs are processed
/// without a terminal counter.
pub struct SyncStatistics {
    processed: AtomicU64,
    created: AtomicU64,
    updated: AtomicU64,
    failed: AtomicU64,
    started: Instant,
}

impl SyncStatistics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            processed: AtomicU64::new(0),
            created: AtomicU64::new(0),
            updated: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_updated(&self) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes an immutable snapshot of the counters.
    #[must_use]
    pub fn report(&self) -> SyncReport {
        SyncReport {
            processed: self.processed.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }
}

impl Default for SyncStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub processed: u64,
    pub created: u64,
    pub updated: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

impl SyncReport {
    /// One-line summary of the run.
    #[must_use]
    pub fn human_summary(&self) -> String {
        format!(
            "Summary: {} resource(s) were processed in total \
             ({} created, {} updated and {} failed to sync) in {:.2?}.",
            self.processed, self.created, self.updated, self.failed, self.elapsed
        )
    }
}
