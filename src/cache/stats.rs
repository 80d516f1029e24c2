//! Cache Statistics Module
//!
//! Tracks cache activity, including sweep deletions the record store
//! rejected.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of retrievals for absent keys
    pub misses: u64,
    /// Number of retrievals that found an expired item
    pub expired: u64,
    /// Number of committed inserts
    pub sets: u64,
    /// Number of committed explicit deletes
    pub deletes: u64,
    /// Number of completed reclamation sweeps
    pub sweeps: u64,
    /// Number of items removed by reclamation sweeps
    pub reclaimed: u64,
    /// Keys removed locally whose record store delete failed
    pub failed_sweep_deletions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses + expired), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.expired;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters behind [`CacheStats`].
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    sweeps: AtomicU64,
    reclaimed: AtomicU64,
    failed_sweep_deletions: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sweep(&self, reclaimed: usize) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.reclaimed.fetch_add(reclaimed as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failed_sweep_deletions(&self, count: usize) {
        self.failed_sweep_deletions
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Builds a snapshot with the given entry count.
    pub(crate) fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
            reclaimed: self.reclaimed.load(Ordering::Relaxed),
            failed_sweep_deletions: self.failed_sweep_deletions.load(Ordering::Relaxed),
            total_entries,
        }
    }
}
