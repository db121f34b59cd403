//! Cache Statistics Module
//!
//! Process-lifetime hit, miss and backend-error counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Counters ==
/// Lock-free counters shared by every caller of a `CacheStore`.
#[derive(Debug, Default)]
pub struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    backend_errors: AtomicU64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backend_error(&self) {
        self.backend_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self, backend: &'static str, total_entries: usize) -> CacheStatistics {
        CacheStatistics::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.backend_errors.load(Ordering::Relaxed),
            total_entries,
            backend,
        )
    }
}

// == Cache Statistics ==
/// Read-only view of cache performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatistics {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to the provider, including degraded ones
    pub misses: u64,
    /// Backend failures and timeouts across all operations
    pub backend_errors: u64,
    /// Live keys under this service's namespace
    pub total_entries: usize,
    /// hits / (hits + misses), or 0.0 before any lookup
    pub hit_rate: f64,
    pub backend: &'static str,
}

impl CacheStatistics {
    pub fn new(
        hits: u64,
        misses: u64,
        backend_errors: u64,
        total_entries: usize,
        backend: &'static str,
    ) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        Self {
            hits,
            misses,
            backend_errors,
            total_entries,
            hit_rate,
            backend,
        }
    }
}
