//! Statistics and metrics for store performance monitoring

use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of a store's counters at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreStats {
    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,

    /// Number of computations run to populate entries
    pub computations: u64,

    /// Number of computations that failed, leaving their key absent
    pub failed_computations: u64,

    /// Number of populated entries currently in the store
    pub entries: usize,
}

impl StoreStats {
    /// Cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Cache miss rate as a percentage
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }

    /// Total calls observed by the store
    pub fn total_calls(&self) -> u64 {
        self.hits + self.misses
    }
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, computations: {}, failed: {}, entries: {} }}",
            self.hits,
            self.misses,
            self.hit_rate(),
            self.computations,
            self.failed_computations,
            self.entries
        )
    }
}
