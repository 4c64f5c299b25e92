//! Cache entry bookkeeping and read-only snapshots

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// A populated cache entry, owned exclusively by the in-memory store
#[derive(Debug, Clone)]
pub(crate) struct StoreEntry<V> {
    /// The cached value
    pub(crate) value: V,

    /// When the value was computed and stored
    pub(crate) created_at: DateTime<Utc>,

    /// Last time the entry served a hit
    pub(crate) last_accessed: DateTime<Utc>,

    /// Number of hits the entry has served
    pub(crate) hits: u64,
}

impl<V> StoreEntry<V> {
    pub(crate) fn new(value: V) -> Self {
        let now = Utc::now();
        Self {
            value,
            created_at: now,
            last_accessed: now,
            hits: 0,
        }
    }

    /// Mark the entry as accessed (updates access time and hit count)
    pub(crate) fn mark_hit(&mut self) {
        self.last_accessed = Utc::now();
        self.hits += 1;
    }
}

/// Read-only view of one cached entry, for verifying cache population in
/// tests without exposing mutation
#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot<K, V> {
    /// The cache key
    pub key: K,

    /// The cached value
    pub value: V,

    /// When the value was computed and stored
    pub created_at: DateTime<Utc>,

    /// Last time the entry served a hit
    pub last_accessed: DateTime<Utc>,

    /// Number of hits the entry has served
    pub hits: u64,
}

impl<K, V> EntrySnapshot<K, V> {
    pub(crate) fn new(key: K, entry: &StoreEntry<V>) -> Self
    where
        V: Clone,
    {
        Self {
            key,
            value: entry.value.clone(),
            created_at: entry.created_at,
            last_accessed: entry.last_accessed,
            hits: entry.hits,
        }
    }

    /// Age of the entry at the time of the call
    pub fn age(&self) -> Duration {
        (Utc::now() - self.created_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }

    /// Time since the entry last served a hit
    pub fn time_since_access(&self) -> Duration {
        (Utc::now() - self.last_accessed)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }
}
