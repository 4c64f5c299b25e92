//! In-process always-retain store with atomic per-key computation
//!
//! This is the reference backing store: a concurrent map with
//! compute-if-absent semantics and no eviction. Values live until the owner
//! removes them or drops the store; unbounded growth is an explicit,
//! accepted cost of this conformance class.

use crate::error::Result;
use crate::store::entry::{EntrySnapshot, StoreEntry};
use crate::store::stats::StoreStats;
use crate::store::BackingStore;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use tracing::{debug, info};

/// One key's slot: empty while its first computation is in flight
type Slot<V> = Arc<Mutex<Option<StoreEntry<V>>>>;

/// Always-retain in-memory store
///
/// The outer lock guards only slot lookup and insertion; each key's slot has
/// its own lock that serializes computation of that key. Concurrent calls
/// for the same key therefore run the computation exactly once, while calls
/// for different keys proceed independently.
///
/// A failed computation unlinks its empty slot, so the key stays absent and
/// a later call retries; errors are never cached. A computation that panics
/// likewise leaves the slot empty for the next caller.
///
/// Re-entrant calls for the same key through the same store (a computation
/// invoking its own memoizer) deadlock on the slot lock; no defined
/// semantics are provided for that case.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
    counters: Counters,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    computations: AtomicU64,
    failed_computations: AtomicU64,
}

/// Lock recovering from poisoning: a panic inside a memoized computation
/// leaves its slot empty rather than wedging every later caller.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Non-blocking populated check; a slot whose computation is still in
/// flight holds no value yet and reports false.
fn is_populated<V>(slot: &Slot<V>) -> bool {
    match slot.try_lock() {
        Ok(guard) => guard.is_some(),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().is_some(),
        Err(TryLockError::WouldBlock) => false,
    }
}

impl<K, V> InMemoryStore<K, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// Create an empty store sized for roughly `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::with_capacity(capacity)),
            counters: Counters::default(),
        }
    }

    /// Number of populated entries.
    ///
    /// Entries whose first computation is still in flight are not counted.
    pub fn len(&self) -> usize {
        let slots = lock(&self.slots);
        slots.values().filter(|slot| is_populated(slot)).count()
    }

    /// True if no entry is populated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the store's counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            computations: self.counters.computations.load(Ordering::Relaxed),
            failed_computations: self.counters.failed_computations.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl<K, V> InMemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Check whether a populated entry exists for `key` (without updating
    /// its access metadata).
    pub fn contains_key(&self, key: &K) -> bool {
        let slot = lock(&self.slots).get(key).cloned();
        slot.map_or(false, |slot| is_populated(&slot))
    }

    /// Remove the entry for `key`, returning its value if one was present.
    ///
    /// Removing a key whose computation is still in flight does not cancel
    /// the computation; the in-flight caller still receives its result, but
    /// the store forgets it.
    pub fn remove(&self, key: &K) -> Option<V> {
        let slot = lock(&self.slots).remove(key)?;
        let entry = lock(&slot).take()?;
        debug!("Removed cache entry");
        Some(entry.value)
    }

    /// Remove every entry from the store.
    pub fn clear(&self) {
        let drained: Vec<Slot<V>> = {
            let mut slots = lock(&self.slots);
            slots.drain().map(|(_, slot)| slot).collect()
        };
        let removed = drained.iter().filter(|slot| is_populated(slot)).count();
        info!("Cleared {} entries from store", removed);
    }

    /// Read-only view of all populated entries.
    ///
    /// Entries whose first computation is still in flight are skipped; they
    /// hold no value yet.
    pub fn snapshot(&self) -> Vec<EntrySnapshot<K, V>> {
        let slots = lock(&self.slots);
        slots
            .iter()
            .filter_map(|(key, slot)| {
                let guard = match slot.try_lock() {
                    Ok(guard) => guard,
                    Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                    Err(TryLockError::WouldBlock) => return None,
                };
                let entry = guard.as_ref()?;
                Some(EntrySnapshot::new(key.clone(), entry))
            })
            .collect()
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BackingStore<K, V> for InMemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn get_or_compute<F>(&self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        loop {
            // Look up or link the key's slot. The outer lock is released
            // before the slot lock is taken, so waiting on one key never
            // blocks lookups for other keys.
            let slot = {
                let mut slots = lock(&self.slots);
                slots
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(None)))
                    .clone()
            };

            let mut guard = lock(&slot);
            if let Some(entry) = guard.as_mut() {
                entry.mark_hit();
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit");
                return Ok(entry.value.clone());
            }

            // The slot is empty: either this caller won the race to compute,
            // or a previous computation failed and unlinked the slot while
            // this caller was waiting on it. Only compute into a slot the
            // map still references; otherwise retry with a fresh one.
            {
                let slots = lock(&self.slots);
                match slots.get(&key) {
                    Some(current) if Arc::ptr_eq(current, &slot) => {}
                    _ => continue,
                }
            }

            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            debug!("Cache miss, invoking computation");

            return match compute() {
                Ok(value) => {
                    *guard = Some(StoreEntry::new(value.clone()));
                    self.counters.computations.fetch_add(1, Ordering::Relaxed);
                    debug!("Computed and stored new entry");
                    Ok(value)
                }
                Err(err) => {
                    // Unlink the empty slot so the key stays absent; errors
                    // are never cached and a later call retries naturally.
                    let mut slots = lock(&self.slots);
                    if let Some(current) = slots.get(&key) {
                        if Arc::ptr_eq(current, &slot) {
                            slots.remove(&key);
                        }
                    }
                    self.counters
                        .failed_computations
                        .fetch_add(1, Ordering::Relaxed);
                    debug!("Computation failed, key left absent");
                    Err(err)
                }
            };
        }
    }
}
