//! # Pluggable Backing Stores
//!
//! A backing store is the associative structure that actually holds cached
//! key/value pairs and provides atomic get-or-compute semantics. The
//! memoization core never holds entries itself and never synchronizes on its
//! own; every concurrency guarantee comes from the store's
//! [`get_or_compute`](BackingStore::get_or_compute) being atomic per key.
//!
//! ## Conformance classes
//!
//! - **Always-retain** — [`InMemoryStore`], the in-process reference
//!   implementation. Entries are never evicted or expired; unbounded growth
//!   is an explicit, accepted cost. It never fails on its own.
//! - **Evicting/loading** — external stores (bounded, expiring, remote)
//!   consumed through the same trait. They may drop entries between calls,
//!   meaning a later call for the same key recomputes, and may fail the
//!   `get_or_compute` call itself independently of the computation; such
//!   failures surface as [`MemoError::Store`](crate::MemoError::Store).

pub mod entry;
pub mod memory;
pub mod stats;

pub use entry::EntrySnapshot;
pub use memory::InMemoryStore;
pub use stats::StoreStats;

use crate::error::Result;

/// Capability interface any cache can implement to plug into the engine
pub trait BackingStore<K, V> {
    /// Return the stored value for `key`, invoking `compute` to populate it
    /// if and only if no value is currently stored for that key.
    ///
    /// Contract:
    /// - Concurrent calls for the same key run `compute` exactly once; the
    ///   other callers wait for that execution and receive its result.
    /// - Calls for different keys proceed independently.
    /// - An error returned by `compute` propagates to the caller unmodified
    ///   and leaves the key absent, so a later call may retry.
    /// - A failure of the store's own machinery is reported as
    ///   [`MemoError::Store`](crate::MemoError::Store), distinct from
    ///   computation failures.
    fn get_or_compute<F>(&self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>;
}
