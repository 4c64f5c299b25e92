//! # memofn
//!
//! Generic function memoization with pluggable backing stores.
//!
//! Given a computation of any supported arity — a pure function, a
//! side-effecting procedure, or a value supplier — `memofn` returns a
//! wrapped version that caches results keyed by a derived cache key and
//! guarantees that, for any given key, the underlying computation runs at
//! most once concurrently; later calls with an equal key reuse the cached
//! result.
//!
//! ## Features
//!
//! - Synchronous, thread-safe engine: all blocking happens in the store
//!   while another thread computes the same key
//! - Pluggable [`BackingStore`] contract; any bounded, expiring, or remote
//!   cache can implement it
//! - Always-retain [`InMemoryStore`] reference store with hit/miss
//!   statistics and a read-only snapshot view for tests
//! - Key strategies: identity, combined argument hash, constant (supplier),
//!   or a caller-supplied closure
//! - Two distinct error kinds so callers can tell "my function failed" from
//!   "the cache broke", with the original cause preserved in both
//!
//! ## Memoizing a function
//!
//! ```
//! use memofn::memo_fn;
//!
//! let upper = memo_fn(|s: &String| s.to_uppercase());
//! assert_eq!(upper.call("hi".to_string())?, "HI");
//! // Second call with an equal argument is served from the cache.
//! assert_eq!(upper.call("hi".to_string())?, "HI");
//! # Ok::<(), memofn::MemoError>(())
//! ```
//!
//! ## Suppliers cache exactly one value
//!
//! ```
//! use memofn::memo_supplier;
//!
//! let config = memo_supplier(|| "loaded once".to_string());
//! assert_eq!(config.get()?, "loaded once");
//! assert_eq!(config.get()?, "loaded once");
//! # Ok::<(), memofn::MemoError>(())
//! ```
//!
//! ## Sharing a caller-supplied store
//!
//! A constructor-created store is private to its memoizer; a store passed
//! in by the caller is shared and outlives it.
//!
//! ```
//! use memofn::{memo_fn, InMemoryStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let double = memo_fn(|n: &u32| n * 2).with_store(Arc::clone(&store));
//!
//! assert_eq!(double.call(21)?, 42);
//! assert!(store.contains_key(&21));
//! # Ok::<(), memofn::MemoError>(())
//! ```
//!
//! ## Fallible computations
//!
//! Errors propagate with their cause intact and are never cached: the
//! failed key stays absent, so a later call retries.
//!
//! ```
//! use memofn::try_memo_fn;
//!
//! let parse = try_memo_fn(|s: &String| s.parse::<u32>());
//! assert_eq!(parse.call("7".to_string())?, 7);
//! assert!(parse.call("not a number".to_string()).is_err());
//! # Ok::<(), memofn::MemoError>(())
//! ```

pub mod adapter;
pub mod engine;
pub mod error;
pub mod key;
pub mod store;

// Re-export main types for convenience
pub use adapter::{
    memo_fn, memo_fn2, memo_fn3, memo_proc, memo_supplier, try_memo_fn, try_memo_fn2, FallibleFn,
    PureFn,
};
pub use engine::{Computation, Memoizer};
pub use error::{MemoError, Result};
pub use key::{FnKey, HashKey, IdentityKey, KeyFn, UnitKey};
pub use store::{BackingStore, EntrySnapshot, InMemoryStore, StoreStats};
