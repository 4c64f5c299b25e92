//! Memoization core
//!
//! The core orchestrates one call: derive the cache key from the argument
//! tuple, hand the backing store a thunk that runs the original computation
//! with those arguments, and return the store's result unchanged. It holds
//! no entries, takes no locks of its own, performs no retries, and spawns no
//! threads; every caching and concurrency guarantee lives in the backing
//! store.

use crate::error::Result;
use crate::key::KeyFn;
use crate::store::BackingStore;
use std::fmt;
use std::sync::Arc;

/// A computation in the uniform shape the memoization core consumes
///
/// Adapters in [`crate::adapter`] implement this for plain functions of each
/// supported arity, both infallible and fallible; the core itself only ever
/// sees `call(&args) -> Result<Output>`.
pub trait Computation<Args> {
    /// The computed value type.
    type Output;

    /// Run the computation for one argument tuple.
    ///
    /// A failure here is the computation's own
    /// ([`MemoError::Computation`](crate::MemoError::Computation)); the core
    /// and store propagate it without interpreting it.
    fn call(&self, args: &Args) -> Result<Self::Output>;
}

/// A memoized computation: key function, backing store, and the wrapped
/// computation, fixed for the memoizer's lifetime
///
/// The store is held behind an [`Arc`]: a constructor-created store is
/// exclusively owned and dies with the memoizer's last clone of the handle,
/// while a caller-supplied store is shared and outlives it. There is no
/// hidden process-wide cache.
pub struct Memoizer<C, KF, S> {
    compute: C,
    key_fn: KF,
    store: Arc<S>,
}

impl<C, KF, S> Memoizer<C, KF, S> {
    /// Assemble a memoizer from explicit parts.
    ///
    /// The shape-specific constructors in [`crate::adapter`] default the key
    /// function and store; this is the fully general form for caller-chosen
    /// parts.
    pub fn with_parts(compute: C, key_fn: KF, store: Arc<S>) -> Self {
        Self {
            compute,
            key_fn,
            store,
        }
    }

    /// Replace the key function, keeping computation and store.
    ///
    /// If the new key function derives a different key type, the store must
    /// be replaced to match via [`with_store`](Self::with_store).
    pub fn with_key_fn<KF2>(self, key_fn: KF2) -> Memoizer<C, KF2, S> {
        Memoizer {
            compute: self.compute,
            key_fn,
            store: self.store,
        }
    }

    /// Replace the backing store, keeping computation and key function.
    pub fn with_store<S2>(self, store: Arc<S2>) -> Memoizer<C, KF, S2> {
        Memoizer {
            compute: self.compute,
            key_fn: self.key_fn,
            store,
        }
    }

    /// Handle to the backing store, for sharing it with other memoizers or
    /// inspecting cached entries in tests.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Invoke the memoized computation for one argument tuple.
    ///
    /// Derives the key, then delegates to the store's get-or-compute with a
    /// thunk bound to `args`. The thunk is built fresh per call and never
    /// retained. The result, cached or freshly computed, is returned
    /// unchanged; so is any error, tagged by kind.
    pub fn invoke<Args>(&self, args: Args) -> Result<C::Output>
    where
        C: Computation<Args>,
        KF: KeyFn<Args>,
        S: BackingStore<KF::Key, C::Output>,
    {
        let key = self.key_fn.derive(&args);
        self.store.get_or_compute(key, || self.compute.call(&args))
    }
}

impl<C, KF, S> fmt::Debug for Memoizer<C, KF, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoizer").finish_non_exhaustive()
    }
}
