//! Key derivation strategies
//!
//! A key function maps a call's argument tuple to the cache key under which
//! its result is stored. It must be total, deterministic, and free of side
//! effects: equal argument tuples must yield equal keys across calls and
//! across threads for the lifetime of a memoizer.
//!
//! Provided strategies:
//! - [`IdentityKey`] — single-argument shapes; the key is a clone of the
//!   argument itself.
//! - [`HashKey`] — any hashable argument tuple; the key is a combined 64-bit
//!   hash of all arguments in argument order.
//! - [`UnitKey`] — a constant key, so a zero-argument supplier caches exactly
//!   one value for its lifetime.
//! - [`FnKey`] — a caller-supplied closure for custom key derivation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic mapping from an argument tuple to a cache key
pub trait KeyFn<Args> {
    /// The derived key type.
    type Key;

    /// Derive the cache key for one argument tuple.
    fn derive(&self, args: &Args) -> Self::Key;
}

/// Key strategy for single-argument computations: the argument is the key
///
/// This is the collision-free default for one-argument shapes. The argument
/// type must be cheap enough to clone and usable as a map key.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityKey;

impl<A: Clone> KeyFn<(A,)> for IdentityKey {
    type Key = A;

    fn derive(&self, args: &(A,)) -> A {
        args.0.clone()
    }
}

/// Key strategy combining the hashes of all arguments in argument order
///
/// The default for multi-argument computations. Uses `DefaultHasher` with
/// fixed keys, so the derived key is stable across calls and threads within
/// one process.
///
/// A combined hash is a lossy fingerprint: two distinct argument tuples that
/// collide will share one cache entry. This is an accepted trade-off of the
/// default; callers that need collision-free keys supply [`IdentityKey`] or
/// an [`FnKey`] producing a structural key instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashKey;

impl<Args: Hash> KeyFn<Args> for HashKey {
    type Key = u64;

    fn derive(&self, args: &Args) -> u64 {
        let mut hasher = DefaultHasher::new();
        args.hash(&mut hasher);
        hasher.finish()
    }
}

/// Constant key strategy: every call shares the single cache entry
///
/// The default for zero-argument suppliers, meaning a supplier-backed
/// memoizer computes once and returns the cached value forever after.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitKey;

impl<Args> KeyFn<Args> for UnitKey {
    type Key = ();

    fn derive(&self, _args: &Args) -> Self::Key {}
}

/// Caller-supplied key derivation closure
///
/// Wraps any `Fn(&Args) -> K`. The closure must uphold the [`KeyFn`]
/// contract itself: deterministic, total, and side-effect free.
#[derive(Clone, Copy)]
pub struct FnKey<F>(pub F);

impl<Args, K, F> KeyFn<Args> for FnKey<F>
where
    F: Fn(&Args) -> K,
{
    type Key = K;

    fn derive(&self, args: &Args) -> K {
        (self.0)(args)
    }
}
