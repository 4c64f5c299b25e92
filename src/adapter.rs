//! Call-shape adapters
//!
//! One adapter exists per distinct invocation signature, all delegating to
//! the same [`Memoizer`] core: value-returning functions of zero to three
//! arguments, their fallible counterparts, and side-effecting procedures.
//! Every other shape is a degenerate case of these — a procedure is a
//! function returning `()`, cached as the "already executed" sentinel, and
//! primitive-typed shapes are ordinary generic instantiations.
//!
//! The `memo_*` constructors default the key function per shape (identity
//! for one argument, combined hash for several, the constant unit key for
//! suppliers) and create a fresh private [`InMemoryStore`]. Callers swap
//! either part with [`Memoizer::with_key_fn`] and [`Memoizer::with_store`].

use crate::engine::{Computation, Memoizer};
use crate::error::{MemoError, Result};
use crate::key::{HashKey, IdentityKey, KeyFn, UnitKey};
use crate::store::{BackingStore, InMemoryStore};
use std::sync::Arc;

/// Adapter for infallible computations
///
/// Wraps a plain `Fn` of any supported arity; the result is always `Ok`
/// from the core's point of view.
#[derive(Clone, Copy)]
pub struct PureFn<F>(pub F);

/// Adapter for fallible computations
///
/// Wraps an `Fn` returning `Result<V, E>`. An `Err` surfaces as
/// [`MemoError::Computation`] with the payload carried unchanged as the
/// cause, and leaves the key absent from the store.
#[derive(Clone, Copy)]
pub struct FallibleFn<F>(pub F);

impl<V, F> Computation<()> for PureFn<F>
where
    F: Fn() -> V,
{
    type Output = V;

    fn call(&self, _args: &()) -> Result<V> {
        Ok((self.0)())
    }
}

impl<A, V, F> Computation<(A,)> for PureFn<F>
where
    F: Fn(&A) -> V,
{
    type Output = V;

    fn call(&self, args: &(A,)) -> Result<V> {
        Ok((self.0)(&args.0))
    }
}

impl<A, B, V, F> Computation<(A, B)> for PureFn<F>
where
    F: Fn(&A, &B) -> V,
{
    type Output = V;

    fn call(&self, args: &(A, B)) -> Result<V> {
        Ok((self.0)(&args.0, &args.1))
    }
}

impl<A, B, C, V, F> Computation<(A, B, C)> for PureFn<F>
where
    F: Fn(&A, &B, &C) -> V,
{
    type Output = V;

    fn call(&self, args: &(A, B, C)) -> Result<V> {
        Ok((self.0)(&args.0, &args.1, &args.2))
    }
}

impl<V, E, F> Computation<()> for FallibleFn<F>
where
    F: Fn() -> std::result::Result<V, E>,
    E: Into<anyhow::Error>,
{
    type Output = V;

    fn call(&self, _args: &()) -> Result<V> {
        (self.0)().map_err(MemoError::computation)
    }
}

impl<A, V, E, F> Computation<(A,)> for FallibleFn<F>
where
    F: Fn(&A) -> std::result::Result<V, E>,
    E: Into<anyhow::Error>,
{
    type Output = V;

    fn call(&self, args: &(A,)) -> Result<V> {
        (self.0)(&args.0).map_err(MemoError::computation)
    }
}

impl<A, B, V, E, F> Computation<(A, B)> for FallibleFn<F>
where
    F: Fn(&A, &B) -> std::result::Result<V, E>,
    E: Into<anyhow::Error>,
{
    type Output = V;

    fn call(&self, args: &(A, B)) -> Result<V> {
        (self.0)(&args.0, &args.1).map_err(MemoError::computation)
    }
}

/// Memoize a zero-argument supplier.
///
/// Uses the constant [`UnitKey`], so the supplier runs once and the value is
/// cached for the memoizer's lifetime.
pub fn memo_supplier<V, F>(f: F) -> Memoizer<PureFn<F>, UnitKey, InMemoryStore<(), V>>
where
    F: Fn() -> V,
{
    Memoizer::with_parts(PureFn(f), UnitKey, Arc::new(InMemoryStore::new()))
}

/// Memoize a one-argument function, keyed by the argument itself.
pub fn memo_fn<A, V, F>(f: F) -> Memoizer<PureFn<F>, IdentityKey, InMemoryStore<A, V>>
where
    F: Fn(&A) -> V,
{
    Memoizer::with_parts(PureFn(f), IdentityKey, Arc::new(InMemoryStore::new()))
}

/// Memoize a two-argument function, keyed by the combined argument hash.
pub fn memo_fn2<A, B, V, F>(f: F) -> Memoizer<PureFn<F>, HashKey, InMemoryStore<u64, V>>
where
    F: Fn(&A, &B) -> V,
{
    Memoizer::with_parts(PureFn(f), HashKey, Arc::new(InMemoryStore::new()))
}

/// Memoize a three-argument function, keyed by the combined argument hash.
pub fn memo_fn3<A, B, C, V, F>(f: F) -> Memoizer<PureFn<F>, HashKey, InMemoryStore<u64, V>>
where
    F: Fn(&A, &B, &C) -> V,
{
    Memoizer::with_parts(PureFn(f), HashKey, Arc::new(InMemoryStore::new()))
}

/// Memoize a side-effecting procedure, keyed by the argument itself.
///
/// The cached value is the unit sentinel marking "already executed for this
/// key": the effect runs at most once per key, and a cache hit performs no
/// effect at all.
pub fn memo_proc<A, F>(f: F) -> Memoizer<PureFn<F>, IdentityKey, InMemoryStore<A, ()>>
where
    F: Fn(&A),
{
    memo_fn(f)
}

/// Memoize a fallible one-argument function, keyed by the argument itself.
///
/// Errors propagate to every caller and are never cached; the failed key
/// stays absent, so a later call retries the computation.
pub fn try_memo_fn<A, V, E, F>(f: F) -> Memoizer<FallibleFn<F>, IdentityKey, InMemoryStore<A, V>>
where
    F: Fn(&A) -> std::result::Result<V, E>,
    E: Into<anyhow::Error>,
{
    Memoizer::with_parts(FallibleFn(f), IdentityKey, Arc::new(InMemoryStore::new()))
}

/// Memoize a fallible two-argument function, keyed by the combined hash.
pub fn try_memo_fn2<A, B, V, E, F>(
    f: F,
) -> Memoizer<FallibleFn<F>, HashKey, InMemoryStore<u64, V>>
where
    F: Fn(&A, &B) -> std::result::Result<V, E>,
    E: Into<anyhow::Error>,
{
    Memoizer::with_parts(FallibleFn(f), HashKey, Arc::new(InMemoryStore::new()))
}

impl<F, KF, S> Memoizer<PureFn<F>, KF, S> {
    /// Invoke the memoized supplier.
    pub fn get<V>(&self) -> Result<V>
    where
        F: Fn() -> V,
        KF: KeyFn<()>,
        S: BackingStore<KF::Key, V>,
    {
        self.invoke(())
    }

    /// Invoke the memoized one-argument computation.
    pub fn call<A, V>(&self, arg: A) -> Result<V>
    where
        F: Fn(&A) -> V,
        KF: KeyFn<(A,)>,
        S: BackingStore<KF::Key, V>,
    {
        self.invoke((arg,))
    }

    /// Invoke the memoized two-argument computation.
    pub fn call2<A, B, V>(&self, a: A, b: B) -> Result<V>
    where
        F: Fn(&A, &B) -> V,
        KF: KeyFn<(A, B)>,
        S: BackingStore<KF::Key, V>,
    {
        self.invoke((a, b))
    }

    /// Invoke the memoized three-argument computation.
    pub fn call3<A, B, C, V>(&self, a: A, b: B, c: C) -> Result<V>
    where
        F: Fn(&A, &B, &C) -> V,
        KF: KeyFn<(A, B, C)>,
        S: BackingStore<KF::Key, V>,
    {
        self.invoke((a, b, c))
    }
}

impl<F, KF, S> Memoizer<FallibleFn<F>, KF, S> {
    /// Invoke the memoized fallible supplier.
    pub fn get<V, E>(&self) -> Result<V>
    where
        F: Fn() -> std::result::Result<V, E>,
        E: Into<anyhow::Error>,
        KF: KeyFn<()>,
        S: BackingStore<KF::Key, V>,
    {
        self.invoke(())
    }

    /// Invoke the memoized fallible one-argument computation.
    pub fn call<A, V, E>(&self, arg: A) -> Result<V>
    where
        F: Fn(&A) -> std::result::Result<V, E>,
        E: Into<anyhow::Error>,
        KF: KeyFn<(A,)>,
        S: BackingStore<KF::Key, V>,
    {
        self.invoke((arg,))
    }

    /// Invoke the memoized fallible two-argument computation.
    pub fn call2<A, B, V, E>(&self, a: A, b: B) -> Result<V>
    where
        F: Fn(&A, &B) -> std::result::Result<V, E>,
        E: Into<anyhow::Error>,
        KF: KeyFn<(A, B)>,
        S: BackingStore<KF::Key, V>,
    {
        self.invoke((a, b))
    }
}
