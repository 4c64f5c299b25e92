//! Error types for memoized calls
//!
//! Callers of a memoizer need to tell two situations apart: their own
//! computation failed, or the cache layer itself broke. This module defines
//! one error kind per situation and preserves the original cause for
//! diagnostics in both.

use thiserror::Error;

/// Main error type surfaced by memoized calls
#[derive(Error, Debug)]
pub enum MemoError {
    /// The wrapped computation itself failed when it was invoked.
    ///
    /// The payload is the computation's own error, carried unchanged; the
    /// cache layer does not interpret it. The failed key is left absent from
    /// the backing store, so a later call retries the computation.
    #[error("memoized computation failed: {0}")]
    Computation(anyhow::Error),

    /// The backing store's own machinery failed, independently of the
    /// computation (e.g. a remote or loading store could not be reached).
    ///
    /// The reference in-memory store never produces this kind; it exists for
    /// external stores consumed through the same interface.
    #[error("backing store failure: {0}")]
    Store(anyhow::Error),
}

/// Result type alias for memoized operations
pub type Result<T> = std::result::Result<T, MemoError>;

impl MemoError {
    /// Wrap a computation failure, preserving the cause.
    pub fn computation(cause: impl Into<anyhow::Error>) -> Self {
        MemoError::Computation(cause.into())
    }

    /// Wrap a store-infrastructure failure, preserving the cause.
    pub fn store(cause: impl Into<anyhow::Error>) -> Self {
        MemoError::Store(cause.into())
    }

    /// True if the wrapped computation failed.
    pub fn is_computation(&self) -> bool {
        matches!(self, MemoError::Computation(_))
    }

    /// True if the backing store's own machinery failed.
    pub fn is_store(&self) -> bool {
        matches!(self, MemoError::Store(_))
    }

    /// The original cause, for downcasting in diagnostics.
    pub fn cause(&self) -> &anyhow::Error {
        match self {
            MemoError::Computation(cause) | MemoError::Store(cause) => cause,
        }
    }
}
