//! Per-key locks that serialize conflicting dispensary operations.
//!
//! A dispense holds the lock for its prescription and for every
//! medication it touches, so two dispenses that share a medication can
//! never interleave their check-then-apply sequences. Keys follow the
//! storage keying (`"medications:M002"`, `"prescriptions:RX1"`).

mod held;
mod in_memory;

use std::sync::Arc;

use thiserror::Error;

/// Error type for lock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The underlying lock primitive was poisoned (a thread panicked while holding it).
    #[error("lock poisoned: {0}")]
    Poisoned(String),

    /// Failed to acquire the lock.
    #[error("lock acquire failed: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("lock release failed: {0}")]
    ReleaseFailed(String),
}

/// Trait for a single lock instance.
///
/// Implementations provide blocking lock, non-blocking try-lock, and
/// unlock. In-memory locks use `Mutex` + `Condvar`; a distributed
/// deployment might use Postgres advisory locks or etcd leases.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}

/// Factory trait for obtaining per-key locks.
///
/// Repeated calls with the same `key` must return the same logical lock
/// (the same `Arc` for in-memory implementations).
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: Lock;

    /// Get (or create) a lock for the given key.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;
}

pub use held::{acquire_in_order, HeldLocks};
pub use in_memory::{InMemoryLock, InMemoryLockManager};
