//! Ordered multi-key acquisition with release-on-drop.

use std::sync::Arc;

use super::{Lock, LockError, LockManager};

/// A set of locks held by one operation.
///
/// Locks release when the guard drops, so every early-error return in an
/// operation releases the keys it already holds.
pub struct HeldLocks<L: Lock> {
    held: Vec<Arc<L>>,
}

impl<L: Lock> HeldLocks<L> {
    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl<L: Lock> Drop for HeldLocks<L> {
    fn drop(&mut self) {
        for lock in self.held.drain(..) {
            let _ = lock.unlock();
        }
    }
}

/// Acquire locks for all `keys` in sorted, deduplicated order.
///
/// Every caller acquiring multiple keys goes through here, so any two
/// operations contending on an overlapping key set always lock in the
/// same global order and cannot deadlock.
pub fn acquire_in_order<M: LockManager>(
    manager: &M,
    mut keys: Vec<String>,
) -> Result<HeldLocks<M::Lock>, LockError> {
    keys.sort_unstable();
    keys.dedup();

    let mut held = HeldLocks {
        held: Vec::with_capacity(keys.len()),
    };
    for key in &keys {
        let lock = manager.get_lock(key)?;
        lock.lock()?;
        held.held.push(lock);
    }

    Ok(held)
}
