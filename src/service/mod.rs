//! The dispensary service: prescription creation, the dispense engine,
//! the patient directory, and inventory operations over one shared
//! record store.
//!
//! Every mutating operation follows the same shape: acquire the per-key
//! locks for the records it will touch, validate all preconditions with
//! zero side effects, stage the mutations in a `WriteBatch`, and commit
//! the batch atomically. Domain events fire only after the commit.

mod dispense;
mod inventory;
mod patients;
mod prescriptions;

use crate::events::DomainEvents;
use crate::lock::{acquire_in_order, HeldLocks, InMemoryLock, InMemoryLockManager};
use crate::store::{InMemoryRecordStore, Record, RecordStore};
use crate::DispensaryError;

pub use dispense::DispenseOutcome;

/// The service facade over the inventory, patient, and prescription
/// stores.
///
/// Generic over the record store so a persistent backend can replace the
/// in-memory default; the per-key lock manager serializes conflicting
/// operations within this process.
pub struct Dispensary<S = InMemoryRecordStore> {
    store: S,
    locks: InMemoryLockManager,
    events: DomainEvents,
}

impl Dispensary<InMemoryRecordStore> {
    /// A dispensary over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryRecordStore::new())
    }
}

impl<S: RecordStore> Dispensary<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: InMemoryLockManager::new(),
            events: DomainEvents::new(),
        }
    }

    /// The underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The post-commit domain event hub.
    pub fn events(&self) -> &DomainEvents {
        &self.events
    }

    pub(crate) fn record_key<R: Record>(id: &str) -> String {
        format!("{}:{}", R::COLLECTION, id)
    }

    pub(crate) fn lock_all(
        &self,
        keys: Vec<String>,
    ) -> Result<HeldLocks<InMemoryLock>, DispensaryError> {
        Ok(acquire_in_order(&self.locks, keys)?)
    }
}
