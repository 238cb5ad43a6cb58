//! Records - Typed accessor for one record family.

use std::marker::PhantomData;

use super::{Record, RecordStore, StoreError, Versioned};

/// Typed view over a store for records of a specific type.
///
/// `Records<S, Medication>`, `Records<S, Patient>`, and
/// `Records<S, Prescription>` are the inventory, patient, and
/// prescription stores.
pub struct Records<'a, S, R> {
    store: &'a S,
    _marker: PhantomData<R>,
}

impl<'a, S: RecordStore, R: Record> Records<'a, S, R> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a record by ID.
    pub fn get(&self, id: &str) -> Result<Option<Versioned<R>>, StoreError> {
        self.store.get(id)
    }

    /// Insert a new record. Fails if it already exists.
    pub fn insert(&self, record: &R) -> Result<Versioned<R>, StoreError> {
        self.store.insert(record)
    }

    /// Update an existing record with optimistic concurrency.
    pub fn update(&self, record: &R, expected_version: u64) -> Result<Versioned<R>, StoreError> {
        self.store.update(record, expected_version)
    }

    /// Find records matching a predicate.
    pub fn find(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<Versioned<R>>, StoreError> {
        self.store.find(predicate)
    }

    /// All records in the collection, in no particular order.
    pub fn all(&self) -> Result<Vec<Versioned<R>>, StoreError> {
        self.store.find(&|_| true)
    }
}

/// Extension trait for typed record access on any RecordStore.
pub trait RecordsExt: RecordStore + Sized {
    /// Get a typed view for one record family.
    fn records<R: Record>(&self) -> Records<'_, Self, R> {
        Records::new(self)
    }
}

impl<S: RecordStore> RecordsExt for S {}
