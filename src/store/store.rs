//! RecordStore - Abstract versioned CRUD storage for records.

use super::{Record, StoreError, Versioned, WriteBatch};

/// Abstract versioned storage for records.
///
/// Point lookups distinguish not-found (`None`) from any stored value,
/// and updates carry the version observed at read time so a concurrent
/// mutation surfaces as `StoreError::VersionConflict` instead of a lost
/// update.
pub trait RecordStore: Send + Sync {
    /// Get a record by ID. Returns None if not found.
    fn get<R: Record>(&self, id: &str) -> Result<Option<Versioned<R>>, StoreError>;

    /// Insert a new record. Fails with `DuplicateKey` if it already exists.
    fn insert<R: Record>(&self, record: &R) -> Result<Versioned<R>, StoreError>;

    /// Update an existing record with optimistic concurrency control.
    fn update<R: Record>(
        &self,
        record: &R,
        expected_version: u64,
    ) -> Result<Versioned<R>, StoreError>;

    /// Find records matching a predicate.
    fn find<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError>;

    /// Apply a staged batch of writes as a single atomic commit.
    ///
    /// Every precondition in the batch (insert keys absent, update
    /// versions current) is validated before any write lands; either the
    /// whole batch commits or none of it does. No caller may ever
    /// observe a partially applied batch.
    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
