//! Versioned record storage for the dispensary's three record families.
//!
//! The inventory, patient, and prescription stores are typed views
//! (`Records<S, Medication>` and friends) over one generic `RecordStore`.
//! Reads return `Versioned<T>` so writers can commit with
//! compare-and-swap semantics, and multi-record mutations go through a
//! `WriteBatch` that the store applies all-or-nothing.
//!
//! ## Example
//!
//! ```ignore
//! use dispensary::store::{InMemoryRecordStore, RecordsExt};
//!
//! let store = InMemoryRecordStore::new();
//! store.records::<Medication>().insert(&medication)?;
//! let found = store.records::<Medication>().get("M001")?;
//! ```

mod batch;
mod in_memory;
mod records;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be stored as records.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "medications").
    /// Maps to a table in SQL, a collection in a document store, or a
    /// key prefix in KV stores.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around record data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An insert collided with an existing record.
    #[error("duplicate key {collection}:{id}")]
    DuplicateKey { collection: String, id: String },

    /// A versioned update targeted a record that does not exist.
    #[error("record not found: {collection}:{id}")]
    NotFound { collection: String, id: String },

    /// Optimistic concurrency conflict: the record changed since it was read.
    #[error("version conflict on {collection}:{id} (expected {expected}, actual {actual})")]
    VersionConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },

    /// Serialization/deserialization error.
    #[error("record serialization error: {0}")]
    Serde(String),

    /// Storage-level error (poisoned lock, backend fault).
    #[error("storage error: {0}")]
    Backend(String),
}

pub use batch::{StagedWrite, WriteBatch};
pub use in_memory::InMemoryRecordStore;
pub use records::{Records, RecordsExt};
pub use store::RecordStore;
