//! WriteBatch - Stage ordered mutations for a single atomic commit.
//!
//! ## Example
//!
//! ```ignore
//! let mut batch = WriteBatch::new();
//! batch.insert(&prescription)?;
//! batch.update(&patient, patient_version)?;
//! store.apply(batch)?;
//! ```

use super::{Record, StoreError};

/// One staged write in serialized, type-erased form.
#[derive(Debug, Clone)]
pub enum StagedWrite {
    Insert {
        collection: &'static str,
        id: String,
        bytes: Vec<u8>,
    },
    Update {
        collection: &'static str,
        id: String,
        bytes: Vec<u8>,
        expected_version: u64,
    },
}

impl StagedWrite {
    pub fn collection(&self) -> &'static str {
        match self {
            StagedWrite::Insert { collection, .. } => collection,
            StagedWrite::Update { collection, .. } => collection,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            StagedWrite::Insert { id, .. } => id,
            StagedWrite::Update { id, .. } => id,
        }
    }
}

/// A unit of work: ordered mutations that commit all-or-nothing.
///
/// Records are serialized at staging time, so a serialization failure is
/// reported before the store is ever touched.
#[derive(Debug, Default)]
pub struct WriteBatch {
    writes: Vec<StagedWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an insert of a new record.
    pub fn insert<R: Record>(&mut self, record: &R) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.writes.push(StagedWrite::Insert {
            collection: R::COLLECTION,
            id: record.id().to_string(),
            bytes,
        });
        Ok(())
    }

    /// Stage an update of an existing record at the version observed when
    /// it was read.
    pub fn update<R: Record>(&mut self, record: &R, expected_version: u64) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.writes.push(StagedWrite::Update {
            collection: R::COLLECTION,
            id: record.id().to_string(),
            bytes,
            expected_version,
        });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// The staged writes, in staging order.
    pub fn writes(&self) -> &[StagedWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<StagedWrite> {
        self.writes
    }
}
