//! InMemoryRecordStore - HashMap-backed record store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Record, RecordStore, StagedWrite, StoreError, Versioned, WriteBatch};

/// Internal stored representation of a record.
struct StoredRecord {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory record store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc: clones share
/// the same storage.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<HashMap<String, StoredRecord>>>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Create a new empty record store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn decode<R: Record>(stored: &StoredRecord) -> Result<Versioned<R>, StoreError> {
        let data: R = serde_json::from_slice(&stored.bytes)
            .map_err(|e| StoreError::Serde(e.to_string()))?;
        Ok(Versioned {
            data,
            version: stored.version,
        })
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get<R: Record>(&self, id: &str) -> Result<Option<Versioned<R>>, StoreError> {
        let key = Self::make_key(R::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        match storage.get(&key) {
            Some(stored) => Ok(Some(Self::decode(stored)?)),
            None => Ok(None),
        }
    }

    fn insert<R: Record>(&self, record: &R) -> Result<Versioned<R>, StoreError> {
        let key = Self::make_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        if storage.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                collection: R::COLLECTION.to_string(),
                id: record.id().to_string(),
            });
        }

        storage.insert(key, StoredRecord { bytes, version: 1 });

        Ok(Versioned {
            data: record.clone(),
            version: 1,
        })
    }

    fn update<R: Record>(
        &self,
        record: &R,
        expected_version: u64,
    ) -> Result<Versioned<R>, StoreError> {
        let key = Self::make_key(R::COLLECTION, record.id());
        let bytes = serde_json::to_vec(record).map_err(|e| StoreError::Serde(e.to_string()))?;

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let actual_version = storage
            .get(&key)
            .map(|s| s.version)
            .ok_or_else(|| StoreError::NotFound {
                collection: R::COLLECTION.to_string(),
                id: record.id().to_string(),
            })?;

        if actual_version != expected_version {
            return Err(StoreError::VersionConflict {
                collection: R::COLLECTION.to_string(),
                id: record.id().to_string(),
                expected: expected_version,
                actual: actual_version,
            });
        }

        let new_version = actual_version + 1;
        storage.insert(
            key,
            StoredRecord {
                bytes,
                version: new_version,
            },
        );

        Ok(Versioned {
            data: record.clone(),
            version: new_version,
        })
    }

    fn find<R: Record>(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<Vec<Versioned<R>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let prefix = format!("{}:", R::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.iter() {
            if key.starts_with(&prefix) {
                if let Ok(found) = Self::decode::<R>(stored) {
                    if predicate(&found.data) {
                        results.push(found);
                    }
                }
            }
        }

        Ok(results)
    }

    fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        // Validate every precondition before any write lands.
        for write in batch.writes() {
            let key = Self::make_key(write.collection(), write.id());
            match write {
                StagedWrite::Insert { .. } => {
                    if storage.contains_key(&key) {
                        return Err(StoreError::DuplicateKey {
                            collection: write.collection().to_string(),
                            id: write.id().to_string(),
                        });
                    }
                }
                StagedWrite::Update {
                    expected_version, ..
                } => {
                    let actual = storage
                        .get(&key)
                        .map(|s| s.version)
                        .ok_or_else(|| StoreError::NotFound {
                            collection: write.collection().to_string(),
                            id: write.id().to_string(),
                        })?;
                    if actual != *expected_version {
                        return Err(StoreError::VersionConflict {
                            collection: write.collection().to_string(),
                            id: write.id().to_string(),
                            expected: *expected_version,
                            actual,
                        });
                    }
                }
            }
        }

        for write in batch.into_writes() {
            match write {
                StagedWrite::Insert {
                    collection,
                    id,
                    bytes,
                } => {
                    let key = Self::make_key(collection, &id);
                    storage.insert(key, StoredRecord { bytes, version: 1 });
                }
                StagedWrite::Update {
                    collection,
                    id,
                    bytes,
                    expected_version,
                } => {
                    let key = Self::make_key(collection, &id);
                    storage.insert(
                        key,
                        StoredRecord {
                            bytes,
                            version: expected_version + 1,
                        },
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        id: String,
        value: i32,
    }

    impl Record for TestRecord {
        const COLLECTION: &'static str = "test_records";
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn record(id: &str, value: i32) -> TestRecord {
        TestRecord {
            id: id.into(),
            value,
        }
    }

    #[test]
    fn insert_and_get() {
        let store = InMemoryRecordStore::new();

        let saved = store.insert(&record("1", 42)).unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(saved.data.value, 42);

        let loaded = store.get::<TestRecord>("1").unwrap().unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.data.value, 42);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryRecordStore::new();
        let result = store.get::<TestRecord>("missing").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn insert_fails_on_existing() {
        let store = InMemoryRecordStore::new();

        store.insert(&record("1", 1)).unwrap();
        let err = store.insert(&record("1", 2)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));

        // Original value intact.
        let loaded = store.get::<TestRecord>("1").unwrap().unwrap();
        assert_eq!(loaded.data.value, 1);
    }

    #[test]
    fn update_with_correct_version() {
        let store = InMemoryRecordStore::new();
        store.insert(&record("1", 1)).unwrap();

        let result = store.update(&record("1", 2), 1).unwrap();
        assert_eq!(result.version, 2);
        assert_eq!(result.data.value, 2);
    }

    #[test]
    fn update_with_wrong_version_fails() {
        let store = InMemoryRecordStore::new();
        store.insert(&record("1", 1)).unwrap();

        let err = store.update(&record("1", 2), 99).unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));
    }

    #[test]
    fn update_missing_fails() {
        let store = InMemoryRecordStore::new();
        let err = store.update(&record("ghost", 1), 1).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn find_with_predicate() {
        let store = InMemoryRecordStore::new();

        store.insert(&record("1", 10)).unwrap();
        store.insert(&record("2", 20)).unwrap();
        store.insert(&record("3", 5)).unwrap();

        let results = store.find::<TestRecord>(&|r| r.value > 8).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn clone_shares_storage() {
        let store = InMemoryRecordStore::new();
        let clone = store.clone();

        store.insert(&record("1", 42)).unwrap();

        let loaded = clone.get::<TestRecord>("1").unwrap().unwrap();
        assert_eq!(loaded.data.value, 42);
    }

    #[test]
    fn apply_commits_all_writes() {
        let store = InMemoryRecordStore::new();
        store.insert(&record("1", 1)).unwrap();

        let mut batch = WriteBatch::new();
        batch.update(&record("1", 2), 1).unwrap();
        batch.insert(&record("2", 20)).unwrap();
        store.apply(batch).unwrap();

        assert_eq!(store.get::<TestRecord>("1").unwrap().unwrap().data.value, 2);
        assert_eq!(store.get::<TestRecord>("1").unwrap().unwrap().version, 2);
        assert_eq!(
            store.get::<TestRecord>("2").unwrap().unwrap().data.value,
            20
        );
    }

    #[test]
    fn apply_is_all_or_nothing_on_version_conflict() {
        let store = InMemoryRecordStore::new();
        store.insert(&record("1", 1)).unwrap();

        let mut batch = WriteBatch::new();
        batch.insert(&record("2", 20)).unwrap();
        batch.update(&record("1", 2), 99).unwrap(); // stale version

        let err = store.apply(batch).unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));

        // Neither write landed, even though the insert was staged first.
        assert!(store.get::<TestRecord>("2").unwrap().is_none());
        assert_eq!(store.get::<TestRecord>("1").unwrap().unwrap().data.value, 1);
    }

    #[test]
    fn apply_is_all_or_nothing_on_duplicate_insert() {
        let store = InMemoryRecordStore::new();
        store.insert(&record("1", 1)).unwrap();

        let mut batch = WriteBatch::new();
        batch.update(&record("1", 5), 1).unwrap();
        batch.insert(&record("1", 9)).unwrap(); // collides

        let err = store.apply(batch).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(store.get::<TestRecord>("1").unwrap().unwrap().data.value, 1);
    }

    #[test]
    fn apply_empty_batch_is_noop() {
        let store = InMemoryRecordStore::new();
        store.apply(WriteBatch::new()).unwrap();
    }
}
