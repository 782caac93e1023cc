use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use proto::StorageError;
use serde_json::Value;

use crate::backend::{Collection, KvStore, Write};

/// In-process store used when no database file can be opened.
///
/// Contents live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<(Collection, String), Value>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all collections.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns `true` when no collection holds a record.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self
            .records
            .lock()
            .get(&(collection, key.to_string()))
            .cloned())
    }

    async fn set(
        &self,
        collection: Collection,
        key: &str,
        value: Value,
    ) -> Result<(), StorageError> {
        self.records
            .lock()
            .insert((collection, key.to_string()), value);
        Ok(())
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<Value>, StorageError> {
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|((c, _), _)| *c == collection)
            .map(|(_, value)| value.clone())
            .collect())
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StorageError> {
        self.records.lock().remove(&(collection, key.to_string()));
        Ok(())
    }

    async fn clear(&self, collection: Collection) -> Result<(), StorageError> {
        self.records.lock().retain(|(c, _), _| *c != collection);
        Ok(())
    }

    async fn set_many(&self, writes: Vec<Write>) -> Result<(), StorageError> {
        let mut records = self.records.lock();
        for write in writes {
            records.insert((write.collection, write.key), write.value);
        }
        Ok(())
    }
}
