use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::StorageError;
use crate::record::AssessmentRecord;
use crate::{BoxFuture, DocumentStore};

/// In-memory document store for tests and local development.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<Uuid, AssessmentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryStore {
    fn fetch_by_id<'a>(
        &'a self,
        id: &'a Uuid,
    ) -> BoxFuture<'a, Result<Option<AssessmentRecord>, StorageError>> {
        Box::pin(async move {
            let records = self.records.lock().expect("store lock poisoned");
            Ok(records.get(id).cloned())
        })
    }

    fn create<'a>(
        &'a self,
        record: &'a AssessmentRecord,
    ) -> BoxFuture<'a, Result<Uuid, StorageError>> {
        Box::pin(async move {
            let id = Uuid::new_v4();
            let mut records = self.records.lock().expect("store lock poisoned");
            records.insert(id, record.clone());
            Ok(id)
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a Uuid,
        record: &'a AssessmentRecord,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut records = self.records.lock().expect("store lock poisoned");
            match records.get_mut(id) {
                Some(existing) => {
                    *existing = record.clone();
                    Ok(())
                }
                None => Err(StorageError::NotFound { id: id.to_string() }),
            }
        })
    }
}
