#![allow(dead_code)] // not every test binary uses every helper

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use senia_core::models::user::UserContext;
use senia_engine::session::SessionConfig;
use senia_storage::error::StorageError;
use senia_storage::record::AssessmentRecord;
use senia_storage::DocumentStore;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub fn assessor() -> UserContext {
    UserContext::new("assessor-1", "care_manager")
}

/// Session config with auto-save off, for tests driving saves by hand.
pub fn manual_save() -> SessionConfig {
    SessionConfig {
        auto_save_enabled: false,
        ..SessionConfig::default()
    }
}

/// In-memory store that counts every call and can be told to fail.
#[derive(Default)]
pub struct CountingStore {
    records: Mutex<HashMap<Uuid, AssessmentRecord>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
    fetches: AtomicUsize,
    fail_creates: bool,
    fail_updates: bool,
    fail_fetches: bool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::default()
        }
    }

    pub fn failing_creates() -> Self {
        Self {
            fail_creates: true,
            ..Self::default()
        }
    }

    pub fn failing_fetches() -> Self {
        Self {
            fail_fetches: true,
            ..Self::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn io_calls(&self) -> usize {
        self.create_calls() + self.update_calls() + self.fetch_calls()
    }

    pub fn stored(&self, id: &Uuid) -> Option<AssessmentRecord> {
        self.records.lock().expect("store lock poisoned").get(id).cloned()
    }
}

impl DocumentStore for CountingStore {
    fn fetch_by_id<'a>(
        &'a self,
        id: &'a Uuid,
    ) -> BoxFuture<'a, Result<Option<AssessmentRecord>, StorageError>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetches {
                return Err(StorageError::Fetch("simulated outage".to_string()));
            }
            let records = self.records.lock().expect("store lock poisoned");
            Ok(records.get(id).cloned())
        })
    }

    fn create<'a>(
        &'a self,
        record: &'a AssessmentRecord,
    ) -> BoxFuture<'a, Result<Uuid, StorageError>> {
        Box::pin(async move {
            self.creates.fetch_add(1, Ordering::SeqCst);
            if self.fail_creates {
                return Err(StorageError::Create("simulated outage".to_string()));
            }
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
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.fail_updates {
                return Err(StorageError::Update("simulated failure".to_string()));
            }
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
