//! senia-storage
//!
//! The remote document-store boundary. Assessments cross this boundary as
//! flat, section-agnostic records; section structure is an in-memory
//! concept only. Ships an S3-backed production store and an in-memory
//! store for tests and local development.

pub mod error;
pub mod memory;
pub mod record;
pub mod s3;

use std::future::Future;
use std::pin::Pin;

use uuid::Uuid;

use crate::error::StorageError;
use crate::record::AssessmentRecord;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The three persistence operations the engine consumes.
///
/// `create` always yields a fresh identifier; `update` failure is
/// distinguishable from success. Methods return boxed futures for dyn
/// compatibility.
pub trait DocumentStore: Send + Sync {
    /// Fetch a record by id. `Ok(None)` means the record does not exist.
    fn fetch_by_id<'a>(
        &'a self,
        id: &'a Uuid,
    ) -> BoxFuture<'a, Result<Option<AssessmentRecord>, StorageError>>;

    /// Create a new record and return its generated identifier.
    fn create<'a>(
        &'a self,
        record: &'a AssessmentRecord,
    ) -> BoxFuture<'a, Result<Uuid, StorageError>>;

    /// Overwrite an existing record. Fails if the record does not exist.
    fn update<'a>(
        &'a self,
        id: &'a Uuid,
        record: &'a AssessmentRecord,
    ) -> BoxFuture<'a, Result<(), StorageError>>;
}
