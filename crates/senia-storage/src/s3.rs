use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;
use uuid::Uuid;

use crate::error::StorageError;
use crate::record::AssessmentRecord;
use crate::{BoxFuture, DocumentStore};

/// S3-backed document store. One JSON object per assessment under
/// `assessments/{id}.json`.
pub struct S3DocumentStore {
    client: Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn key(id: &Uuid) -> String {
        format!("assessments/{id}.json")
    }

    async fn get_record(&self, id: &Uuid) -> Result<Option<AssessmentRecord>, StorageError> {
        let key = Self::key(id);
        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let err = e.into_service_error();
                if err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(StorageError::Fetch(err.to_string()));
            }
        };

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Fetch(e.to_string()))?
            .into_bytes();

        let record: AssessmentRecord = serde_json::from_slice(&body)?;
        Ok(Some(record))
    }

    async fn put_record(&self, id: &Uuid, record: &AssessmentRecord) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(record)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(Self::key(id))
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Update(e.into_service_error().to_string()))?;
        Ok(())
    }
}

impl DocumentStore for S3DocumentStore {
    fn fetch_by_id<'a>(
        &'a self,
        id: &'a Uuid,
    ) -> BoxFuture<'a, Result<Option<AssessmentRecord>, StorageError>> {
        Box::pin(self.get_record(id))
    }

    fn create<'a>(
        &'a self,
        record: &'a AssessmentRecord,
    ) -> BoxFuture<'a, Result<Uuid, StorageError>> {
        Box::pin(async move {
            let id = Uuid::new_v4();
            let body = serde_json::to_vec_pretty(record)?;
            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(Self::key(&id))
                .content_type("application/json")
                .body(ByteStream::from(body))
                .send()
                .await
                .map_err(|e| StorageError::Create(e.into_service_error().to_string()))?;

            tracing::debug!(bucket = %self.bucket, id = %id, "created assessment record");
            Ok(id)
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a Uuid,
        record: &'a AssessmentRecord,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            // An update against a missing record must fail, not quietly
            // create one; the caller decides how to recover.
            if self.get_record(id).await?.is_none() {
                return Err(StorageError::NotFound { id: id.to_string() });
            }
            self.put_record(id, record).await?;
            tracing::debug!(bucket = %self.bucket, id = %id, "updated assessment record");
            Ok(())
        })
    }
}
