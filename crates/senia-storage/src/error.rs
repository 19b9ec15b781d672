use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record not found: {id}")]
    NotFound { id: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("create failed: {0}")]
    Create(String),

    #[error("update failed: {0}")]
    Update(String),

    #[error("fetch failed: {0}")]
    Fetch(String),
}
