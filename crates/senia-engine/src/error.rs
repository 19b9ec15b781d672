use thiserror::Error;

use crate::export::ExportFormat;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No user identity — saving requires a signed-in user.
    #[error("no user identity; sign in before saving")]
    MissingUser,

    /// No client resolvable from the aggregate or the basic-info section.
    /// Rendered to the user as an actionable message, never just logged.
    #[error("select a client before saving")]
    ClientNotSelected,

    #[error("storage error: {0}")]
    Storage(#[from] senia_storage::error::StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("export format not supported: {0:?}")]
    UnsupportedExport(ExportFormat),
}

impl EngineError {
    /// Whether this failure is user-correctable input (vs. infrastructure).
    pub fn is_user_input(&self) -> bool {
        matches!(self, EngineError::MissingUser | EngineError::ClientNotSelected)
    }
}
