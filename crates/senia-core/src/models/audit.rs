use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Submit,
    Save,
}

/// An append-only audit history entry on the assessment aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: jiff::Timestamp,
    pub user_id: String,
    pub action: AuditAction,
    pub description: String,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        user_id: impl Into<String>,
        description: impl Into<String>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: now,
            user_id: user_id.into(),
            action,
            description: description.into(),
        }
    }
}
