use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The current user identity, consumed from the auth subsystem as an opaque
/// id and role. Stamped onto `created_by` and audit entries.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserContext {
    pub user_id: String,
    pub role: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: role.into(),
        }
    }
}
