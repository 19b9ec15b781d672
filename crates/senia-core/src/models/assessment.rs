use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::audit::AuditEntry;
use super::section::{SectionData, SectionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentStatus {
    Draft,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FormMode {
    Edit,
    View,
    Print,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentMetadata {
    pub auto_save_enabled: bool,
    pub last_auto_save: Option<jiff::Timestamp>,
    pub total_time_spent_secs: i64,
    pub session_start_time: jiff::Timestamp,
    pub completion_percentage: u8,
}

/// The assessment aggregate root.
///
/// `sections` always contains exactly the fixed key set, fully initialized.
/// `id` is `None` exactly until the first successful create returns a remote
/// identifier; after that every save is an update against it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentData {
    pub id: Option<Uuid>,
    pub version: u32,
    pub last_modified: jiff::Timestamp,
    pub sections: BTreeMap<SectionKey, SectionData>,
    pub status: AssessmentStatus,
    pub audit: Vec<AuditEntry>,
    pub client_id: String,
    pub created_by: String,
    pub metadata: AssessmentMetadata,
}

impl AssessmentData {
    /// A fresh, never-persisted draft for the given user, with every section
    /// initialized empty.
    pub fn new(created_by: impl Into<String>, now: jiff::Timestamp) -> Self {
        let sections = SectionKey::ALL
            .into_iter()
            .map(|key| (key, SectionData::empty(now)))
            .collect();

        Self {
            id: None,
            version: 0,
            last_modified: now,
            sections,
            status: AssessmentStatus::Draft,
            audit: Vec::new(),
            client_id: String::new(),
            created_by: created_by.into(),
            metadata: AssessmentMetadata {
                auto_save_enabled: true,
                last_auto_save: None,
                total_time_spent_secs: 0,
                session_start_time: now,
                completion_percentage: 0,
            },
        }
    }

    pub fn section(&self, key: SectionKey) -> &SectionData {
        // The constructor initializes every key; absence is a logic error.
        &self.sections[&key]
    }
}
