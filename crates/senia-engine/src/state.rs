use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use senia_core::models::assessment::{AssessmentData, AssessmentStatus, FormMode};
use senia_core::models::audit::AuditEntry;
use senia_core::models::section::SectionKey;
use senia_core::models::validation::ValidationError;

/// The basic-info field that doubles as the aggregate's client identifier.
pub const CLIENT_ID_FIELD: &str = "clientId";

/// The consolidated form state: the aggregate plus navigation position,
/// save/loading flags and the validation-error map.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentState {
    pub assessment: AssessmentData,
    pub current_section: SectionKey,
    pub mode: FormMode,
    pub is_loading: bool,
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    pub validation_errors: BTreeMap<SectionKey, Vec<ValidationError>>,
}

impl AssessmentState {
    /// A fresh state around a never-persisted draft for the given user.
    pub fn new(created_by: impl Into<String>, now: jiff::Timestamp) -> Self {
        Self {
            assessment: AssessmentData::new(created_by, now),
            current_section: SectionKey::BasicInfo,
            mode: FormMode::Edit,
            is_loading: false,
            is_saving: false,
            has_unsaved_changes: false,
            validation_errors: BTreeMap::new(),
        }
    }
}

/// State transitions. Applied synchronously by [`apply`]; all I/O is
/// orchestrated outside the reducer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Action {
    SetLoading {
        loading: bool,
    },
    SetSaving {
        saving: bool,
    },
    SetCurrentSection {
        section: SectionKey,
    },
    /// Merge a partial field map into one section.
    UpdateSection {
        section: SectionKey,
        patch: serde_json::Map<String, serde_json::Value>,
    },
    /// Set one field in one section's data.
    UpdateField {
        section: SectionKey,
        field: String,
        value: serde_json::Value,
    },
    SetValidationErrors {
        section: SectionKey,
        errors: Vec<ValidationError>,
    },
    SetUnsavedChanges {
        unsaved: bool,
    },
    SetMode {
        mode: FormMode,
    },
    /// Full replace — used on load and reset. Clears the unsaved flag and
    /// the validation-error map.
    Initialize {
        assessment: Box<AssessmentData>,
    },
    AppendAudit {
        entry: AuditEntry,
    },
    RecordAutoSave {
        timestamp: jiff::Timestamp,
    },
    SetSectionCompletion {
        section: SectionKey,
        percentage: u8,
    },
    /// Post-save bookkeeping: identity assignment, status transition,
    /// version bump, unsaved-flag clear. Dispatched by the persistence
    /// coordinator after a successful create or update.
    MarkSaved {
        id: Uuid,
        status: AssessmentStatus,
    },
}

impl Action {
    /// Whether this action is a user edit that should (re)start the
    /// auto-save quiet period.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Action::UpdateSection { .. }
                | Action::UpdateField { .. }
                | Action::SetUnsavedChanges { unsaved: true }
        )
    }
}

/// The pure reducer. Synchronous, no I/O; `now` is injected so transitions
/// stay deterministic under test.
pub fn apply(state: &mut AssessmentState, action: Action, now: jiff::Timestamp) {
    match action {
        Action::SetLoading { loading } => state.is_loading = loading,
        Action::SetSaving { saving } => state.is_saving = saving,
        Action::SetCurrentSection { section } => state.current_section = section,

        Action::UpdateSection { section, patch } => {
            if let Some(data) = state.assessment.sections.get_mut(&section) {
                for (field, value) in patch {
                    data.data.insert(field, value);
                }
                data.last_updated = now;
            }
            state.assessment.last_modified = now;
            state.has_unsaved_changes = true;
        }

        Action::UpdateField {
            section,
            field,
            value,
        } => {
            // The client selector lives on basic-info but identifies the
            // whole aggregate; keep both in step.
            if section == SectionKey::BasicInfo && field == CLIENT_ID_FIELD {
                state.assessment.client_id = value.as_str().unwrap_or_default().to_string();
            }
            if let Some(data) = state.assessment.sections.get_mut(&section) {
                data.data.insert(field, value);
                data.last_updated = now;
            }
            state.assessment.last_modified = now;
            state.has_unsaved_changes = true;
        }

        Action::SetValidationErrors { section, errors } => {
            if let Some(data) = state.assessment.sections.get_mut(&section) {
                data.is_valid = errors.is_empty();
                data.validation_errors = errors.clone();
            }
            if errors.is_empty() {
                state.validation_errors.remove(&section);
            } else {
                state.validation_errors.insert(section, errors);
            }
        }

        Action::SetUnsavedChanges { unsaved } => state.has_unsaved_changes = unsaved,
        Action::SetMode { mode } => state.mode = mode,

        Action::Initialize { assessment } => {
            state.assessment = *assessment;
            state.has_unsaved_changes = false;
            state.validation_errors.clear();
        }

        Action::AppendAudit { entry } => state.assessment.audit.push(entry),

        Action::RecordAutoSave { timestamp } => {
            state.assessment.metadata.last_auto_save = Some(timestamp);
        }

        Action::SetSectionCompletion {
            section,
            percentage,
        } => {
            if let Some(data) = state.assessment.sections.get_mut(&section) {
                data.completion_percentage = percentage;
                data.is_complete = percentage == 100;
            }
            // Overall completion is the uniform average across sections.
            let sections = &state.assessment.sections;
            let sum: u32 = sections
                .values()
                .map(|s| s.completion_percentage as u32)
                .sum();
            state.assessment.metadata.completion_percentage =
                (sum as f64 / sections.len() as f64).round() as u8;
        }

        Action::MarkSaved { id, status } => {
            state.assessment.id = Some(id);
            // Complete never regresses to Draft.
            if state.assessment.status != AssessmentStatus::Complete {
                state.assessment.status = status;
            }
            state.assessment.version += 1;
            state.assessment.last_modified = now;
            state.assessment.metadata.total_time_spent_secs = now
                .duration_since(state.assessment.metadata.session_start_time)
                .as_secs();
            state.has_unsaved_changes = false;
        }
    }
}
