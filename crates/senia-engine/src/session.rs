use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use senia_core::models::assessment::{AssessmentData, AssessmentStatus, FormMode};
use senia_core::models::section::SectionKey;
use senia_core::models::user::UserContext;
use senia_core::models::validation::ValidationError;
use senia_instruments::cognitive::{CognitiveResponses, CognitiveResult, EducationLevel};
use senia_instruments::depression::{DepressionResponses, DepressionResult};
use senia_storage::DocumentStore;

use crate::autosave::AutoSave;
use crate::completion;
use crate::error::EngineError;
use crate::export::{self, ExportFormat};
use crate::save::{self, SaveOutcome};
use crate::state::{apply, Action, AssessmentState};
use crate::validation;

/// Cognitive-exam section field holding the raw instrument responses.
pub const COGNITIVE_RESPONSES_FIELD: &str = "cognitiveResponses";
/// Cognitive-exam section field holding the recorded education level.
pub const EDUCATION_LEVEL_FIELD: &str = "educationLevel";
/// Depression-screening section field holding the raw instrument responses.
pub const DEPRESSION_RESPONSES_FIELD: &str = "depressionResponses";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period after the last edit before an auto-save fires.
    pub quiet_period: Duration,
    pub auto_save_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_secs(30),
            auto_save_enabled: true,
        }
    }
}

pub(crate) struct SessionInner {
    pub(crate) state: Mutex<AssessmentState>,
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) user: UserContext,
    pub(crate) config: SessionConfig,
    /// Single-flight save lock: one create/update in flight per session.
    pub(crate) save_lock: Mutex<()>,
}

/// The injected handle the presentation layer works through.
///
/// Owns the consolidated form state, the document-store collaborator, and
/// the auto-save scheduler. Replaces any process-global "current
/// assessment" slot: lifetime and visibility are scoped to whoever holds
/// the session, and dropping it tears down the auto-save task.
///
/// Must be constructed inside a tokio runtime (the auto-save task is
/// spawned on creation).
pub struct AssessmentSession {
    inner: Arc<SessionInner>,
    autosave: AutoSave,
}

impl AssessmentSession {
    /// A session around a fresh, never-persisted draft for `user`.
    pub fn new(store: Arc<dyn DocumentStore>, user: UserContext, config: SessionConfig) -> Self {
        let now = jiff::Timestamp::now();
        let mut state = AssessmentState::new(user.user_id.as_str(), now);
        state.assessment.metadata.auto_save_enabled = config.auto_save_enabled;

        let quiet_period = config.quiet_period;
        let inner = Arc::new(SessionInner {
            state: Mutex::new(state),
            store,
            user,
            config,
            save_lock: Mutex::new(()),
        });
        let autosave = AutoSave::spawn(Arc::downgrade(&inner), quiet_period);

        Self { inner, autosave }
    }

    pub fn user(&self) -> &UserContext {
        &self.inner.user
    }

    /// A full read-only snapshot of the current state.
    pub async fn snapshot(&self) -> AssessmentState {
        self.inner.state.lock().await.clone()
    }

    /// Apply one state transition. Edits arm the auto-save timer.
    pub async fn dispatch(&self, action: Action) {
        let is_edit = action.is_edit();
        let now = jiff::Timestamp::now();
        {
            let mut state = self.inner.state.lock().await;
            apply(&mut state, action, now);
        }
        if is_edit {
            self.autosave.notify();
        }
    }

    /// Set one field in one section.
    pub async fn update_field(
        &self,
        section: SectionKey,
        field: impl Into<String>,
        value: serde_json::Value,
    ) {
        self.dispatch(Action::UpdateField {
            section,
            field: field.into(),
            value,
        })
        .await;
    }

    pub async fn set_current_section(&self, section: SectionKey) {
        self.dispatch(Action::SetCurrentSection { section }).await;
    }

    pub async fn set_mode(&self, mode: FormMode) {
        self.dispatch(Action::SetMode { mode }).await;
    }

    /// Validate one section and refresh its stored errors and completion.
    ///
    /// Validation and completion are two independent computations; they
    /// are sequenced here explicitly rather than coupled inside the
    /// validator.
    pub async fn validate_section(&self, key: SectionKey) -> Vec<ValidationError> {
        let now = jiff::Timestamp::now();
        let mut state = self.inner.state.lock().await;

        let section = state.assessment.section(key);
        let errors = validation::validate_section(key, section);
        let percentage = completion::section_completion(key, section);

        apply(
            &mut state,
            Action::SetValidationErrors {
                section: key,
                errors: errors.clone(),
            },
            now,
        );
        apply(
            &mut state,
            Action::SetSectionCompletion {
                section: key,
                percentage,
            },
            now,
        );
        errors
    }

    /// Validate every section; returns only sections with findings.
    pub async fn validate_all(&self) -> BTreeMap<SectionKey, Vec<ValidationError>> {
        let now = jiff::Timestamp::now();
        let mut state = self.inner.state.lock().await;

        let results = validation::validate_all(&state.assessment.sections);
        let completions: Vec<(SectionKey, u8)> = state
            .assessment
            .sections
            .iter()
            .map(|(key, section)| (*key, completion::section_completion(*key, section)))
            .collect();

        for key in SectionKey::ALL {
            let errors = results.get(&key).cloned().unwrap_or_default();
            apply(
                &mut state,
                Action::SetValidationErrors {
                    section: key,
                    errors,
                },
                now,
            );
        }
        for (key, percentage) in completions {
            apply(
                &mut state,
                Action::SetSectionCompletion {
                    section: key,
                    percentage,
                },
                now,
            );
        }
        results
    }

    /// The stricter four-field basic-info progress indicator.
    pub async fn basic_progress(&self) -> u8 {
        let state = self.inner.state.lock().await;
        completion::basic_progress(state.assessment.section(SectionKey::BasicInfo))
    }

    /// Persist the assessment as a draft or as complete.
    pub async fn save(&self, status: AssessmentStatus) -> Result<SaveOutcome, EngineError> {
        save::perform_save(&self.inner, status).await
    }

    /// Render the denormalized record in the requested format.
    pub async fn export(&self, format: ExportFormat) -> Result<String, EngineError> {
        let state = self.inner.state.lock().await;
        export::export(&state, format)
    }

    /// Discard everything and start a fresh draft for the current user.
    pub async fn reset_form(&self) {
        let now = jiff::Timestamp::now();
        let mut assessment = AssessmentData::new(self.inner.user.user_id.as_str(), now);
        assessment.metadata.auto_save_enabled = self.inner.config.auto_save_enabled;
        self.dispatch(Action::Initialize {
            assessment: Box::new(assessment),
        })
        .await;
    }

    /// Hydrate an existing assessment from the store.
    ///
    /// Load failures are logged and degrade to an empty draft; the UI is
    /// never left stuck on the loading flag.
    pub async fn load(&self, id: Uuid) {
        self.dispatch(Action::SetLoading { loading: true }).await;

        let now = jiff::Timestamp::now();
        let mut assessment = match self.inner.store.fetch_by_id(&id).await {
            Ok(Some(record)) => record.hydrate(id, now),
            Ok(None) => {
                tracing::warn!(id = %id, "assessment not found; starting empty");
                AssessmentData::new(self.inner.user.user_id.as_str(), now)
            }
            Err(error) => {
                tracing::warn!(id = %id, error = %error, "failed to load assessment; starting empty");
                AssessmentData::new(self.inner.user.user_id.as_str(), now)
            }
        };
        assessment.metadata.auto_save_enabled = self.inner.config.auto_save_enabled;

        let mut state = self.inner.state.lock().await;
        apply(
            &mut state,
            Action::Initialize {
                assessment: Box::new(assessment),
            },
            now,
        );

        let completions: Vec<(SectionKey, u8)> = state
            .assessment
            .sections
            .iter()
            .map(|(key, section)| (*key, completion::section_completion(*key, section)))
            .collect();
        for (key, percentage) in completions {
            apply(
                &mut state,
                Action::SetSectionCompletion {
                    section: key,
                    percentage,
                },
                now,
            );
        }
        apply(&mut state, Action::SetLoading { loading: false }, now);
    }

    /// Score the cognitive exam from the recorded responses.
    pub async fn cognitive_result(&self) -> Result<CognitiveResult, EngineError> {
        let state = self.inner.state.lock().await;
        let section = state.assessment.section(SectionKey::CognitiveExam);

        let responses: CognitiveResponses = match section.data.get(COGNITIVE_RESPONSES_FIELD) {
            Some(value) if !value.is_null() => serde_json::from_value(value.clone())?,
            _ => CognitiveResponses::default(),
        };
        let education: Option<EducationLevel> = match section.data.get(EDUCATION_LEVEL_FIELD) {
            Some(value) if !value.is_null() => Some(serde_json::from_value(value.clone())?),
            _ => None,
        };
        Ok(CognitiveResult::score(&responses, education))
    }

    /// Score the depression screening from the recorded responses.
    pub async fn depression_result(&self) -> Result<DepressionResult, EngineError> {
        let state = self.inner.state.lock().await;
        let section = state.assessment.section(SectionKey::DepressionScreening);

        let responses: DepressionResponses = match section.data.get(DEPRESSION_RESPONSES_FIELD) {
            Some(value) if !value.is_null() => serde_json::from_value(value.clone())?,
            _ => DepressionResponses::default(),
        };
        Ok(DepressionResult::score(&responses))
    }
}
