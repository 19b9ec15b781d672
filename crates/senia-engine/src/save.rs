use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use senia_core::models::assessment::{AssessmentData, AssessmentStatus};
use senia_core::models::audit::{AuditAction, AuditEntry};
use senia_core::models::section::SectionKey;
use senia_storage::record::AssessmentRecord;

use crate::error::EngineError;
use crate::session::SessionInner;
use crate::state::{apply, Action, CLIENT_ID_FIELD};

/// What a successful save actually did.
///
/// `Recreated` is the update-failure fallback: the update was abandoned,
/// a fresh record was created, and the aggregate now answers to `new_id`.
/// The identity swap is observable here and in the audit history rather
/// than silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum SaveOutcome {
    Created { id: Uuid },
    Updated { id: Uuid },
    Recreated { old_id: Uuid, new_id: Uuid },
}

impl SaveOutcome {
    /// The identifier the aggregate carries after this save.
    pub fn id(&self) -> Uuid {
        match self {
            SaveOutcome::Created { id } | SaveOutcome::Updated { id } => *id,
            SaveOutcome::Recreated { new_id, .. } => *new_id,
        }
    }
}

/// Resolve the client identifier from the aggregate, falling back to the
/// basic-info section's client field.
pub(crate) fn resolve_client_id(assessment: &AssessmentData) -> Option<String> {
    let direct = assessment.client_id.trim();
    if !direct.is_empty() {
        return Some(direct.to_string());
    }
    assessment
        .sections
        .get(&SectionKey::BasicInfo)
        .and_then(|section| section.data.get(CLIENT_ID_FIELD))
        .and_then(|value| value.as_str())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// The persistence coordinator.
///
/// Flattens the aggregate, decides create-vs-update, assigns the remote
/// identifier on first save, and appends the audit entry. Serialized by
/// the session's save lock so a user save and a debounced auto-save can
/// never issue overlapping create/update calls.
pub(crate) async fn perform_save(
    inner: &SessionInner,
    requested: AssessmentStatus,
) -> Result<SaveOutcome, EngineError> {
    if inner.user.user_id.trim().is_empty() {
        return Err(EngineError::MissingUser);
    }

    let _guard = inner.save_lock.lock().await;

    // Snapshot under the state lock; no I/O while it is held.
    let (record, existing_id, effective) = {
        let now = jiff::Timestamp::now();
        let mut state = inner.state.lock().await;

        let client_id =
            resolve_client_id(&state.assessment).ok_or(EngineError::ClientNotSelected)?;
        if state.assessment.client_id.is_empty() {
            state.assessment.client_id = client_id.clone();
        }

        // Draft can become Complete but never the reverse.
        let effective = if state.assessment.status == AssessmentStatus::Complete {
            AssessmentStatus::Complete
        } else {
            requested
        };

        apply(&mut state, Action::SetSaving { saving: true }, now);

        let mut record = AssessmentRecord::flatten(&state.assessment);
        record.status = effective;
        record.client_id = client_id;
        (record, state.assessment.id, effective)
    };

    let result = match existing_id {
        Some(id) => match inner.store.update(&id, &record).await {
            Ok(()) => Ok(SaveOutcome::Updated { id }),
            Err(update_err) => {
                // A failed update never blocks saving; it degrades to a
                // fresh create under a new identity.
                tracing::warn!(
                    id = %id,
                    error = %update_err,
                    "update failed; falling back to create"
                );
                match inner.store.create(&record).await {
                    Ok(new_id) => Ok(SaveOutcome::Recreated { old_id: id, new_id }),
                    Err(create_err) => Err(EngineError::from(create_err)),
                }
            }
        },
        None => inner
            .store
            .create(&record)
            .await
            .map(|id| SaveOutcome::Created { id })
            .map_err(EngineError::from),
    };

    let now = jiff::Timestamp::now();
    let mut state = inner.state.lock().await;
    match &result {
        Ok(outcome) => {
            apply(
                &mut state,
                Action::MarkSaved {
                    id: outcome.id(),
                    status: effective,
                },
                now,
            );

            if let SaveOutcome::Recreated { old_id, new_id } = outcome {
                let entry = AuditEntry::new(
                    AuditAction::Create,
                    inner.user.user_id.as_str(),
                    format!("Update of {old_id} failed; record recreated as {new_id}"),
                    now,
                );
                emit_audit(&entry);
                apply(&mut state, Action::AppendAudit { entry }, now);
            }

            let description = match effective {
                AssessmentStatus::Complete => "Assessment completed",
                AssessmentStatus::Draft => "Draft saved",
            };
            let entry = AuditEntry::new(AuditAction::Save, inner.user.user_id.as_str(), description, now);
            emit_audit(&entry);
            apply(&mut state, Action::AppendAudit { entry }, now);

            tracing::info!(id = %outcome.id(), status = ?effective, "assessment saved");
        }
        Err(error) => {
            // Unsaved stays set; the failure is the caller's to surface.
            tracing::warn!(error = %error, "save failed");
        }
    }
    apply(&mut state, Action::SetSaving { saving: false }, now);
    drop(state);

    result
}

/// Mirror an audit entry as a structured tracing event.
fn emit_audit(entry: &AuditEntry) {
    tracing::info!(
        audit.action = ?entry.action,
        audit.user_id = %entry.user_id,
        audit.description = %entry.description,
        "audit event"
    );
}
