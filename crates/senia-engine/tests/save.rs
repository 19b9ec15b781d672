mod common;

use std::sync::Arc;

use serde_json::json;

use common::{assessor, manual_save, CountingStore};
use senia_core::models::assessment::AssessmentStatus;
use senia_core::models::audit::AuditAction;
use senia_core::models::section::SectionKey;
use senia_core::models::user::UserContext;
use senia_engine::error::EngineError;
use senia_engine::save::SaveOutcome;
use senia_engine::session::AssessmentSession;

async fn session_with_client(store: Arc<CountingStore>) -> AssessmentSession {
    let session = AssessmentSession::new(store, assessor(), manual_save());
    session
        .update_field(SectionKey::BasicInfo, "clientId", json!("client-42"))
        .await;
    session
}

#[tokio::test]
async fn save_without_a_client_fails_and_performs_zero_io() {
    let store = Arc::new(CountingStore::new());
    let session = AssessmentSession::new(store.clone(), assessor(), manual_save());

    let err = session
        .save(AssessmentStatus::Draft)
        .await
        .expect_err("save must fail without a client");

    assert!(matches!(err, EngineError::ClientNotSelected));
    assert!(err.is_user_input());
    assert_eq!(store.io_calls(), 0);
    assert_eq!(session.snapshot().await.assessment.id, None);
}

#[tokio::test]
async fn save_without_a_user_identity_is_fatal() {
    let store = Arc::new(CountingStore::new());
    let session = AssessmentSession::new(
        store.clone(),
        UserContext::new("", "care_manager"),
        manual_save(),
    );
    session
        .update_field(SectionKey::BasicInfo, "clientId", json!("client-42"))
        .await;

    let err = session
        .save(AssessmentStatus::Draft)
        .await
        .expect_err("save must fail without a user");

    assert!(matches!(err, EngineError::MissingUser));
    assert_eq!(store.io_calls(), 0);
}

#[tokio::test]
async fn first_save_creates_and_second_save_updates() {
    let store = Arc::new(CountingStore::new());
    let session = session_with_client(store.clone()).await;

    let first = session.save(AssessmentStatus::Draft).await.expect("first save");
    let id = match first {
        SaveOutcome::Created { id } => id,
        other => panic!("expected Created, got {other:?}"),
    };
    assert_eq!(store.create_calls(), 1);
    assert_eq!(store.update_calls(), 0);

    let second = session.save(AssessmentStatus::Draft).await.expect("second save");
    assert_eq!(second, SaveOutcome::Updated { id });
    assert_eq!(store.create_calls(), 1, "second save must not create again");
    assert_eq!(store.update_calls(), 1);
}

#[tokio::test]
async fn successful_save_clears_unsaved_and_appends_audit() {
    let store = Arc::new(CountingStore::new());
    let session = session_with_client(store.clone()).await;
    assert!(session.snapshot().await.has_unsaved_changes);

    session.save(AssessmentStatus::Draft).await.expect("save");

    let state = session.snapshot().await;
    assert!(!state.has_unsaved_changes);
    assert!(!state.is_saving);
    assert_eq!(state.assessment.version, 1);

    let saves: Vec<&str> = state
        .assessment
        .audit
        .iter()
        .filter(|e| e.action == AuditAction::Save)
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(saves, ["Draft saved"]);
    assert_eq!(state.assessment.audit[0].user_id, "assessor-1");
}

#[tokio::test]
async fn completing_records_its_own_audit_description() {
    let store = Arc::new(CountingStore::new());
    let session = session_with_client(store.clone()).await;

    session.save(AssessmentStatus::Complete).await.expect("save");

    let state = session.snapshot().await;
    assert_eq!(state.assessment.status, AssessmentStatus::Complete);
    assert!(state
        .assessment
        .audit
        .iter()
        .any(|e| e.description == "Assessment completed"));
}

#[tokio::test]
async fn a_completed_assessment_never_regresses_to_draft() {
    let store = Arc::new(CountingStore::new());
    let session = session_with_client(store.clone()).await;

    session.save(AssessmentStatus::Complete).await.expect("complete");
    session
        .update_field(SectionKey::FinalSummary, "summaryNotes", json!("addendum"))
        .await;
    session.save(AssessmentStatus::Draft).await.expect("re-save");

    let state = session.snapshot().await;
    assert_eq!(state.assessment.status, AssessmentStatus::Complete);

    let id = state.assessment.id.expect("persisted");
    let stored = store.stored(&id).expect("record exists");
    assert_eq!(stored.status, AssessmentStatus::Complete);
}

#[tokio::test]
async fn update_failure_falls_back_to_exactly_one_create() {
    let store = Arc::new(CountingStore::failing_updates());
    let session = session_with_client(store.clone()).await;

    let first = session.save(AssessmentStatus::Draft).await.expect("first save");
    let old_id = first.id();
    assert_eq!(store.create_calls(), 1);

    session
        .update_field(SectionKey::HealthSymptoms, "painLevel", json!(4))
        .await;
    let second = session.save(AssessmentStatus::Draft).await.expect("fallback save");

    match second {
        SaveOutcome::Recreated { old_id: old, new_id } => {
            assert_eq!(old, old_id);
            assert_ne!(new_id, old_id);
            // The aggregate now answers to the new identity.
            let state = session.snapshot().await;
            assert_eq!(state.assessment.id, Some(new_id));
            assert!(!state.has_unsaved_changes);
        }
        other => panic!("expected Recreated, got {other:?}"),
    }

    assert_eq!(store.update_calls(), 1);
    assert_eq!(store.create_calls(), 2, "fallback is a single create");
}

#[tokio::test]
async fn identity_swap_is_audited() {
    let store = Arc::new(CountingStore::failing_updates());
    let session = session_with_client(store.clone()).await;

    session.save(AssessmentStatus::Draft).await.expect("first save");
    session
        .update_field(SectionKey::HealthSymptoms, "painLevel", json!(2))
        .await;
    session.save(AssessmentStatus::Draft).await.expect("fallback save");

    let state = session.snapshot().await;
    assert!(state
        .assessment
        .audit
        .iter()
        .any(|e| e.action == AuditAction::Create && e.description.contains("recreated")));
}

#[tokio::test]
async fn create_failure_propagates_and_keeps_unsaved_set() {
    let store = Arc::new(CountingStore::failing_creates());
    let session = session_with_client(store.clone()).await;

    let err = session
        .save(AssessmentStatus::Draft)
        .await
        .expect_err("create outage must surface");

    assert!(matches!(err, EngineError::Storage(_)));
    assert!(!err.is_user_input());

    let state = session.snapshot().await;
    assert!(state.has_unsaved_changes, "unsaved stays set on failure");
    assert!(!state.is_saving);
    assert_eq!(state.assessment.id, None, "no partial identifier");
}

#[tokio::test]
async fn client_id_is_resolvable_from_the_basic_section_alone() {
    let store = Arc::new(CountingStore::new());
    let session = AssessmentSession::new(store.clone(), assessor(), manual_save());

    // Write the field map directly; the aggregate-level client_id is
    // still empty until the reducer or the coordinator resolves it.
    let mut patch = serde_json::Map::new();
    patch.insert("clientId".to_string(), json!("client-7"));
    session
        .dispatch(senia_engine::state::Action::UpdateSection {
            section: SectionKey::BasicInfo,
            patch,
        })
        .await;
    assert_eq!(session.snapshot().await.assessment.client_id, "");

    session.save(AssessmentStatus::Draft).await.expect("save");

    let state = session.snapshot().await;
    assert_eq!(state.assessment.client_id, "client-7");
    let id = state.assessment.id.expect("persisted");
    assert_eq!(store.stored(&id).expect("record").client_id, "client-7");
}
