use std::sync::Weak;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use senia_core::models::assessment::AssessmentStatus;

use crate::save;
use crate::session::SessionInner;
use crate::state::{apply, Action};

/// Debounced auto-save trigger.
///
/// Every edit notification (re)starts the quiet-period timer; when it
/// elapses with unsaved changes still pending, one `save(Draft)` is
/// issued. The background task holds only a `Weak` session reference and
/// is aborted on drop, so neither the timer nor a pending save
/// continuation can outlive the session.
pub(crate) struct AutoSave {
    tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl AutoSave {
    pub(crate) fn spawn(session: Weak<SessionInner>, quiet_period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let retry_tx = tx.clone();
        let task = tokio::spawn(run(session, rx, retry_tx, quiet_period));
        Self { tx, task }
    }

    /// (Re)start the quiet-period timer.
    pub(crate) fn notify(&self) {
        let _ = self.tx.send(());
    }
}

impl Drop for AutoSave {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    session: Weak<SessionInner>,
    mut rx: mpsc::UnboundedReceiver<()>,
    retry_tx: mpsc::UnboundedSender<()>,
    quiet_period: Duration,
) {
    while rx.recv().await.is_some() {
        // Debounce: any further edit before the quiet period elapses
        // restarts the timer.
        loop {
            tokio::select! {
                signal = rx.recv() => {
                    if signal.is_none() {
                        return;
                    }
                }
                _ = tokio::time::sleep(quiet_period) => {
                    let Some(session) = session.upgrade() else { return };
                    attempt(&session, &retry_tx).await;
                    break;
                }
            }
        }
    }
}

async fn attempt(session: &SessionInner, retry_tx: &mpsc::UnboundedSender<()>) {
    let armed = {
        let state = session.state.lock().await;
        state.assessment.metadata.auto_save_enabled && state.has_unsaved_changes
    };
    if !armed {
        return;
    }

    // Auto-save only ever requests Draft, never Complete.
    match save::perform_save(session, AssessmentStatus::Draft).await {
        Ok(outcome) => {
            let now = jiff::Timestamp::now();
            let mut state = session.state.lock().await;
            apply(&mut state, Action::RecordAutoSave { timestamp: now }, now);
            tracing::debug!(outcome = ?outcome, "auto-saved draft");
        }
        Err(error) if error.is_user_input() => {
            // Nothing to retry until the user fills in what's missing.
            tracing::debug!(error = %error, "auto-save skipped");
        }
        Err(error) => {
            tracing::warn!(error = %error, "auto-save failed; retrying next cycle");
            let _ = retry_tx.send(());
        }
    }
}
