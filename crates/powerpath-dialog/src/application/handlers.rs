//! Application-level handlers for guided sessions.
//!
//! A handler runs one transition to completion: the synchronous begin
//! phase, a single suspension point while the typing delay elapses,
//! then the completion phase. The session lock is never held across the
//! delay, so a restart can cancel an in-flight transition; the stale
//! completion is then discarded inside [`GuidedSession::complete`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use powerpath_core::clock::Clock;
use powerpath_core::error::GuideError;

use crate::domain::graph::Choice;
use crate::domain::session::GuidedSession;

/// Shared handle to a guided session.
pub type SharedGuidedSession = Arc<Mutex<GuidedSession>>;

/// Handles (re)initialization: emits the entry turn after the typing
/// delay. Idempotent and always applicable, including mid-transition.
///
/// # Errors
///
/// Returns [`GuideError::BrokenGraph`] only for an unvalidated graph.
pub async fn handle_initialize(
    session: &SharedGuidedSession,
    clock: &dyn Clock,
    typing_delay: Duration,
) -> Result<(), GuideError> {
    let pending = session.lock().await.begin_initialize();
    tokio::time::sleep(typing_delay).await;

    let mut guard = session.lock().await;
    if !guard.complete(pending, clock)? {
        tracing::debug!(session_id = %guard.id(), "initialization superseded by a later restart");
    }
    Ok(())
}

/// Handles a selection: appends the user turn, waits out the typing
/// delay, then lands the assistant turn and republishes the choices.
///
/// # Errors
///
/// [`GuideError::TransitionPending`] while another transition is in
/// flight; [`GuideError::BrokenGraph`] for an unvalidated graph.
pub async fn handle_select(
    session: &SharedGuidedSession,
    choice: &Choice,
    clock: &dyn Clock,
    typing_delay: Duration,
) -> Result<(), GuideError> {
    let pending = {
        let mut guard = session.lock().await;
        guard.begin_select(choice, clock)?
    };
    tokio::time::sleep(typing_delay).await;

    let mut guard = session.lock().await;
    if !guard.complete(pending, clock)? {
        tracing::debug!(session_id = %guard.id(), "selection discarded after restart");
    }
    Ok(())
}
