//! Assisted sessions — free-text exchanges proxied to the collaborator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use powerpath_core::clock::Clock;
use powerpath_core::collaborator::Collaborator;
use powerpath_core::error::GuideError;
use powerpath_core::gate::{GateTicket, TransitionGate};
use powerpath_core::turn::Turn;

use crate::briefing::{APOLOGY, GREETING};
use crate::reply::{AssistantReply, parse_completion, shape_reply};

/// A single user's free-text conversation with the collaborator.
///
/// Exchanges are two-phase like guided transitions: the begin phase
/// appends the user turn and reserves the gate, the collaborator call
/// is the suspension point, and the completion phase lands the
/// assistant turn. A restart issued while a call is in flight
/// invalidates its ticket, so a late-arriving response is discarded.
#[derive(Debug)]
pub struct AssistedSession {
    id: Uuid,
    transcript: Vec<Turn>,
    live_options: Vec<String>,
    gate: TransitionGate,
}

impl AssistedSession {
    /// Creates an empty session. No turn is visible until the first
    /// initialization completes.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            transcript: Vec::new(),
            live_options: Vec::new(),
            gate: TransitionGate::new(),
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the ordered turn history.
    #[must_use]
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Suggested reply labels valid right now. Empty while an exchange
    /// is in flight, after a danger turn, and whenever the collaborator
    /// expects free text.
    #[must_use]
    pub fn current_options(&self) -> &[String] {
        &self.live_options
    }

    /// Whether an exchange is currently in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Begins a (re)initialization: discards the transcript and
    /// suggestions and cancels any in-flight exchange. Always succeeds.
    pub fn begin_initialize(&mut self) -> GateTicket {
        let ticket = self.gate.begin_restart();
        self.transcript.clear();
        self.live_options.clear();
        ticket
    }

    /// Publishes the greeting turn for a begun initialization. Returns
    /// `false` when a later restart superseded it.
    pub fn complete_initialize(&mut self, ticket: GateTicket, clock: &dyn Clock) -> bool {
        if !self.gate.complete(ticket) {
            return false;
        }
        self.transcript
            .push(Turn::assistant(GREETING, false, clock.now()));
        true
    }

    /// Begins an exchange: appends the user turn, clears the live
    /// suggestions, and returns the prior history to send alongside the
    /// utterance.
    ///
    /// # Errors
    ///
    /// [`GuideError::TransitionPending`] while another exchange is in
    /// flight.
    pub fn begin_exchange(
        &mut self,
        text: &str,
        clock: &dyn Clock,
    ) -> Result<(GateTicket, Vec<Turn>), GuideError> {
        let ticket = self.gate.begin()?;
        let history = self.transcript.clone();
        self.transcript.push(Turn::user(text, clock.now()));
        self.live_options.clear();
        Ok((ticket, history))
    }

    /// Lands the collaborator's reply for a begun exchange. Returns
    /// `false` when the exchange was cancelled by a restart; the reply
    /// is discarded in that case.
    pub fn complete_exchange(
        &mut self,
        ticket: GateTicket,
        reply: AssistantReply,
        clock: &dyn Clock,
    ) -> bool {
        if !self.gate.complete(ticket) {
            return false;
        }
        self.transcript
            .push(Turn::assistant(reply.message, reply.danger, clock.now()));
        self.live_options = reply.options;
        true
    }

    /// Lands the apologetic turn for an exchange whose collaborator
    /// call failed. The user is left with no suggestions; restart
    /// remains available out-of-band.
    pub fn complete_failure(&mut self, ticket: GateTicket, clock: &dyn Clock) -> bool {
        if !self.gate.complete(ticket) {
            return false;
        }
        self.transcript
            .push(Turn::assistant(APOLOGY, false, clock.now()));
        self.live_options.clear();
        true
    }
}

/// Shared handle to an assisted session.
pub type SharedAssistedSession = Arc<Mutex<AssistedSession>>;

/// Handles (re)initialization: publishes the greeting after the typing
/// delay.
pub async fn handle_initialize(
    session: &SharedAssistedSession,
    clock: &dyn Clock,
    typing_delay: Duration,
) {
    let ticket = session.lock().await.begin_initialize();
    tokio::time::sleep(typing_delay).await;

    let mut guard = session.lock().await;
    if !guard.complete_initialize(ticket, clock) {
        tracing::debug!(session_id = %guard.id(), "initialization superseded by a later restart");
    }
}

/// Handles one exchange: sends the utterance with the prior history to
/// the collaborator and lands the shaped reply. A failed call is
/// recovered locally into the apologetic turn — it never surfaces as an
/// error.
///
/// # Errors
///
/// [`GuideError::TransitionPending`] while another exchange is in
/// flight.
pub async fn handle_exchange(
    session: &SharedAssistedSession,
    text: &str,
    collaborator: &dyn Collaborator,
    clock: &dyn Clock,
) -> Result<(), GuideError> {
    let (ticket, history) = {
        let mut guard = session.lock().await;
        guard.begin_exchange(text, clock)?
    };

    let outcome = collaborator.complete(&history, text).await;

    let mut guard = session.lock().await;
    let applied = match outcome {
        Ok(raw) => guard.complete_exchange(ticket, shape_reply(parse_completion(&raw)), clock),
        Err(error) => {
            tracing::warn!(
                session_id = %guard.id(),
                error = %error,
                "collaborator call failed; publishing fallback turn"
            );
            guard.complete_failure(ticket, clock)
        }
    };
    if !applied {
        tracing::debug!(session_id = %guard.id(), "exchange discarded after restart");
    }
    Ok(())
}
