//! Guided sessions — stateful traversal of a dialog graph.

use std::sync::Arc;

use uuid::Uuid;

use powerpath_core::clock::Clock;
use powerpath_core::error::GuideError;
use powerpath_core::gate::{GateTicket, TransitionGate};
use powerpath_core::key::StepKey;
use powerpath_core::turn::Turn;

use super::graph::{Choice, DialogGraph, Transition};

/// A begun transition, to be applied once the presentation delay has
/// elapsed.
#[derive(Debug)]
pub struct PendingTransition {
    ticket: GateTicket,
    target: StepKey,
}

/// A single user's guided walk through the dialog graph.
///
/// Transitions are two-phase. The `begin_*` phase runs synchronously:
/// it appends the user turn, clears the live choices, and reserves the
/// single-flight gate. After the caller's suspension point (the typing
/// delay), [`GuidedSession::complete`] appends the assistant turn and
/// republishes the choices. A restart issued between the two phases
/// invalidates the pending transition; its completion is then discarded
/// rather than applied.
#[derive(Debug)]
pub struct GuidedSession {
    id: Uuid,
    graph: Arc<DialogGraph>,
    current: StepKey,
    transcript: Vec<Turn>,
    live_choices: Vec<Choice>,
    gate: TransitionGate,
}

impl GuidedSession {
    /// Creates a session positioned at the graph's entry, with an empty
    /// transcript. No turn is visible until the first initialization
    /// completes.
    #[must_use]
    pub fn new(id: Uuid, graph: Arc<DialogGraph>) -> Self {
        let current = graph.entry_key().clone();
        Self {
            id,
            graph,
            current,
            transcript: Vec::new(),
            live_choices: Vec::new(),
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

    /// The ordered choices valid for selection right now. Empty while a
    /// transition is in flight and on terminal steps; restart stays
    /// available out-of-band either way.
    #[must_use]
    pub fn current_choices(&self) -> &[Choice] {
        &self.live_choices
    }

    /// The key of the step the session currently sits on.
    #[must_use]
    pub fn current_key(&self) -> &StepKey {
        &self.current
    }

    /// Whether a transition is currently in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Begins a (re)initialization: discards the transcript and live
    /// choices, returns to the entry step, and cancels any in-flight
    /// transition. Always succeeds.
    pub fn begin_initialize(&mut self) -> PendingTransition {
        let ticket = self.gate.begin_restart();
        self.transcript.clear();
        self.live_choices.clear();
        self.current = self.graph.entry_key().clone();
        PendingTransition {
            ticket,
            target: self.current.clone(),
        }
    }

    /// Begins a selection from the live choice set. A choice targeting
    /// the entry key restarts instead, exactly as
    /// [`GuidedSession::begin_initialize`].
    ///
    /// # Errors
    ///
    /// [`GuideError::TransitionPending`] while another transition is in
    /// flight; [`GuideError::BrokenGraph`] when the target is undefined
    /// (never for a validated graph).
    pub fn begin_select(
        &mut self,
        choice: &Choice,
        clock: &dyn Clock,
    ) -> Result<PendingTransition, GuideError> {
        if matches!(self.graph.resolve(choice)?, Transition::Restart) {
            return Ok(self.begin_initialize());
        }
        let ticket = self.gate.begin()?;
        self.transcript
            .push(Turn::user(choice.label.clone(), clock.now()));
        self.live_choices.clear();
        self.current = choice.next_step.clone();
        Ok(PendingTransition {
            ticket,
            target: choice.next_step.clone(),
        })
    }

    /// Applies the assistant turn for a begun transition.
    ///
    /// Returns `false` when the transition was cancelled by a restart
    /// issued in the meantime; the session is left untouched in that
    /// case.
    ///
    /// # Errors
    ///
    /// [`GuideError::BrokenGraph`] when the target step is undefined —
    /// unreachable for a validated graph.
    pub fn complete(
        &mut self,
        pending: PendingTransition,
        clock: &dyn Clock,
    ) -> Result<bool, GuideError> {
        if !self.gate.complete(pending.ticket) {
            return Ok(false);
        }
        let graph = Arc::clone(&self.graph);
        let step = graph
            .step(&pending.target)
            .ok_or_else(|| GuideError::BrokenGraph(pending.target.clone()))?;
        self.transcript
            .push(Turn::assistant(step.message.clone(), step.danger, clock.now()));
        self.live_choices = step.choices.clone();
        Ok(true)
    }
}
