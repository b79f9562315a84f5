//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::key::StepKey;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum GuideError {
    /// A transition target is missing from the step table. This is a
    /// construction-time defect; a validated graph never triggers it at
    /// runtime.
    #[error("broken graph: no step defined for key `{0}`")]
    BrokenGraph(StepKey),

    /// No session is registered under the given identifier.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A transition is already in flight for this session.
    #[error("a transition is already in flight for this session")]
    TransitionPending,

    /// A validation error on caller input.
    #[error("validation error: {0}")]
    Validation(String),
}
