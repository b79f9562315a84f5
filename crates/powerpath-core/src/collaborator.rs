//! Collaborator port — the remote conversational model boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::turn::Turn;

/// Errors from the remote collaborator call.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The call failed or timed out.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with no usable text.
    #[error("collaborator returned an empty completion")]
    EmptyCompletion,
}

/// Port to the external conversational model.
///
/// The request is the prior turn history plus the new user utterance;
/// the response is the raw completion text. Shaping the completion into
/// an assistant turn (structured decode, fallback, danger flagging) is
/// the engine's job, not the transport's.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Produces one completion for the given history and utterance.
    ///
    /// # Errors
    ///
    /// Returns [`CollaboratorError`] when the remote call fails, times
    /// out, or yields no text.
    async fn complete(&self, history: &[Turn], utterance: &str)
    -> Result<String, CollaboratorError>;
}
