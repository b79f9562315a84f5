//! Test collaborators — canned and failing implementations of the port.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use powerpath_core::collaborator::{Collaborator, CollaboratorError};
use powerpath_core::turn::Turn;

/// A collaborator that answers from a queue of canned completions and
/// records every request it receives. Once the queue runs dry it
/// answers `EmptyCompletion`.
#[derive(Debug, Default)]
pub struct ScriptedCollaborator {
    replies: Mutex<VecDeque<Result<String, CollaboratorError>>>,
    requests: Mutex<Vec<(usize, String)>>,
}

impl ScriptedCollaborator {
    /// Creates a collaborator answering the given results in order.
    #[must_use]
    pub fn new(replies: Vec<Result<String, CollaboratorError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a collaborator with a single successful completion.
    #[must_use]
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::new(vec![Ok(reply.into())])
    }

    /// Requests seen so far, as `(history_len, utterance)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<(usize, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Collaborator for ScriptedCollaborator {
    async fn complete(
        &self,
        history: &[Turn],
        utterance: &str,
    ) -> Result<String, CollaboratorError> {
        self.requests
            .lock()
            .unwrap()
            .push((history.len(), utterance.to_owned()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CollaboratorError::EmptyCompletion))
    }
}

/// A collaborator that always fails with `Unavailable`.
#[derive(Debug, Clone, Copy)]
pub struct FailingCollaborator;

#[async_trait]
impl Collaborator for FailingCollaborator {
    async fn complete(
        &self,
        _history: &[Turn],
        _utterance: &str,
    ) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Unavailable("connection refused".to_owned()))
    }
}
