//! In-memory session registry.
//!
//! Sessions are transcript-in-memory only; nothing survives a process
//! restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use powerpath_assist::session::AssistedSession;
use powerpath_core::error::GuideError;
use powerpath_dialog::domain::session::GuidedSession;

/// A registered session, by mode.
#[derive(Clone)]
pub enum SessionHandle {
    /// A decision-graph session.
    Guided(Arc<Mutex<GuidedSession>>),
    /// A free-text session backed by the collaborator.
    Assisted(Arc<Mutex<AssistedSession>>),
}

/// Registry of live sessions keyed by session ID.
///
/// TODO: evict idle sessions once a TTL policy is decided.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session handle.
    pub async fn insert(&self, id: Uuid, handle: SessionHandle) {
        self.inner.write().await.insert(id, handle);
    }

    /// Looks up a session handle.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::SessionNotFound`] when the ID is unknown.
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, GuideError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(GuideError::SessionNotFound(id))
    }
}
