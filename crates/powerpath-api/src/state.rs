//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use powerpath_core::clock::Clock;
use powerpath_core::collaborator::Collaborator;
use powerpath_dialog::domain::graph::DialogGraph;

use crate::registry::SessionRegistry;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The validated troubleshooting graph.
    pub graph: Arc<DialogGraph>,
    /// In-memory session registry.
    pub sessions: SessionRegistry,
    /// Clock port for turn timestamps.
    pub clock: Arc<dyn Clock>,
    /// Remote collaborator; `None` disables assisted sessions.
    pub collaborator: Option<Arc<dyn Collaborator>>,
    /// Simulated typing delay before an assistant turn lands.
    pub typing_delay: Duration,
}

impl AppState {
    /// Creates application state with an empty session registry.
    #[must_use]
    pub fn new(
        graph: Arc<DialogGraph>,
        clock: Arc<dyn Clock>,
        collaborator: Option<Arc<dyn Collaborator>>,
        typing_delay: Duration,
    ) -> Self {
        Self {
            graph,
            sessions: SessionRegistry::new(),
            clock,
            collaborator,
            typing_delay,
        }
    }
}
