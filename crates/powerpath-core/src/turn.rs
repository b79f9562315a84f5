//! Transcript turns — the ordered history of a conversation session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The end user.
    User,
    /// The guide or the remote collaborator.
    Assistant,
}

/// One entry in a session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn.
    pub role: Role,
    /// Rendered message text. Assistant turns may carry the inline
    /// markup subset (emphasis, line breaks, hyperlinks).
    pub message: String,
    /// Marks a safety-critical assistant turn.
    pub danger: bool,
    /// Timestamp of turn creation.
    pub occurred_at: DateTime<Utc>,
}

impl Turn {
    /// Creates a user turn. User turns are never danger-flagged.
    #[must_use]
    pub fn user(message: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
            danger: false,
            occurred_at,
        }
    }

    /// Creates an assistant turn.
    #[must_use]
    pub fn assistant(message: impl Into<String>, danger: bool, occurred_at: DateTime<Utc>) -> Self {
        Self {
            role: Role::Assistant,
            message: message.into(),
            danger,
            occurred_at,
        }
    }
}
