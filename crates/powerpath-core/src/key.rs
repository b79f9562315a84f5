//! Step keys — identifiers for nodes of a dialog graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one step of a dialog graph.
///
/// Keys are opaque strings fixed by the guide author (`start`,
/// `beep_type`, ...). The graph's entry key doubles as the restart
/// sentinel: a choice targeting it restarts the session from anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepKey(String);

impl StepKey {
    /// Creates a step key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}
