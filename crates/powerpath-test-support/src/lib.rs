//! Shared test fakes for the Powerpath guide engine.

mod clock;
mod collaborator;

pub use clock::FixedClock;
pub use collaborator::{FailingCollaborator, ScriptedCollaborator};
