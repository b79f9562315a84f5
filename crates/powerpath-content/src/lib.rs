//! Powerpath — built-in troubleshooting guide content.
//!
//! Step definitions are authored in YAML with Markdown messages and
//! compiled at startup into a validated dialog graph.

mod loader;
mod markup;

pub use loader::{ContentError, builtin_guide, compile};
pub use markup::render_markdown;
