//! Markdown rendering for guide messages.
//!
//! Messages are authored in Markdown; the renderer contract is a small
//! inline HTML subset (emphasis, line breaks, hyperlinks), so rendering
//! happens once at graph compilation time.

use pulldown_cmark::{Options, Parser, html};

/// Renders a Markdown message to its HTML fragment.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::empty());
    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);
    rendered.trim_end().to_owned()
}
