//! Collaborator reply parsing — structured decode with graceful
//! degradation.
//!
//! The briefing mandates a JSON object, but a conversational model can
//! always answer with plain prose instead. Decoding therefore yields a
//! two-variant result rather than an error: the structured payload when
//! it parses, the raw text as a fallback message when it does not. A
//! malformed completion never surfaces to the user as a technical
//! failure.

use serde::Deserialize;

use crate::briefing::SAFETY_MARKER;

/// The structured payload the briefing mandates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StructuredReply {
    /// Message to show the user.
    pub message: String,
    /// Short suggested replies; empty when free text is expected.
    #[serde(default)]
    pub options: Vec<String>,
    /// Marks a safety-critical reply.
    #[serde(default)]
    pub danger: bool,
}

/// Outcome of decoding a raw completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// The completion matched the mandated shape.
    Structured(StructuredReply),
    /// The completion was not parseable; the raw text stands in as the
    /// message, with no options.
    RawFallback(String),
}

/// An assistant turn ready for the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    /// Message to show the user.
    pub message: String,
    /// Suggested replies the user may tap instead of typing.
    pub options: Vec<String>,
    /// Marks a safety-critical turn.
    pub danger: bool,
}

/// Decodes a completion, tolerating Markdown code fences around the
/// JSON object.
#[must_use]
pub fn parse_completion(raw: &str) -> ParsedReply {
    let candidate = strip_code_fence(raw.trim());
    match serde_json::from_str::<StructuredReply>(candidate) {
        Ok(reply) => ParsedReply::Structured(reply),
        Err(_) => ParsedReply::RawFallback(raw.trim().to_owned()),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    match body.trim().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => text,
    }
}

/// Shapes a parsed completion into an assistant turn, applying the
/// danger contract: the structured flag is authoritative, and the
/// safety-marker scan backstops completions that carry no structure.
/// Danger turns never publish options, so a safety warning cannot be
/// branched away from; the restart affordance is the renderer's
/// standing obligation.
#[must_use]
pub fn shape_reply(parsed: ParsedReply) -> AssistantReply {
    let (message, options, structured_danger) = match parsed {
        ParsedReply::Structured(reply) => (reply.message, reply.options, reply.danger),
        ParsedReply::RawFallback(text) => (text, Vec::new(), false),
    };
    let danger = structured_danger || message.contains(SAFETY_MARKER);
    let options = if danger { Vec::new() } else { options };
    AssistantReply {
        message,
        options,
        danger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_completion_parses() {
        let raw = r#"{"message": "Is the beep continuous?", "options": ["Continuous", "With pauses"], "danger": false}"#;

        let parsed = parse_completion(raw);

        assert_eq!(
            parsed,
            ParsedReply::Structured(StructuredReply {
                message: "Is the beep continuous?".to_owned(),
                options: vec!["Continuous".to_owned(), "With pauses".to_owned()],
                danger: false,
            })
        );
    }

    #[test]
    fn test_missing_options_and_danger_default() {
        let raw = r#"{"message": "Tell me more."}"#;

        let ParsedReply::Structured(reply) = parse_completion(raw) else {
            panic!("expected structured reply");
        };

        assert!(reply.options.is_empty());
        assert!(!reply.danger);
    }

    #[test]
    fn test_plain_text_falls_back_without_error() {
        let parsed = parse_completion("ok, thanks!");

        assert_eq!(parsed, ParsedReply::RawFallback("ok, thanks!".to_owned()));

        let reply = shape_reply(parsed);
        assert_eq!(reply.message, "ok, thanks!");
        assert!(reply.options.is_empty());
        assert!(!reply.danger);
    }

    #[test]
    fn test_code_fenced_json_is_unwrapped() {
        let raw = "```json\n{\"message\": \"Checked the outlet?\", \"options\": [\"Yes\", \"No\"]}\n```";

        let ParsedReply::Structured(reply) = parse_completion(raw) else {
            panic!("expected structured reply");
        };

        assert_eq!(reply.message, "Checked the outlet?");
        assert_eq!(reply.options.len(), 2);
    }

    #[test]
    fn test_unterminated_fence_falls_back_to_raw_text() {
        let raw = "```json\n{\"message\": \"half a reply\"";

        assert!(matches!(parse_completion(raw), ParsedReply::RawFallback(_)));
    }

    #[test]
    fn test_structured_danger_flag_suppresses_options() {
        let raw = r#"{"message": "WARNING: SAFETY COMES FIRST! Step away now.", "options": ["Keep diagnosing"], "danger": true}"#;

        let reply = shape_reply(parse_completion(raw));

        assert!(reply.danger);
        assert!(reply.options.is_empty());
    }

    #[test]
    fn test_marker_phrase_flags_unstructured_danger() {
        let reply = shape_reply(parse_completion(
            "WARNING: SAFETY COMES FIRST! Unplug at the breaker and call us.",
        ));

        assert!(reply.danger);
        assert!(reply.options.is_empty());
    }

    #[test]
    fn test_marker_phrase_overrides_structured_danger_false() {
        let raw = r#"{"message": "WARNING: SAFETY COMES FIRST! Move away.", "options": ["Next"], "danger": false}"#;

        let reply = shape_reply(parse_completion(raw));

        assert!(reply.danger);
        assert!(reply.options.is_empty());
    }
}
