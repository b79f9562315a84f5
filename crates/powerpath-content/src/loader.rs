//! Guide compilation — YAML ingestion into a validated dialog graph.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use powerpath_core::key::StepKey;
use powerpath_dialog::domain::graph::{Choice, DialogGraph, GraphDefect, Step};

use crate::markup::render_markdown;

/// Embedded troubleshooting guide definition.
const GUIDE_YAML: &str = include_str!("guide.yaml");

/// Errors raised while compiling guide content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The definition failed to parse as YAML.
    #[error("guide definition is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The parsed steps violate a graph invariant.
    #[error("guide definition is not a valid graph: {0}")]
    Graph(#[from] GraphDefect),
}

/// As-authored guide definition.
#[derive(Debug, Deserialize)]
struct GuideDef {
    entry: String,
    steps: BTreeMap<String, StepDef>,
}

/// As-authored step definition.
#[derive(Debug, Deserialize)]
struct StepDef {
    message: String,
    #[serde(default)]
    danger: bool,
    #[serde(default)]
    choices: Vec<ChoiceDef>,
}

/// As-authored choice definition.
#[derive(Debug, Deserialize)]
struct ChoiceDef {
    label: String,
    next_step: String,
}

/// Compiles a YAML guide definition into a validated graph, rendering
/// each message from Markdown to the inline markup subset.
///
/// # Errors
///
/// Returns [`ContentError`] when the YAML does not parse or the step
/// table violates a graph invariant.
pub fn compile(yaml: &str) -> Result<DialogGraph, ContentError> {
    let def: GuideDef = serde_yaml::from_str(yaml)?;
    let steps: BTreeMap<StepKey, Step> = def
        .steps
        .into_iter()
        .map(|(key, step)| {
            (
                StepKey::new(key),
                Step {
                    message: render_markdown(&step.message),
                    danger: step.danger,
                    choices: step
                        .choices
                        .into_iter()
                        .map(|choice| Choice {
                            label: choice.label,
                            next_step: StepKey::new(choice.next_step),
                        })
                        .collect(),
                },
            )
        })
        .collect();
    Ok(DialogGraph::new(StepKey::new(def.entry), steps)?)
}

/// Compiles the built-in UPS troubleshooting guide.
///
/// # Errors
///
/// Never fails for the shipped definition; the error channel exists so
/// startup fails fast if the embedded content regresses.
pub fn builtin_guide() -> Result<DialogGraph, ContentError> {
    compile(GUIDE_YAML)
}
