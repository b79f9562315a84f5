//! The dialog graph — steps, choices, and construction-time validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use powerpath_core::error::GuideError;
use powerpath_core::key::StepKey;

/// A user-selectable reply paired with the key of the step it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the user.
    pub label: String,
    /// Key of the step this choice transitions to.
    pub next_step: StepKey,
}

/// One node of the dialog graph: a message plus its follow-up choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Rendered message text (inline markup subset).
    pub message: String,
    /// Marks a safety-critical step. Danger steps may only offer the
    /// restart choice.
    #[serde(default)]
    pub danger: bool,
    /// Ordered follow-up choices; empty marks a terminal step.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// Defects rejected when a graph is built.
#[derive(Debug, Error)]
pub enum GraphDefect {
    /// The designated entry key has no step definition.
    #[error("entry step `{0}` is not defined")]
    MissingEntry(StepKey),

    /// A choice references a step that does not exist.
    #[error("step `{from}` choice `{label}` targets undefined step `{target}`")]
    DanglingTransition {
        /// The step holding the offending choice.
        from: StepKey,
        /// The offending choice's label.
        label: String,
        /// The undefined target key.
        target: StepKey,
    },

    /// A danger step offers anything other than the single restart choice.
    #[error("danger step `{0}` must offer exactly one choice, targeting the entry step")]
    DangerStepBranches(StepKey),
}

/// Where a resolved choice leads.
#[derive(Debug, Clone, Copy)]
pub enum Transition<'a> {
    /// The restart sentinel: back to the entry step, transcript discarded.
    Restart,
    /// Advance to the referenced step.
    Advance(&'a Step),
}

/// An immutable mapping from step key to step, fixed at startup.
///
/// Construction validates the whole table: the entry key must be
/// defined, every transition target must resolve (the entry key doubles
/// as the restart sentinel), and danger steps must offer exactly the
/// restart choice so a safety warning is never bypassed by unrelated
/// branching.
#[derive(Debug, Clone)]
pub struct DialogGraph {
    entry: StepKey,
    steps: BTreeMap<StepKey, Step>,
}

impl DialogGraph {
    /// Builds a validated graph.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphDefect`] found in the step table.
    pub fn new(entry: StepKey, steps: BTreeMap<StepKey, Step>) -> Result<Self, GraphDefect> {
        if !steps.contains_key(&entry) {
            return Err(GraphDefect::MissingEntry(entry));
        }
        for (key, step) in &steps {
            for choice in &step.choices {
                let resolves =
                    choice.next_step == entry || steps.contains_key(&choice.next_step);
                if !resolves {
                    return Err(GraphDefect::DanglingTransition {
                        from: key.clone(),
                        label: choice.label.clone(),
                        target: choice.next_step.clone(),
                    });
                }
            }
            if step.danger {
                let only_restart =
                    step.choices.len() == 1 && step.choices[0].next_step == entry;
                if !only_restart {
                    return Err(GraphDefect::DangerStepBranches(key.clone()));
                }
            }
        }
        Ok(Self { entry, steps })
    }

    /// The designated entry key, which is also the restart sentinel.
    #[must_use]
    pub fn entry_key(&self) -> &StepKey {
        &self.entry
    }

    /// The designated entry step.
    #[must_use]
    pub fn entry_step(&self) -> &Step {
        self.steps
            .get(&self.entry)
            .expect("entry presence is validated at construction")
    }

    /// Looks up a step by key.
    #[must_use]
    pub fn step(&self, key: &StepKey) -> Option<&Step> {
        self.steps.get(key)
    }

    /// Iterates over all steps in key order.
    pub fn steps(&self) -> impl Iterator<Item = (&StepKey, &Step)> {
        self.steps.iter()
    }

    /// Resolves a choice to its transition.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::BrokenGraph`] when the target is missing —
    /// a construction-time defect that a validated graph never hits.
    pub fn resolve(&self, choice: &Choice) -> Result<Transition<'_>, GuideError> {
        if choice.next_step == self.entry {
            return Ok(Transition::Restart);
        }
        self.step(&choice.next_step)
            .map(Transition::Advance)
            .ok_or_else(|| GuideError::BrokenGraph(choice.next_step.clone()))
    }
}
