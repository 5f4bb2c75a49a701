//! tagsieve: streaming detection and elision of delimited tag regions in model output

mod automaton;
mod pattern;
mod pipeline;
mod plugin;

pub use automaton::{Automaton, MatchResult, Matcher};
pub use pattern::{Element, Pattern, PatternBuilder};
pub use pipeline::{Filtered, Pipeline};
pub use plugin::{PluginState, StepResult, TagPlugin};

use std::fmt;

/// Errors that can occur while building a pattern.
///
/// These are the engine's only failure class: a pattern that would never
/// terminate or never match anything is rejected when it is built, never at
/// match time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// A pattern must contain at least one element.
    EmptyPattern,
    /// A literal element must contain at least one character.
    EmptyLiteral,
    /// A greedy span has no anchoring element to escape on.
    UnanchoredSpan,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyPattern => write!(f, "empty pattern"),
            PatternError::EmptyLiteral => write!(f, "empty literal in pattern"),
            PatternError::UnanchoredSpan => {
                write!(f, "greedy span is not anchored by a following element")
            }
        }
    }
}

impl std::error::Error for PatternError {}
