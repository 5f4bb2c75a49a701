//! Generalized-KMP automaton for streaming boundary detection.
//!
//! This module turns a validated [`Pattern`](crate::Pattern) into a
//! deterministic, failure-linked state machine and exposes a per-session
//! cursor over it. The key components are:
//!
//! - `Automaton`: the immutable compiled state graph (flat unit and
//!   failure-link tables)
//! - `Matcher`: a matching session; one character in, one `MatchResult` out
//! - `MatchResult`: the closed match / in-progress / no-match outcome
//!
//! # Module Organization
//!
//! - `compiler`: element flattening and failure-link construction
//! - `matcher`: the streaming cursor

mod compiler;
mod matcher;

pub use compiler::Automaton;
pub use matcher::{MatchResult, Matcher};

#[cfg(test)]
mod tests;
