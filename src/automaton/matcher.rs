//! Streaming matcher: a cursor over a compiled automaton.

use std::sync::Arc;

use super::compiler::{Automaton, Unit};
use crate::pattern::Pattern;

/// Outcome of offering one character to a [`Matcher`].
///
/// Exactly one variant is produced per character; the three-way split is a
/// closed enum so callers must handle all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// The pattern completed on this character.
    Match,
    /// The character extended or maintained a partial match.
    InProgress,
    /// The character could not extend any partial match; the matcher fell
    /// back to its start state, possibly after walking the failure chain.
    NoMatch,
}

/// A matching session over a compiled pattern.
///
/// Feed characters one at a time with [`process_char`]; total work over an
/// input of length N is O(N) regardless of pattern shape, and the matcher's
/// memory is O(pattern length), never O(input length).
///
/// `Match` does not implicitly reset the session. A caller that wants
/// non-overlapping occurrences calls [`reset`] after each match; without a
/// reset the next character continues through the terminal failure link,
/// which is standard overlapped-matching behavior.
///
/// [`process_char`]: Matcher::process_char
/// [`reset`]: Matcher::reset
pub struct Matcher {
    automaton: Arc<Automaton>,
    state: usize,
    partial: usize,
}

impl Matcher {
    /// Compile `pattern` and start a session at the start state.
    pub fn new(pattern: &Pattern) -> Matcher {
        Matcher::with_automaton(Arc::new(Automaton::compile(pattern)))
    }

    /// Start a session over an already-compiled automaton. Sessions sharing
    /// an automaton share no mutable state.
    pub fn with_automaton(automaton: Arc<Automaton>) -> Matcher {
        Matcher {
            automaton,
            state: 0,
            partial: 0,
        }
    }

    /// Offer one character; constant amortized work.
    pub fn process_char(&mut self, ch: char) -> MatchResult {
        let units = self.automaton.units();
        let m = units.len();
        let mut s = self.state;
        let mut fell_back = false;

        if s == m {
            // Continuing past a completed match: take the terminal failure
            // link rather than rescanning.
            s = self.automaton.fail(s);
            fell_back = true;
        }

        let consumed = loop {
            match units[s] {
                Unit::Span => {
                    // A span state always consumes: either the anchor's
                    // first unit accepts and control passes to the anchor,
                    // or the character is absorbed into the span.
                    if units[s + 1].accepts(ch) {
                        s += 2;
                    }
                    break true;
                }
                unit => {
                    if unit.accepts(ch) {
                        s += 1;
                        break true;
                    }
                    if s == 0 {
                        break false;
                    }
                    s = self.automaton.fail(s);
                    fell_back = true;
                }
            }
        };

        if !consumed {
            self.state = 0;
            self.partial = 0;
            return MatchResult::NoMatch;
        }

        // Characters that fell out of the partial match on fallback are
        // accounted for by the landing state's exact depth; past a span the
        // span absorbs them and the partial keeps growing.
        self.partial = if fell_back {
            self.automaton.char_depth(s).unwrap_or(self.partial + 1)
        } else {
            self.partial + 1
        };
        self.state = s;

        if s == m {
            MatchResult::Match
        } else {
            MatchResult::InProgress
        }
    }

    /// Force the session back to the start state.
    pub fn reset(&mut self) {
        self.state = 0;
        self.partial = 0;
    }

    /// How many of the most recently consumed characters form the current
    /// partial match. Zero at the start state.
    pub fn partial_len(&self) -> usize {
        self.partial
    }

    /// The compiled automaton this session walks.
    pub fn automaton(&self) -> &Arc<Automaton> {
        &self.automaton
    }
}
