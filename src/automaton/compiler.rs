//! Pattern compilation: elements to a failure-linked state graph.
//!
//! A pattern's elements are flattened into per-character match units; each
//! unit boundary is a state, so state `s` means "the first `s` units have
//! matched". The graph is stored as two flat tables (units and failure
//! links) indexed by state, the same flat-arena layout used for trie
//! construction elsewhere in this codebase family.
//!
//! A `GreedySpan` flattens to a single [`Unit::Span`] marker followed by its
//! inner pattern's units. At match time the span state self-loops, consuming
//! characters until the first unit of its anchor accepts; it is a streaming
//! "skip-until", never a backtracking quantifier.
//!
//! Failure links are computed segment by segment, where a segment is a
//! maximal run of single-character units bounded by span states. Inside a
//! segment the links follow the classic KMP prefix function over unit
//! equality; a link that would leave the segment bottoms out at the
//! segment's base - the start state, or the preceding span state, which
//! absorbs any run of characters and therefore never needs a failure link
//! of its own. Links never cross back over a span.

use smallvec::{smallvec, SmallVec};

use crate::pattern::{Element, Pattern};

/// A single-character match unit produced by flattening pattern elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Unit {
    /// Matches exactly this character.
    Eq(char),
    /// Matches any character except this one.
    NotEq(char),
    /// Greedy skip marker; anchored by the unit that follows it.
    Span,
}

impl Unit {
    /// Whether this unit accepts the character. Span states are handled
    /// before `accepts` is consulted.
    #[inline]
    pub(crate) fn accepts(self, ch: char) -> bool {
        match self {
            Unit::Eq(c) => ch == c,
            Unit::NotEq(c) => ch != c,
            Unit::Span => false,
        }
    }
}

/// An immutable compiled pattern: the state graph a [`Matcher`] walks.
///
/// Compilation is infallible because every [`Pattern`] is validated at
/// construction time. Two matchers built from the same automaton share no
/// mutable state; the automaton is typically wrapped in an `Arc`.
///
/// [`Matcher`]: super::Matcher
pub struct Automaton {
    /// Flattened match units; `units[s]` is the unit that advances state `s`.
    units: SmallVec<[Unit; 16]>,
    /// `fail[s]` is the state to fall back to when state `s` cannot advance.
    /// Indexed `0..=unit_count()`; the entry for the terminal state enables
    /// overlapped matching when a caller keeps feeding characters without
    /// resetting.
    fail: SmallVec<[u32; 16]>,
    /// Unit index of the first span, if any. States before it correspond to
    /// an exact number of consumed characters; states at or after it do not,
    /// because the span absorbs an unbounded run.
    first_span: Option<u32>,
}

impl Automaton {
    /// Compile a validated pattern into its state graph.
    pub fn compile(pattern: &Pattern) -> Automaton {
        let mut units: SmallVec<[Unit; 16]> = SmallVec::new();
        flatten(pattern, &mut units);
        debug_assert!(!units.is_empty());

        let m = units.len();
        let mut fail: SmallVec<[u32; 16]> = smallvec![0; m + 1];
        let mut first_span: Option<u32> = None;

        // seg_start: unit index where the current segment's run begins.
        // base_state: fallback target when the local prefix function is 0.
        // pi[l]: prefix function over the segment's first l units.
        let mut seg_start = 0usize;
        let mut base_state = 0usize;
        let mut pi: Vec<usize> = vec![0];

        for i in 0..m {
            if let Unit::Span = units[i] {
                debug_assert!(
                    i + 1 < m && !matches!(units[i + 1], Unit::Span),
                    "validation guarantees every span is anchored"
                );
                if first_span.is_none() {
                    first_span = Some(i as u32);
                }
                base_state = i;
                seg_start = i + 1;
                pi.clear();
                pi.push(0);
                continue;
            }

            let l = i + 1 - seg_start;
            let k = if l == 1 {
                0
            } else {
                let mut k = pi[l - 1];
                while k > 0 && units[seg_start + l - 1] != units[seg_start + k] {
                    k = pi[k];
                }
                if units[seg_start + l - 1] == units[seg_start + k] {
                    k += 1;
                }
                k
            };
            pi.push(k);
            fail[i + 1] = if k == 0 {
                base_state as u32
            } else {
                (seg_start + k) as u32
            };
        }

        Automaton {
            units,
            fail,
            first_span,
        }
    }

    /// Number of single-character match units; the terminal state index.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub(crate) fn units(&self) -> &[Unit] {
        &self.units
    }

    #[inline]
    pub(crate) fn fail(&self, state: usize) -> usize {
        self.fail[state] as usize
    }

    /// Exact number of characters consumed to stand at `state`, when that
    /// number is knowable. `None` for states at or past the first span.
    #[inline]
    pub(crate) fn char_depth(&self, state: usize) -> Option<usize> {
        match self.first_span {
            Some(f) if state >= f as usize => None,
            _ => Some(state),
        }
    }
}

fn flatten(pattern: &Pattern, units: &mut SmallVec<[Unit; 16]>) {
    for element in pattern.elements() {
        match element {
            Element::Literal(text) => units.extend(text.chars().map(Unit::Eq)),
            Element::CharEq(c) => units.push(Unit::Eq(*c)),
            Element::CharNotEq(c) => units.push(Unit::NotEq(*c)),
            Element::GreedySpan(inner) => {
                units.push(Unit::Span);
                flatten(inner, units);
            }
        }
    }
}
