//! Pattern grammar and fluent builder.
//!
//! A pattern is an ordered sequence of elements describing one tag boundary:
//! - `Literal`: an exact character sequence
//! - `CharEq` / `CharNotEq`: a single-character positive/negative match
//! - `GreedySpan`: consume any run of characters that does not yet satisfy
//!   the inner pattern, then continue once the inner pattern begins matching
//!
//! Patterns are immutable once built. Validation happens at build time, never
//! at match time: an empty pattern, an empty literal, or a `GreedySpan` with
//! no anchoring inner pattern is rejected with a `PatternError`. A span whose
//! inner pattern itself starts with a span has no first acceptable character
//! to escape on and is rejected for the same reason.

use crate::PatternError;

/// One element of a pattern, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// An exact character sequence.
    Literal(String),
    /// A single character equal to the given one.
    CharEq(char),
    /// A single character different from the given one.
    CharNotEq(char),
    /// Zero or more characters that do not yet satisfy the inner pattern,
    /// followed by the inner pattern itself.
    GreedySpan(Pattern),
}

/// An immutable, validated sequence of pattern elements.
///
/// Built through [`Pattern::builder`] or [`Pattern::from_elements`]; every
/// constructed `Pattern` compiles to a finite automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    elements: Vec<Element>,
}

impl Pattern {
    /// Start building a pattern.
    pub fn builder() -> PatternBuilder {
        PatternBuilder::new()
    }

    /// Build a single-literal pattern, the common case for tag boundaries
    /// like `<plan>`.
    pub fn literal(text: &str) -> Result<Pattern, PatternError> {
        Pattern::builder().literal(text).build()
    }

    /// Build a pattern from a pre-assembled element list.
    pub fn from_elements(elements: Vec<Element>) -> Result<Pattern, PatternError> {
        validate(&elements)?;
        Ok(Pattern { elements })
    }

    /// The elements of this pattern, in declaration order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

fn validate(elements: &[Element]) -> Result<(), PatternError> {
    if elements.is_empty() {
        return Err(PatternError::EmptyPattern);
    }
    for element in elements {
        match element {
            Element::Literal(text) if text.is_empty() => {
                return Err(PatternError::EmptyLiteral);
            }
            Element::GreedySpan(inner) => {
                // The inner pattern is validated on its own construction;
                // what it cannot guarantee is a usable escape character for
                // the enclosing span.
                if matches!(inner.elements().first(), Some(Element::GreedySpan(_))) {
                    return Err(PatternError::UnanchoredSpan);
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Fluent builder for [`Pattern`].
///
/// Errors are recorded as they occur; [`build`] reports the first one.
///
/// [`build`]: PatternBuilder::build
///
/// ```
/// # use tagsieve::Pattern;
/// let comment_close = Pattern::builder()
///     .literal("<!--")
///     .greedy_star(|p| p.literal("-->"))
///     .build()
///     .unwrap();
/// ```
pub struct PatternBuilder {
    elements: Vec<Element>,
    err: Option<PatternError>,
}

impl PatternBuilder {
    fn new() -> Self {
        Self {
            elements: Vec::new(),
            err: None,
        }
    }

    /// Append an exact character sequence.
    pub fn literal(mut self, text: &str) -> Self {
        if text.is_empty() {
            self.err.get_or_insert(PatternError::EmptyLiteral);
            return self;
        }
        self.elements.push(Element::Literal(text.to_string()));
        self
    }

    /// Append a single-character positive match.
    pub fn ch(mut self, c: char) -> Self {
        self.elements.push(Element::CharEq(c));
        self
    }

    /// Append a single-character negative match.
    pub fn not_ch(mut self, c: char) -> Self {
        self.elements.push(Element::CharNotEq(c));
        self
    }

    /// Append a greedy span: skip characters until the pattern built by
    /// `inner` begins matching, then match it. The inner pattern is the
    /// span's anchor and must be non-empty.
    pub fn greedy_star(mut self, inner: impl FnOnce(PatternBuilder) -> PatternBuilder) -> Self {
        match inner(PatternBuilder::new()).build() {
            Ok(pattern) => self.elements.push(Element::GreedySpan(pattern)),
            Err(PatternError::EmptyPattern) => {
                self.err.get_or_insert(PatternError::UnanchoredSpan);
            }
            Err(e) => {
                self.err.get_or_insert(e);
            }
        }
        self
    }

    /// Validate and freeze the pattern.
    pub fn build(self) -> Result<Pattern, PatternError> {
        if let Some(err) = self.err {
            return Err(err);
        }
        Pattern::from_elements(self.elements)
    }
}
