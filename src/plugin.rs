//! Per-tag plugin: a three-state machine over two boundary matchers.

use crate::automaton::{MatchResult, Matcher};
use crate::pattern::Pattern;
use crate::PatternError;

/// Where a plugin stands relative to its tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluginState {
    /// Not inside or tentatively entering a tag.
    Idle,
    /// Some prefix of the opening boundary has matched.
    Trying,
    /// Opening boundary fully matched; scanning for the closing boundary.
    Processing,
}

/// Per-character verdict of a plugin, counted over the tail of the stream.
///
/// Both counts include the character just offered. `hold` characters are
/// deferred: the plugin does not yet know whether they are boundary material
/// or plain content. `retire` characters completed a boundary and must be
/// suppressed. `hold` equals the active matcher's partial-match length, so
/// it is bounded by the boundary occurrence, never by the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// Trailing characters still deferred.
    pub hold: usize,
    /// Trailing characters retired as boundary material.
    pub retire: usize,
}

/// Detects one category of tag in a character stream.
///
/// A plugin owns one open-boundary and one close-boundary matcher and is fed
/// every character of a single stream exactly once, in order. While
/// `Processing`, content characters are always forwarded; only the boundary
/// characters themselves are suppressed, and only when
/// `include_tags_in_output` is false. Every completed boundary match resets
/// both matchers.
///
/// Known limitations, by design: a plugin is not reentrant for nested
/// occurrences of its own tag (no depth counter; the first close boundary
/// ends the region), and two plugins with overlapping vocabularies are
/// unsupported (see [`Pipeline`](crate::Pipeline)).
pub struct TagPlugin {
    open: Matcher,
    close: Matcher,
    state: PluginState,
    include_tags: bool,
    hold: usize,
}

impl TagPlugin {
    /// Build a plugin from open and close boundary patterns.
    pub fn new(open: &Pattern, close: &Pattern, include_tags_in_output: bool) -> TagPlugin {
        TagPlugin {
            open: Matcher::new(open),
            close: Matcher::new(close),
            state: PluginState::Idle,
            include_tags: include_tags_in_output,
            hold: 0,
        }
    }

    /// Build a plugin whose boundaries are plain literals, the common
    /// `<plan>` / `</plan>` case.
    pub fn delimited(
        open: &str,
        close: &str,
        include_tags_in_output: bool,
    ) -> Result<TagPlugin, PatternError> {
        Ok(TagPlugin::new(
            &Pattern::literal(open)?,
            &Pattern::literal(close)?,
            include_tags_in_output,
        ))
    }

    /// Offer one character and report how the tail of the stream is judged.
    pub fn process_char(&mut self, ch: char) -> StepResult {
        let prev_hold = self.hold;
        let (hold, retire) = match self.state {
            PluginState::Idle | PluginState::Trying => match self.open.process_char(ch) {
                MatchResult::NoMatch => {
                    self.state = PluginState::Idle;
                    (0, 0)
                }
                MatchResult::InProgress => {
                    self.state = PluginState::Trying;
                    (self.boundary_hold(&self.open), 0)
                }
                MatchResult::Match => {
                    self.state = PluginState::Processing;
                    self.open.reset();
                    self.close.reset();
                    (0, self.boundary_retire(prev_hold))
                }
            },
            PluginState::Processing => match self.close.process_char(ch) {
                MatchResult::NoMatch => (0, 0),
                MatchResult::InProgress => (self.boundary_hold(&self.close), 0),
                MatchResult::Match => {
                    self.state = PluginState::Idle;
                    self.open.reset();
                    self.close.reset();
                    (0, self.boundary_retire(prev_hold))
                }
            },
        };
        self.hold = hold;
        StepResult { hold, retire }
    }

    fn boundary_hold(&self, matcher: &Matcher) -> usize {
        if self.include_tags {
            0
        } else {
            matcher.partial_len()
        }
    }

    fn boundary_retire(&self, prev_hold: usize) -> usize {
        if self.include_tags {
            0
        } else {
            prev_hold + 1
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PluginState {
        self.state
    }

    /// Whether boundary characters are forwarded to the output.
    pub fn include_tags_in_output(&self) -> bool {
        self.include_tags
    }

    /// Force back to `Idle` and clear both matchers. Any characters the
    /// caller was deferring on this plugin's behalf are plain content.
    pub fn reset(&mut self) {
        self.state = PluginState::Idle;
        self.open.reset();
        self.close.reset();
        self.hold = 0;
    }
}
