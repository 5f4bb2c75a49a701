//! Composition of plugins over one character stream.

use std::collections::VecDeque;

use crate::plugin::TagPlugin;

/// A character waiting for every plugin's verdict.
struct Pending {
    ch: char,
    dropped: bool,
}

/// Applies one or more plugins to a single raw character stream, producing
/// one filtered stream.
///
/// Every plugin sees every raw input character, never another plugin's
/// output; plugins are assumed to guard disjoint tag vocabularies, and
/// interleaved or nested tags across plugins are unsupported by design. A
/// character reaches the output only once no plugin is still deferring it,
/// and not at all if any plugin retired it as boundary material.
///
/// Because each plugin's deferred characters are a suffix of the stream,
/// the pipeline needs only one pending queue, bounded by the largest
/// in-flight boundary, and per-plugin hold counts. Output order is always a
/// filtered subsequence of input order.
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<TagPlugin>,
    pending: VecDeque<Pending>,
}

impl Pipeline {
    pub fn new() -> Pipeline {
        Pipeline {
            plugins: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Register a plugin. All registered plugins vote on every character.
    pub fn add_plugin(&mut self, plugin: TagPlugin) {
        self.plugins.push(plugin);
    }

    /// Number of registered plugins.
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Offer one character; released characters are appended to `out` in
    /// arrival order.
    pub fn push_char(&mut self, ch: char, out: &mut Vec<char>) {
        self.pending.push_back(Pending { ch, dropped: false });

        let mut max_hold = 0;
        for plugin in &mut self.plugins {
            let step = plugin.process_char(ch);
            if step.retire > 0 {
                // Retired characters were necessarily still pending: the
                // plugin held them through the partial boundary match.
                debug_assert!(step.retire <= self.pending.len());
                let skip = self.pending.len().saturating_sub(step.retire);
                for entry in self.pending.iter_mut().skip(skip) {
                    entry.dropped = true;
                }
            }
            if step.hold > max_hold {
                max_hold = step.hold;
            }
        }

        while self.pending.len() > max_hold {
            if let Some(entry) = self.pending.pop_front() {
                if !entry.dropped {
                    out.push(entry.ch);
                }
            }
        }
    }

    /// Offer a chunk of characters.
    pub fn push_str(&mut self, input: &str, out: &mut Vec<char>) {
        for ch in input.chars() {
            self.push_char(ch, out);
        }
    }

    /// End of stream: still-deferred characters are released as plain
    /// content, characters retired by a completed boundary stay suppressed,
    /// and every plugin returns to idle.
    pub fn finish(&mut self, out: &mut Vec<char>) {
        for plugin in &mut self.plugins {
            plugin.reset();
        }
        while let Some(entry) = self.pending.pop_front() {
            if !entry.dropped {
                out.push(entry.ch);
            }
        }
    }

    /// Filter one complete message, including the end-of-stream flush. The
    /// pipeline is ready for the next message afterwards.
    pub fn filter_str(&mut self, input: &str) -> String {
        let mut out = Vec::with_capacity(input.len());
        self.push_str(input, &mut out);
        self.finish(&mut out);
        out.into_iter().collect()
    }

    /// Lazily filter an incoming character sequence. The adapter flushes
    /// end-of-stream state when the input runs dry.
    pub fn filter<I>(&mut self, input: I) -> Filtered<'_, I::IntoIter>
    where
        I: IntoIterator<Item = char>,
    {
        Filtered {
            pipeline: self,
            input: input.into_iter(),
            buf: Vec::new(),
            pos: 0,
            done: false,
        }
    }

    /// Abandon the current stream: drop any deferred characters and force
    /// every plugin back to idle.
    pub fn reset(&mut self) {
        for plugin in &mut self.plugins {
            plugin.reset();
        }
        self.pending.clear();
    }
}

/// Lazy filtered view over a character iterator; see [`Pipeline::filter`].
pub struct Filtered<'a, I> {
    pipeline: &'a mut Pipeline,
    input: I,
    buf: Vec<char>,
    pos: usize,
    done: bool,
}

impl<I: Iterator<Item = char>> Iterator for Filtered<'_, I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if self.pos < self.buf.len() {
                let ch = self.buf[self.pos];
                self.pos += 1;
                return Some(ch);
            }
            if self.done {
                return None;
            }
            self.buf.clear();
            self.pos = 0;
            match self.input.next() {
                Some(ch) => self.pipeline.push_char(ch, &mut self.buf),
                None => {
                    self.pipeline.finish(&mut self.buf);
                    self.done = true;
                }
            }
        }
    }
}
