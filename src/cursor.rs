//! Step-wise traversal of one concrete path against a sequence of templates.
//!
//! A [`Cursor`] consumes its path a piece at a time: each successful [`Cursor::step`] matches a
//! template against the unconsumed suffix and records a checkpoint, so that
//! [`Cursor::step_back`] can undo it exactly. Variables captured by every applied step are
//! available through [`Cursor::variables`].
//!
//! A cursor is plain mutable state with no interior synchronisation; drive each traversal from
//! a single owner.

use crate::error::MatchError;
use crate::path;
use crate::template::{Captures, MatchOptions, Template, match_prefix};

/// Traversal state over a fixed concrete path.
#[derive(Debug, Clone)]
pub struct Cursor {
    /// The split path. Never changes after construction.
    segments: Vec<String>,
    /// Number of leading segments consumed so far.
    consumed: usize,
    /// `consumed` as it was before each applied step.
    checkpoints: Vec<usize>,
    /// Variables captured by each applied step, in step order.
    layers: Vec<Captures>,
    options: MatchOptions,
}

/// Builder for a [`Cursor`] with non-default [`MatchOptions`].
///
/// ```rust
/// use pathmatch::Cursor;
///
/// let cursor = Cursor::builder("/Users/alice").case_insensitive().build();
/// assert!(cursor.options().case_insensitive);
/// ```
#[derive(Debug, Clone)]
pub struct CursorBuilder {
    path: String,
    options: MatchOptions,
}

impl CursorBuilder {
    /// Compare literals ignoring ASCII case.
    pub fn case_insensitive(mut self) -> Self {
        self.options.case_insensitive = true;
        self
    }

    /// Keep the first value when a variable name is captured again by a later step.
    pub fn keep_first_variable(mut self) -> Self {
        self.options.keep_first_variable = true;
        self
    }

    pub fn build(self) -> Cursor {
        Cursor::with_options(&self.path, self.options)
    }
}

// Constructors
impl Cursor {
    pub fn new(path: &str) -> Self {
        Self::with_options(path, MatchOptions::default())
    }

    pub fn with_options(path: &str, options: MatchOptions) -> Self {
        Self {
            segments: path::split(path).into_iter().map(str::to_string).collect(),
            consumed: 0,
            checkpoints: Vec::new(),
            layers: Vec::new(),
            options,
        }
    }

    pub fn builder(path: impl Into<String>) -> CursorBuilder {
        CursorBuilder {
            path: path.into(),
            options: MatchOptions::default(),
        }
    }
}

// Traversal
impl Cursor {
    /// Match `template` against the unconsumed part of the path.
    ///
    /// On a match the cursor advances past the consumed segments and the captures of this step
    /// are returned. On a mismatch the cursor is left untouched and `Ok(None)` is returned; only
    /// a malformed template is an error.
    pub fn step(&mut self, template: &Template) -> Result<Option<Captures>, MatchError> {
        let rest = &self.segments[self.consumed..];
        let Some(outcome) = match_prefix(template, rest, &self.options)? else {
            tracing::trace!(
                template = %template,
                remaining = %self.remaining(),
                "cursor step rejected"
            );
            return Ok(None);
        };

        self.checkpoints.push(self.consumed);
        self.consumed += outcome.consumed;
        self.layers.push(outcome.captures.clone());
        tracing::debug!(
            template = %template,
            consumed = outcome.consumed,
            depth = self.depth(),
            "cursor step applied"
        );
        Ok(Some(outcome.captures))
    }

    /// Undo the most recent successful step. Returns `false` if no step has been applied.
    pub fn step_back(&mut self) -> bool {
        let Some(checkpoint) = self.checkpoints.pop() else {
            return false;
        };
        self.consumed = checkpoint;
        self.layers.pop();
        tracing::debug!(depth = self.depth(), "cursor stepped back");
        true
    }

    /// Return to the freshly constructed state.
    pub fn reset(&mut self) {
        self.consumed = 0;
        self.checkpoints.clear();
        self.layers.clear();
        tracing::debug!("cursor reset");
    }
}

// Queries
impl Cursor {
    /// True once every path segment has been consumed.
    pub fn is_complete(&self) -> bool {
        self.consumed == self.segments.len()
    }

    /// Number of steps currently applied.
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// The unconsumed part of the path, e.g. `/settings/profile`, or `""` when complete.
    pub fn remaining(&self) -> String {
        if self.is_complete() {
            return String::new();
        }
        path::join(&self.segments[self.consumed..])
    }

    /// All variables captured by the applied steps, merged in step order.
    ///
    /// When two steps capture the same name the later one wins, unless the cursor was built
    /// with [`CursorBuilder::keep_first_variable`].
    pub fn variables(&self) -> Captures {
        let mut merged = Captures::new();
        for layer in &self.layers {
            for (name, value) in layer {
                self.options.record(&mut merged, name, value.clone());
            }
        }
        merged
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// The full path, split into segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}
