//! Template matcher: walk a compiled [`Template`] against concrete path segments.
//!
//! The walk is a single left-to-right pass with no backtracking, linear in the number of
//! template nodes plus path segments.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::path;

use super::ast::{Segment, Template};

/// Captured variables, keyed by variable name.
pub type Captures = HashMap<String, String>;

/// Options that control literal comparison and variable conflicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Compare literals with ASCII case folding.
    pub case_insensitive: bool,
    /// When a variable name is captured more than once keep the first value instead of the last.
    pub keep_first_variable: bool,
}

impl MatchOptions {
    fn literal_eq(&self, literal: &str, segment: &str) -> bool {
        if self.case_insensitive {
            literal.eq_ignore_ascii_case(segment)
        } else {
            literal == segment
        }
    }

    /// Store `value` under `name`, honouring the conflict policy.
    pub fn record(&self, captures: &mut Captures, name: &str, value: String) {
        if self.keep_first_variable && captures.contains_key(name) {
            return;
        }
        captures.insert(name.to_string(), value);
    }
}

/// The result of a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Number of leading path segments consumed by the template.
    pub consumed: usize,
    pub captures: Captures,
}

/// Match `template` against the start of `segments`.
///
/// Succeeds when every template node is satisfied; path segments may remain unless the template
/// ends in `**`. Returns `Ok(None)` on a mismatch and never exposes partial captures.
pub fn match_prefix<S: AsRef<str>>(
    template: &Template,
    segments: &[S],
    options: &MatchOptions,
) -> Result<Option<MatchOutcome>, MatchError> {
    check_structure(template)?;

    let nodes = &template.segments;
    let mut captures = Captures::with_capacity(nodes.len());
    let mut pos = 0;

    for node in nodes {
        match node {
            Segment::Literal(text) => match segments.get(pos) {
                Some(segment) if options.literal_eq(text, segment.as_ref()) => pos += 1,
                _ => return Ok(None),
            },
            Segment::Star => {
                if pos >= segments.len() {
                    return Ok(None);
                }
                pos += 1;
            }
            // Always last; see `check_structure`.
            Segment::DoubleStar => pos = segments.len(),
            Segment::Variable {
                name,
                pattern: None,
            } => {
                let Some(segment) = segments.get(pos) else {
                    return Ok(None);
                };
                options.record(&mut captures, name, segment.as_ref().to_string());
                pos += 1;
            }
            Segment::Variable {
                name,
                pattern: Some(pattern),
            } => {
                let start = pos;
                for sub in pattern {
                    match sub {
                        Segment::Literal(text) => match segments.get(pos) {
                            Some(segment) if options.literal_eq(text, segment.as_ref()) => {
                                pos += 1
                            }
                            _ => return Ok(None),
                        },
                        Segment::Star => {
                            if pos >= segments.len() {
                                return Ok(None);
                            }
                            pos += 1;
                        }
                        Segment::DoubleStar => pos = segments.len(),
                        Segment::Variable { .. } => {
                            return Err(MatchError::MalformedTree("nested variable"));
                        }
                    }
                }
                let value = segments[start..pos].iter().map(|s| s.as_ref()).join("/");
                options.record(&mut captures, name, value);
            }
        }
    }

    Ok(Some(MatchOutcome {
        consumed: pos,
        captures,
    }))
}

/// Match `template` against all of `segments`.
///
/// Succeeds only if every template node and every path segment is consumed.
pub fn match_segments<S: AsRef<str>>(
    template: &Template,
    segments: &[S],
    options: &MatchOptions,
) -> Result<Option<Captures>, MatchError> {
    Ok(match_prefix(template, segments, options)?
        .filter(|outcome| outcome.consumed == segments.len())
        .map(|outcome| outcome.captures))
}

impl Template {
    /// Split `path` and match it strictly against this template.
    pub fn match_path(
        &self,
        path: &str,
        options: &MatchOptions,
    ) -> Result<Option<Captures>, MatchError> {
        let segments = path::split(path);
        match_segments(self, &segments[..], options)
    }
}

/// Reject trees the compiler could never produce: a `**` anywhere but the very end, or a
/// variable inside a sub-pattern.
fn check_structure(template: &Template) -> Result<(), MatchError> {
    let last = template.segments.len().saturating_sub(1);
    for (idx, node) in template.segments.iter().enumerate() {
        match node {
            Segment::DoubleStar if idx != last => {
                return Err(MatchError::MalformedTree("'**' must be the last segment"));
            }
            Segment::Variable {
                pattern: Some(pattern),
                ..
            } => {
                let sub_last = pattern.len().saturating_sub(1);
                for (sub_idx, sub) in pattern.iter().enumerate() {
                    match sub {
                        Segment::DoubleStar if sub_idx != sub_last || idx != last => {
                            return Err(MatchError::MalformedTree(
                                "'**' in a variable pattern must end the template",
                            ));
                        }
                        Segment::Variable { .. } => {
                            return Err(MatchError::MalformedTree("nested variable"));
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}
