//! AST types for compiled path templates.

use std::fmt;

use itertools::Itertools;

/// One element of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Exact text; never contains `/`, `*`, `{`, `}` or `=`.
    Literal(String),
    /// `*`: exactly one segment, not captured.
    Star,
    /// `**`: zero or more trailing segments, not captured.
    DoubleStar,
    /// `{name}` or `{name=pattern}`.
    ///
    /// A `pattern` of `None` captures exactly one segment verbatim. A sub-pattern holds only
    /// `Literal`, `Star` and at most one trailing `DoubleStar`.
    Variable {
        name: String,
        pattern: Option<Vec<Segment>>,
    },
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            pattern: None,
        }
    }

    pub fn variable_with(name: impl Into<String>, pattern: Vec<Segment>) -> Self {
        Self::Variable {
            name: name.into(),
            pattern: Some(pattern),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Star => f.write_str("*"),
            Self::DoubleStar => f.write_str("**"),
            Self::Variable {
                name,
                pattern: None,
            } => write!(f, "{{{name}}}"),
            Self::Variable {
                name,
                pattern: Some(pattern),
            } => write!(f, "{{{name}={}}}", pattern.iter().join("/")),
        }
    }
}

/// A compiled path template: an ordered sequence of [`Segment`]s.
///
/// Templates are immutable once compiled and can be shared freely between matches and threads.
/// The fields are public so that trees can also be built by hand; the matcher re-checks the
/// structural rules on such trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Names of all variables in template order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Template {
    /// Canonical form: a single leading slash and `/` between segments. The empty template is `/`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
