//! Path template compiler and matcher.
//!
//! A template is a slash-delimited pattern that a concrete path is matched against, segment by
//! segment.
//!
//! # Template syntax
//!
//! | Segment        | Meaning                                                  |
//! |----------------|----------------------------------------------------------|
//! | `text`         | Literal; must equal the path segment                     |
//! | `*`            | Exactly one segment, not captured                        |
//! | `**`           | Zero or more trailing segments, not captured             |
//! | `{name}`       | Exactly one segment, captured as `name`                  |
//! | `{name=a/*}`   | Segments matching the sub-pattern, captured joined by `/` |
//! | `{name=a/**}`  | `a` then everything after it, captured                   |
//!
//! Templates must start with `/`. Repeated slashes are ignored. A `**`, on its own or inside a
//! variable, must be the last thing in the template, and variables do not nest.

pub mod ast;
pub mod lexer;
pub mod matcher;
pub mod parser;

pub use ast::{Segment, Template};
pub use matcher::{Captures, MatchOptions, MatchOutcome, match_prefix, match_segments};
pub use parser::compile;
