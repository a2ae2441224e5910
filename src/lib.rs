//! Match slash-delimited paths against declarative path templates.
//!
//! Templates are compiled once into an immutable [`Template`] and can then be matched against
//! any number of concrete paths, capturing named variables. A [`Cursor`] applies a sequence of
//! templates to one path, consuming it piece by piece with undo, and a [`Router`] picks the first
//! of several named templates that matches.
//!
//! # Example
//!
//! ```rust
//! use pathmatch::{Cursor, MatchOptions, compile, compile_and_match};
//!
//! let template = compile("/items/{category}/{item=**}").unwrap();
//! let captures = template
//!     .match_path("/items/electronics/tv/samsung", &MatchOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(captures["category"], "electronics");
//! assert_eq!(captures["item"], "tv/samsung");
//!
//! let (matched, captures) = compile_and_match("/users/{id}", "/users/alice").unwrap();
//! assert!(matched);
//! assert_eq!(captures["id"], "alice");
//!
//! let mut cursor = Cursor::new("/databases/mydb/documents/users/alice");
//! cursor.step(&compile("/databases/{db}/documents").unwrap()).unwrap();
//! assert_eq!(cursor.remaining(), "/users/alice");
//! cursor.step(&compile("/{collection}/{doc}").unwrap()).unwrap();
//! assert!(cursor.is_complete());
//! assert_eq!(cursor.variables().len(), 3);
//! ```

pub mod config;
mod cursor;
mod error;
pub mod path;
mod router;
pub mod template;

pub use config::{RouteConfig, RouterConfig};
pub use cursor::{Cursor, CursorBuilder};
pub use error::{ConfigError, Error, MatchError, TemplateError};
pub use router::{Route, RouteMatch, Router};
pub use template::{
    Captures, MatchOptions, MatchOutcome, Segment, Template, compile, match_prefix,
    match_segments,
};

/// Compile `template` and strictly match `path` against it with default options.
///
/// Returns whether the path matched and, if so, the captured variables; on a mismatch the
/// captures are empty.
pub fn compile_and_match(template: &str, path: &str) -> Result<(bool, Captures), Error> {
    let template = compile(template)?;
    Ok(match template.match_path(path, &MatchOptions::default())? {
        Some(captures) => (true, captures),
        None => (false, Captures::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_and_match() {
        let (matched, captures) =
            compile_and_match("/files/{category}/*", "/files/images/photo.jpg").unwrap();
        assert!(matched);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures["category"], "images");
    }

    #[test]
    fn test_compile_and_match_miss() {
        let (matched, captures) = compile_and_match("/a/{b}", "/a/b/c").unwrap();
        assert!(!matched);
        assert!(captures.is_empty());
    }

    #[test]
    fn test_compile_and_match_bad_template() {
        assert!(matches!(
            compile_and_match("a/b", "/a/b"),
            Err(Error::Template(TemplateError::MissingLeadingSlash { .. }))
        ));
    }
}
