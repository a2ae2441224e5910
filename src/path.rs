//! Helpers for converting between path strings and segment lists.
//!
//! Empty segments never survive a round trip: leading, trailing and repeated slashes are
//! dropped by [`split`] and never produced by [`join`].

use itertools::Itertools;

/// Split a path into its non-empty segments.
///
/// `split("/users//alice/")` is `["users", "alice"]`; an empty or all-slash path has no segments.
pub fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Join segments into a path with a single leading slash.
///
/// Slashes around each segment are trimmed and empty segments are skipped, so joining nothing
/// yields `/`.
pub fn join<I>(segments: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let joined = segments
        .into_iter()
        .filter_map(|s| {
            let trimmed = s.as_ref().trim_matches('/').to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .join("/");
    format!("/{joined}")
}

/// Collapse redundant slashes: `normalize("/users//alice///")` is `/users/alice`.
pub fn normalize(path: &str) -> String {
    join(split(path))
}
