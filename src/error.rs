//! Error types for template compilation, matching and route-table loading.

use thiserror::Error;

/// Errors that can occur while compiling a template string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template must start with '/', found {found}")]
    MissingLeadingSlash { found: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("'**' is only allowed as the final segment of a template or sub-pattern")]
    IllegalDoubleStarPlacement,
    #[error("variables cannot be nested inside the pattern of variable '{variable}'")]
    NestedVariableNotAllowed { variable: String },
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
}

/// Errors that can occur while matching a path against a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("malformed template tree: {0}")]
    MalformedTree(&'static str),
    #[error("no template registered under '{name}'")]
    NilTemplate { name: String },
}

/// Errors that can occur while loading a route table.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("route '{route}': {source}")]
    Template {
        route: String,
        #[source]
        source: TemplateError,
    },
    #[error("duplicate route name '{0}'")]
    DuplicateRoute(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
