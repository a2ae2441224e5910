//! Route-table configuration.
//!
//! A route table is a TOML document with optional match options and an ordered list of routes:
//!
//! ```toml
//! [options]
//! case_insensitive = true
//!
//! [[routes]]
//! name = "user"
//! template = "/users/{id}"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::template::MatchOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    pub options: MatchOptions,
    /// Routes in lookup order; the first match wins.
    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Unique route identifier.
    pub name: String,
    /// Template source, compiled when the router is built.
    pub template: String,
}

impl RouterConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            routes = config.routes.len(),
            "route table loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_table() {
        let config = RouterConfig::from_toml_str(
            r#"
            [options]
            case_insensitive = true
            keep_first_variable = true

            [[routes]]
            name = "user"
            template = "/users/{id}"

            [[routes]]
            name = "files"
            template = "/files/{path=**}"
            "#,
        )
        .unwrap();
        assert!(config.options.case_insensitive);
        assert!(config.options.keep_first_variable);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].name, "user");
        assert_eq!(config.routes[1].template, "/files/{path=**}");
    }

    #[test]
    fn test_defaults() {
        let config = RouterConfig::from_toml_str("").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_route_requires_template() {
        let err = RouterConfig::from_toml_str(
            r#"
            [[routes]]
            name = "broken"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RouterConfig::load("/nonexistent/pathmatch/routes.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
