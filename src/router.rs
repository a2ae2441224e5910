//! Ordered table of named templates.
//!
//! Routes are tried in insertion order and the first strict match wins. The table is immutable
//! once built, so a `Router` can be shared between threads without locking.

use crate::config::RouterConfig;
use crate::error::{ConfigError, Error, MatchError};
use crate::path;
use crate::template::{Captures, MatchOptions, Template, compile, match_segments};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub template: Template,
}

/// The route that matched a path, with its captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub captures: Captures,
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
    options: MatchOptions,
}

impl Router {
    pub fn new(options: MatchOptions) -> Self {
        Self {
            routes: Vec::new(),
            options,
        }
    }

    /// Build a router from a loaded route table, compiling every template.
    pub fn from_config(config: &RouterConfig) -> Result<Self, ConfigError> {
        let mut router = Self::new(config.options);
        for route in &config.routes {
            if router.route(&route.name).is_some() {
                return Err(ConfigError::DuplicateRoute(route.name.clone()));
            }
            let template = compile(&route.template).map_err(|source| ConfigError::Template {
                route: route.name.clone(),
                source,
            })?;
            router.push(route.name.clone(), template);
        }
        Ok(router)
    }

    /// Compile `template` and append it under `name`.
    pub fn add(&mut self, name: impl Into<String>, template: &str) -> Result<(), Error> {
        let name = name.into();
        if self.route(&name).is_some() {
            return Err(ConfigError::DuplicateRoute(name).into());
        }
        let template = compile(template)?;
        self.push(name, template);
        Ok(())
    }

    fn push(&mut self, name: String, template: Template) {
        tracing::debug!(route = %name, template = %template, "route added");
        self.routes.push(Route { name, template });
    }

    /// Find the first route whose template matches the whole of `path`.
    pub fn lookup(&self, path: &str) -> Result<Option<RouteMatch<'_>>, MatchError> {
        let segments = path::split(path);
        for route in &self.routes {
            if let Some(captures) = match_segments(&route.template, &segments[..], &self.options)? {
                tracing::debug!(path, route = %route.name, "route matched");
                return Ok(Some(RouteMatch { route, captures }));
            }
        }
        tracing::debug!(path, "no route matched");
        Ok(None)
    }

    /// Match `path` against the route registered under `name` only.
    pub fn match_route(&self, name: &str, path: &str) -> Result<Option<Captures>, MatchError> {
        let route = self.route(name).ok_or_else(|| MatchError::NilTemplate {
            name: name.to_string(),
        })?;
        route.template.match_path(path, &self.options)
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;
    use crate::error::TemplateError;

    fn vars(pairs: &[(&str, &str)]) -> Captures {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn router() -> Router {
        let mut router = Router::default();
        router.add("user_posts", "/users/{user}/posts/{post}").unwrap();
        router.add("user", "/users/{user}").unwrap();
        router.add("any_user_path", "/users/{user}/**").unwrap();
        router.add("files", "/files/{path=**}").unwrap();
        router
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let router = router();
        let m = router.lookup("/users/alice/posts/7").unwrap().unwrap();
        assert_eq!(m.route.name, "user_posts");
        assert_eq!(m.captures, vars(&[("user", "alice"), ("post", "7")]));

        let m = router.lookup("/users/alice").unwrap().unwrap();
        assert_eq!(m.route.name, "user");

        let m = router.lookup("/users/alice/settings").unwrap().unwrap();
        assert_eq!(m.route.name, "any_user_path");
    }

    #[test]
    fn test_lookup_miss() {
        assert!(router().lookup("/groups/x").unwrap().is_none());
    }

    #[test]
    fn test_match_route() {
        let router = router();
        assert_eq!(
            router.match_route("files", "/files/a/b.txt").unwrap(),
            Some(vars(&[("path", "a/b.txt")]))
        );
        assert_eq!(router.match_route("user", "/files/a").unwrap(), None);
    }

    #[test]
    fn test_match_unknown_route() {
        assert_eq!(
            router().match_route("missing", "/x"),
            Err(MatchError::NilTemplate {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_add_duplicate() {
        let mut router = router();
        assert!(matches!(
            router.add("user", "/u/{id}"),
            Err(Error::Config(ConfigError::DuplicateRoute(_)))
        ));
        assert_eq!(router.len(), 4);
    }

    #[test]
    fn test_add_invalid_template() {
        let mut router = Router::default();
        assert!(matches!(
            router.add("bad", "/a/**/b"),
            Err(Error::Template(TemplateError::IllegalDoubleStarPlacement))
        ));
        assert!(router.is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = RouterConfig {
            options: MatchOptions {
                case_insensitive: true,
                ..Default::default()
            },
            routes: vec![RouteConfig {
                name: "user".to_string(),
                template: "/users/{id}".to_string(),
            }],
        };
        let router = Router::from_config(&config).unwrap();
        assert_eq!(router.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), ["user"]);
        let m = router.lookup("/USERS/Bob").unwrap().unwrap();
        assert_eq!(m.captures, vars(&[("id", "Bob")]));
    }

    #[test]
    fn test_from_config_reports_route_name() {
        let config = RouterConfig::from_toml_str(
            r#"
            [[routes]]
            name = "ok"
            template = "/a"

            [[routes]]
            name = "broken"
            template = "/{unclosed"
            "#,
        )
        .unwrap();
        match Router::from_config(&config) {
            Err(ConfigError::Template { route, source }) => {
                assert_eq!(route, "broken");
                assert!(matches!(source, TemplateError::UnexpectedEndOfInput { .. }));
            }
            other => panic!("expected template error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config_duplicate() {
        let config = RouterConfig::from_toml_str(
            r#"
            [[routes]]
            name = "a"
            template = "/a"

            [[routes]]
            name = "a"
            template = "/b"
            "#,
        )
        .unwrap();
        assert!(matches!(
            Router::from_config(&config),
            Err(ConfigError::DuplicateRoute(name)) if name == "a"
        ));
    }
}
