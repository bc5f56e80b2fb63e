//! Route lookup and reversal.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route matching a path
//! - Build paths back from `namespace:name` plus parameters
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan; first match wins
//! - Explicit `None` on no match rather than a silent default
//! - Duplicate names are rejected when the table is built

use serde::Serialize;
use thiserror::Error;

use crate::routing::params::PathParams;
use crate::routing::pattern::{PatternError, ReverseMismatch, RoutePattern};

/// Error raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("route name {name:?} is registered twice in namespace {namespace:?}")]
    DuplicateName { namespace: String, name: String },
}

/// Error raised by reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    #[error("{name:?} is not a namespaced route name (expected \"{namespace}:<name>\")")]
    Unqualified { name: String, namespace: String },

    #[error("unknown namespace {0:?}")]
    UnknownNamespace(String),

    #[error("no route named {0:?}")]
    UnknownName(String),

    #[error("cannot reverse {name:?}: {reason}")]
    NoReverseMatch {
        name: String,
        #[source]
        reason: ReverseMismatch,
    },
}

/// A declared route.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub pattern: RoutePattern,
    pub handler: H,
    pub name: String,
}

/// Result of resolving a path.
#[derive(Debug, Clone, Serialize)]
pub struct ResolverMatch<'a, H> {
    #[serde(skip)]
    pub route: &'a Route<H>,
    pub namespace: &'a str,
    pub url_name: &'a str,
    pub route_pattern: &'a str,
    pub params: PathParams,
}

impl<H> ResolverMatch<'_, H> {
    /// `namespace:name` of the matched route.
    pub fn view_name(&self) -> String {
        format!("{}:{}", self.namespace, self.url_name)
    }

    pub fn handler(&self) -> &H {
        &self.route.handler
    }
}

/// An ordered, namespaced route table.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    namespace: String,
    routes: Vec<Route<H>>,
}

impl<H> RouteTable<H> {
    pub fn builder(namespace: impl Into<String>) -> RouteTableBuilder<H> {
        RouteTableBuilder {
            namespace: namespace.into(),
            declared: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the first route matching `path`.
    pub fn resolve(&self, path: &str) -> Option<ResolverMatch<'_, H>> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| ResolverMatch {
                route,
                namespace: &self.namespace,
                url_name: &route.name,
                route_pattern: route.pattern.as_str(),
                params,
            })
        })
    }

    /// Build the path (relative to the table) for `namespace:name`.
    pub fn reverse(&self, qualified_name: &str, params: &PathParams) -> Result<String, ReverseError> {
        let Some((namespace, name)) = qualified_name.rsplit_once(':') else {
            return Err(ReverseError::Unqualified {
                name: qualified_name.to_string(),
                namespace: self.namespace.clone(),
            });
        };
        if namespace != self.namespace {
            return Err(ReverseError::UnknownNamespace(namespace.to_string()));
        }

        let route = self
            .routes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ReverseError::UnknownName(qualified_name.to_string()))?;

        route
            .pattern
            .reverse(params)
            .map_err(|reason| ReverseError::NoReverseMatch {
                name: qualified_name.to_string(),
                reason,
            })
    }
}

/// Collects route declarations; patterns are compiled in `build`.
#[derive(Debug)]
pub struct RouteTableBuilder<H> {
    namespace: String,
    declared: Vec<(String, H, String)>,
}

impl<H> RouteTableBuilder<H> {
    /// Declare a route. Order of calls is matching order.
    pub fn path(mut self, pattern: &str, handler: H, name: &str) -> Self {
        self.declared
            .push((pattern.to_string(), handler, name.to_string()));
        self
    }

    pub fn build(self) -> Result<RouteTable<H>, RouteError> {
        let mut routes: Vec<Route<H>> = Vec::with_capacity(self.declared.len());

        for (raw, handler, name) in self.declared {
            if routes.iter().any(|r| r.name == name) {
                return Err(RouteError::DuplicateName {
                    namespace: self.namespace,
                    name,
                });
            }
            let pattern = RoutePattern::parse(&raw)?;
            routes.push(Route {
                pattern,
                handler,
                name,
            });
        }

        tracing::debug!(
            namespace = %self.namespace,
            routes = routes.len(),
            "Route table built"
        );

        Ok(RouteTable {
            namespace: self.namespace,
            routes,
        })
    }
}
