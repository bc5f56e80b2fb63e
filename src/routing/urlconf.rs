//! Mounting a namespaced table under a path prefix.

use crate::routing::params::PathParams;
use crate::routing::router::{ResolverMatch, ReverseError, RouteTable};

/// Root URL configuration: one route table served under `prefix`.
#[derive(Debug, Clone)]
pub struct UrlConf<H> {
    prefix: String,
    table: RouteTable<H>,
}

impl<H> UrlConf<H> {
    /// `prefix` is matched against the path after its leading `/` is removed,
    /// so `"polls/"` serves `/polls/...`. An empty prefix mounts at the root.
    pub fn mount(prefix: impl Into<String>, table: RouteTable<H>) -> Self {
        Self {
            prefix: prefix.into(),
            table,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    /// Resolve an absolute request path such as `/polls/7/`.
    pub fn resolve(&self, request_path: &str) -> Option<ResolverMatch<'_, H>> {
        let path = request_path.strip_prefix('/').unwrap_or(request_path);
        let rest = path.strip_prefix(self.prefix.as_str())?;
        self.table.resolve(rest)
    }

    /// Absolute path for `namespace:name`.
    pub fn url_for(&self, qualified_name: &str, params: &PathParams) -> Result<String, ReverseError> {
        let relative = self.table.reverse(qualified_name, params)?;
        Ok(format!("/{}{}", self.prefix, relative))
    }
}
