//! Routes and the static route table.
//!
//! DESIGN
//! ======
//! The table is built once from an ordered list and is immutable afterwards.
//! Construction validates the invariants (unique names, unique absolute
//! paths, a home route at `/`) so `resolve` can be a plain exact-match
//! lookup on a path index.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::loader::{FnLoader, LoadError, PageLoader};
use crate::page::PageModule;

#[cfg(test)]
#[path = "route_test.rs"]
mod tests;

/// Path of the designated home route.
pub const HOME_PATH: &str = "/";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("route table is empty")]
    Empty,
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),
    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),
    #[error("route path '{0}' must start with '/'")]
    InvalidPath(String),
    #[error("no home route registered at '/'")]
    MissingHome,
}

// =============================================================================
// ROUTE
// =============================================================================

/// A navigable location: path, unique name, and deferred page loader.
#[derive(Clone)]
pub struct Route {
    path: String,
    name: String,
    loader: Arc<dyn PageLoader>,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, loader: Arc<dyn PageLoader>) -> Self {
        Self { path: path.into(), name: name.into(), loader }
    }

    /// Route whose page is produced by an async closure on first navigation.
    pub fn lazy<F, Fut>(path: impl Into<String>, name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PageModule, LoadError>> + Send + 'static,
    {
        Self::new(path, name, Arc::new(FnLoader::new(f)))
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn loader(&self) -> Arc<dyn PageLoader> {
        Arc::clone(&self.loader)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("path", &self.path).field("name", &self.name).finish_non_exhaustive()
    }
}

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// Immutable, validated set of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    /// Build the table from an ordered route list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a name or path repeats, a path
    /// is not absolute, or no route is registered at `/`.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        if routes.is_empty() {
            return Err(RouteTableError::Empty);
        }

        let mut by_path = HashMap::with_capacity(routes.len());
        let mut by_name = HashMap::with_capacity(routes.len());
        for (idx, route) in routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                return Err(RouteTableError::InvalidPath(route.path.clone()));
            }
            if by_name.insert(route.name.clone(), idx).is_some() {
                return Err(RouteTableError::DuplicateName(route.name.clone()));
            }
            if by_path.insert(route.path.clone(), idx).is_some() {
                return Err(RouteTableError::DuplicatePath(route.path.clone()));
            }
        }
        if !by_path.contains_key(HOME_PATH) {
            return Err(RouteTableError::MissingHome);
        }

        Ok(Self { routes, by_path, by_name })
    }

    /// Exact-match lookup of a path.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.by_path.get(path).map(|&idx| &self.routes[idx])
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    /// The route registered at `/`.
    #[must_use]
    pub fn home(&self) -> &Route {
        &self.routes[self.by_path[HOME_PATH]]
    }

    /// This table's own route with the same name and path as `route`.
    #[must_use]
    pub fn registered(&self, route: &Route) -> Option<&Route> {
        self.by_name(route.name()).filter(|r| r.path() == route.path())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
