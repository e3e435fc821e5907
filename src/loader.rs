//! Page loaders and the module cache.
//!
//! DESIGN
//! ======
//! A route's loader is a deferred producer of a `PageModule`. `ModuleCache`
//! keeps one slot per route name: `Pending` holds a shared future that every
//! concurrent waiter awaits, `Ready` holds the loaded module. The first
//! caller starts the fetch; later callers join it. Slots are only ever added
//! or promoted to `Ready`, except that a failed fetch drops its slot so the
//! route is unloaded again.
//!
//! The slot map sits behind a `std::sync::Mutex` that is never held across
//! an await point.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::{debug, info, warn};

use crate::page::{PageManifest, PageModule, StaticPage};
use crate::route::Route;

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors produced while fetching a page module.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The page file could not be read.
    #[error("failed to read page {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    /// The page file is not a valid manifest.
    #[error("failed to parse page {}: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    /// A loader reported a failure of its own.
    #[error("page load failed: {0}")]
    Failed(String),

    /// The route is not part of the navigator's table.
    #[error("route '{0}' is not registered")]
    UnknownRoute(String),
}

// =============================================================================
// LOADERS
// =============================================================================

/// Deferred producer of a page module.
#[async_trait::async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self) -> Result<PageModule, LoadError>;
}

/// Loader backed by a closure returning a future.
pub struct FnLoader<F> {
    f: F,
}

impl<F> FnLoader<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait::async_trait]
impl<F, Fut> PageLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PageModule, LoadError>> + Send + 'static,
{
    async fn load(&self) -> Result<PageModule, LoadError> {
        (self.f)().await
    }
}

/// Loader that reads a JSON page manifest from disk.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loader for `<dir>/<name>.json`.
    #[must_use]
    pub fn in_dir(dir: &Path, name: &str) -> Self {
        Self::new(dir.join(format!("{name}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl PageLoader for FileLoader {
    async fn load(&self) -> Result<PageModule, LoadError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io { path: self.path.clone(), source })?;
        let manifest: PageManifest =
            serde_json::from_str(&raw).map_err(|source| LoadError::Parse { path: self.path.clone(), source })?;
        Ok(StaticPage::new(manifest).into_module())
    }
}

// =============================================================================
// MODULE CACHE
// =============================================================================

type SharedLoad = Shared<BoxFuture<'static, Result<PageModule, Arc<LoadError>>>>;

enum Slot {
    Pending(SharedLoad),
    Ready(PageModule),
}

/// Lifecycle of a route's module within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Pending,
    Loaded,
}

/// Memoized page modules keyed by route name.
#[derive(Default)]
pub struct ModuleCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ModuleCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the route's module, fetching it on first use.
    ///
    /// Concurrent callers for the same route share a single fetch and all
    /// receive the same module (or the same error).
    ///
    /// # Errors
    ///
    /// Returns the loader's error wrapped in an `Arc` so every waiter can
    /// hold it.
    pub async fn load(&self, route: &Route) -> Result<PageModule, Arc<LoadError>> {
        let name = route.name();
        let load = {
            let mut slots = self.lock();
            let in_flight = match slots.get(name) {
                Some(Slot::Ready(module)) => return Ok(Arc::clone(module)),
                Some(Slot::Pending(load)) => Some(load.clone()),
                None => None,
            };
            if let Some(load) = in_flight {
                debug!(route = name, "joining in-flight page load");
                load
            } else {
                info!(route = name, "loading page module");
                let loader = route.loader();
                let load = async move { loader.load().await.map_err(Arc::new) }.boxed().shared();
                slots.insert(name.to_string(), Slot::Pending(load.clone()));
                load
            }
        };

        let result = load.clone().await;

        let mut slots = self.lock();
        match &result {
            Ok(module) => {
                let promote = !matches!(slots.get(name), Some(Slot::Ready(_)));
                if promote {
                    slots.insert(name.to_string(), Slot::Ready(Arc::clone(module)));
                }
            }
            Err(e) => {
                let owned = matches!(slots.get(name), Some(Slot::Pending(p)) if p.ptr_eq(&load));
                if owned {
                    warn!(route = name, error = %e, "page module load failed");
                    slots.remove(name);
                }
            }
        }
        result
    }

    /// Current lifecycle state of the named route.
    #[must_use]
    pub fn state(&self, name: &str) -> LoadState {
        match self.lock().get(name) {
            None => LoadState::Unloaded,
            Some(Slot::Pending(_)) => LoadState::Pending,
            Some(Slot::Ready(_)) => LoadState::Loaded,
        }
    }

    /// Number of routes with a loaded module.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.lock().values().filter(|slot| matches!(slot, Slot::Ready(_))).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
