//! Navigation resolver: path -> route -> lazily loaded page -> shell.
//!
//! DESIGN
//! ======
//! `navigate` is `resolve` then `load`, then a history update and a render.
//! Loads suspend the navigation without blocking the thread, so several
//! navigations can be in flight at once. Ordering is decided by a
//! navigation token taken when the call is made (not when the future is
//! first polled): a finished navigation is applied only if its token is
//! still the latest. Older ones come back as `Superseded` and leave the view
//! and the history untouched. Their modules stay cached.
//!
//! The token check, the history update, and the render happen under one
//! lock, so applied navigations reach the shell in token order.
//!
//! ERROR HANDLING
//! ==============
//! Unknown paths render the not-found fallback. Load failures go to the
//! shell's error surface. Neither happens for a navigation that has already
//! been superseded. There is no retry: the failed route is unloaded again
//! and the next navigation to it fetches from scratch.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use crate::history::{History, HistoryMode};
use crate::loader::{LoadError, LoadState, ModuleCache};
use crate::page::{PageModule, not_found_view};
use crate::route::{Route, RouteTable};
use crate::shell::Shell;

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The requested path matches no route.
    #[error("no route matches '{path}'")]
    NotFound { path: String },

    /// The route's page module could not be fetched.
    #[error("failed to load page for route '{route}': {source}")]
    LoadFailure { route: String, source: Arc<LoadError> },
}

impl NavError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::LoadFailure { .. } => "E_LOAD_FAILURE",
        }
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Result of a navigation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Navigation {
    /// The page was rendered and the history updated.
    Rendered { path: String, route: String },
    /// The path was already showing; nothing was rendered.
    Unchanged { path: String },
    /// A newer navigation was issued before this one finished.
    Superseded { path: String },
}

/// The page currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Current {
    pub path: String,
    pub route: String,
}

#[derive(Debug, Clone, Copy)]
enum HistoryAction {
    Push,
    Replace,
    Traverse(usize),
}

struct ViewState {
    history: History,
    current: Option<Current>,
}

// =============================================================================
// NAVIGATOR
// =============================================================================

/// Resolves paths, loads pages once, and renders the latest navigation.
///
/// Created by [`crate::app::App::mount`].
pub struct Navigator {
    table: RouteTable,
    cache: ModuleCache,
    shell: Arc<dyn Shell>,
    latest: AtomicU64,
    view: Mutex<ViewState>,
}

impl Navigator {
    pub(crate) fn new(table: RouteTable, shell: Arc<dyn Shell>, mode: HistoryMode) -> Self {
        Self {
            table,
            cache: ModuleCache::new(),
            shell,
            latest: AtomicU64::new(0),
            view: Mutex::new(ViewState { history: History::new(mode), current: None }),
        }
    }

    /// Look up the route registered at exactly `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NotFound`] when no route matches.
    pub fn resolve(&self, path: &str) -> Result<&Route, NavError> {
        self.table.resolve(path).ok_or_else(|| NavError::NotFound { path: path.to_string() })
    }

    /// Fetch the route's page module, at most once per session.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::LoadFailure`] if the loader fails or the route is
    /// not part of this navigator's table.
    /// The module always comes from the table's own route, whatever loader
    /// the argument carries.
    pub async fn load(&self, route: &Route) -> Result<PageModule, NavError> {
        let Some(registered) = self.table.registered(route) else {
            return Err(NavError::LoadFailure {
                route: route.name().to_string(),
                source: Arc::new(LoadError::UnknownRoute(route.name().to_string())),
            });
        };
        self.cache
            .load(registered)
            .await
            .map_err(|source| NavError::LoadFailure { route: route.name().to_string(), source })
    }

    /// Show the page at `path` and push a history entry.
    ///
    /// The navigation token is taken when this method is called, so the
    /// most recent call wins even if the returned futures are polled in a
    /// different order.
    pub fn navigate<'a>(&'a self, path: &str) -> impl Future<Output = Result<Navigation, NavError>> + use<'a> {
        let token = self.begin();
        self.run(token, path.to_string(), HistoryAction::Push)
    }

    /// Like [`Navigator::navigate`], but replaces the current history entry.
    pub fn replace<'a>(&'a self, path: &str) -> impl Future<Output = Result<Navigation, NavError>> + use<'a> {
        let token = self.begin();
        self.run(token, path.to_string(), HistoryAction::Replace)
    }

    /// Go one entry back. `None` at the start of the history.
    pub fn back(&self) -> Option<impl Future<Output = Result<Navigation, NavError>> + '_> {
        self.traverse(-1)
    }

    /// Go one entry forward. `None` at the end of the history.
    pub fn forward(&self) -> Option<impl Future<Output = Result<Navigation, NavError>> + '_> {
        self.traverse(1)
    }

    /// The page currently on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<Current> {
        self.lock_view().current.clone()
    }

    /// Snapshot of the history stack.
    #[must_use]
    pub fn history(&self) -> History {
        self.lock_view().history.clone()
    }

    #[must_use]
    pub fn load_state(&self, route: &str) -> LoadState {
        self.cache.state(route)
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    fn traverse(&self, delta: isize) -> Option<impl Future<Output = Result<Navigation, NavError>> + '_> {
        let (index, path) = {
            let view = self.lock_view();
            let (index, path) = view.history.peek(delta)?;
            (index, path.to_string())
        };
        let token = self.begin();
        Some(self.run(token, path, HistoryAction::Traverse(index)))
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }

    async fn run(&self, token: u64, path: String, action: HistoryAction) -> Result<Navigation, NavError> {
        debug!(%path, token, "navigation started");

        let route = match self.resolve(&path) {
            Ok(route) => route,
            Err(err) => {
                let mut view = self.lock_view();
                if self.is_latest(token) {
                    view.current = None;
                    self.shell.render_fallback(&path, &not_found_view(&path));
                }
                return Err(err);
            }
        };

        {
            let mut view = self.lock_view();
            if view.current.as_ref().is_some_and(|c| c.path == path) {
                if !self.is_latest(token) {
                    return Ok(Navigation::Superseded { path });
                }
                if let HistoryAction::Traverse(index) = action {
                    view.history.set_index(index, &path);
                }
                return Ok(Navigation::Unchanged { path });
            }
        }

        let module = match self.load(route).await {
            Ok(module) => module,
            Err(err) => {
                let _view = self.lock_view();
                if self.is_latest(token) {
                    self.shell.report_error(&err);
                }
                return Err(err);
            }
        };

        let mut view = self.lock_view();
        if !self.is_latest(token) {
            info!(%path, token, "navigation superseded, discarding result");
            return Ok(Navigation::Superseded { path });
        }

        match action {
            HistoryAction::Push => view.history.push(path.clone()),
            HistoryAction::Replace => view.history.replace(path.clone()),
            HistoryAction::Traverse(index) => {
                if !view.history.set_index(index, &path) {
                    view.history.push(path.clone());
                }
            }
        }
        self.shell.render(route, &module.render());
        view.current = Some(Current { path: path.clone(), route: route.name().to_string() });
        info!(%path, route = route.name(), token, "navigation rendered");

        Ok(Navigation::Rendered { path, route: route.name().to_string() })
    }

    fn lock_view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
