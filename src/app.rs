//! Application root: route table + shell, mounted once.
//!
//! DESIGN
//! ======
//! `App::mount` takes the app by value and hands back the `Navigator`, so
//! an app cannot be mounted twice and nothing global is mutated. Everything
//! the navigator needs is fully built before the shell is touched.

use std::sync::Arc;

use tracing::info;

use crate::config::{ConfigError, ShellConfig};
use crate::history::HistoryMode;
use crate::navigator::Navigator;
use crate::pages::default_routes;
use crate::route::{RouteTable, RouteTableError};
use crate::shell::{Resource, RootHandle, Shell, ShellError, default_resources};

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

/// Anything that can stop the shell from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Routes(#[from] RouteTableError),
    #[error(transparent)]
    Shell(#[from] ShellError),
}

pub struct App {
    table: RouteTable,
    shell: Arc<dyn Shell>,
    history_mode: HistoryMode,
    resources: Vec<Resource>,
}

impl App {
    #[must_use]
    pub fn new(table: RouteTable, shell: Arc<dyn Shell>) -> Self {
        Self { table, shell, history_mode: HistoryMode::default(), resources: default_resources() }
    }

    #[must_use]
    pub fn with_history_mode(mut self, mode: HistoryMode) -> Self {
        self.history_mode = mode;
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }

    /// Attach the shell to `root` and return the navigator.
    ///
    /// # Errors
    ///
    /// Returns the shell's error if it cannot mount.
    pub fn mount(self, root: &RootHandle) -> Result<Navigator, ShellError> {
        self.shell.mount(root, &self.resources)?;
        info!(
            root = root.selector(),
            routes = self.table.len(),
            history = %self.history_mode,
            "app mounted"
        );
        Ok(Navigator::new(self.table, self.shell, self.history_mode))
    }
}

/// The built-in route table, file-backed when `config.pages_dir` is set.
///
/// # Errors
///
/// Returns a [`RouteTableError`] if the routes do not form a valid table.
pub fn default_table(config: &ShellConfig) -> Result<RouteTable, RouteTableError> {
    RouteTable::new(default_routes(config.pages_dir.as_deref()))
}

/// Mount `table` into `shell` at the configured root.
///
/// # Errors
///
/// Returns a [`StartupError`] for an invalid root or a failed mount.
pub fn bootstrap(config: &ShellConfig, table: RouteTable, shell: Arc<dyn Shell>) -> Result<Navigator, StartupError> {
    let root = RootHandle::new(&config.root)?;
    let navigator = App::new(table, shell).with_history_mode(config.history_mode).mount(&root)?;
    Ok(navigator)
}
