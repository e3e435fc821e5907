//! Host shell contract and the terminal shell used by the binary.
//!
//! DESIGN
//! ======
//! The navigator never draws anything itself. It hands rendered views to a
//! `Shell`, which owns the window, the root element, and resource loading.
//! `mount` is called exactly once, by `App::mount`, before any navigation.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::navigator::NavError;
use crate::page::PageView;
use crate::route::Route;
use crate::sidebar::Sidebar;

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The root selector is not a non-empty `#id`.
    #[error("invalid root selector '{0}' (expected '#id')")]
    InvalidRoot(String),

    /// The shell could not attach to the root or load a resource.
    #[error("mount failed: {0}")]
    Mount(String),
}

// =============================================================================
// ROOT HANDLE + RESOURCES
// =============================================================================

/// Element the application is mounted into, e.g. `#app`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHandle {
    selector: String,
}

impl RootHandle {
    /// Parse an id selector.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidRoot`] unless the selector is `#` followed
    /// by at least one character without whitespace.
    pub fn new(selector: &str) -> Result<Self, ShellError> {
        match selector.strip_prefix('#') {
            Some(id) if !id.is_empty() && !id.contains(char::is_whitespace) => {
                Ok(Self { selector: selector.to_string() })
            }
            _ => Err(ShellError::InvalidRoot(selector.to_string())),
        }
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.selector[1..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Stylesheet,
    Font,
}

/// A stylesheet or font asset the shell loads at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub href: String,
}

impl Resource {
    #[must_use]
    pub fn stylesheet(href: &str) -> Self {
        Self { kind: ResourceKind::Stylesheet, href: href.to_string() }
    }

    #[must_use]
    pub fn font(href: &str) -> Self {
        Self { kind: ResourceKind::Font, href: href.to_string() }
    }
}

/// Global stylesheet plus the Inter font weights used by the pages.
#[must_use]
pub fn default_resources() -> Vec<Resource> {
    vec![
        Resource::stylesheet("style.css"),
        Resource::font("@fontsource/inter/400.css"),
        Resource::font("@fontsource/inter/500.css"),
        Resource::font("@fontsource/inter/700.css"),
    ]
}

// =============================================================================
// SHELL TRAIT
// =============================================================================

/// The host window the navigator renders into.
pub trait Shell: Send + Sync {
    /// Attach to `root` and load `resources`. Called once.
    ///
    /// # Errors
    ///
    /// Returns a [`ShellError`] if the shell cannot attach.
    fn mount(&self, root: &RootHandle, resources: &[Resource]) -> Result<(), ShellError>;

    /// Show the page for `route`.
    fn render(&self, route: &Route, view: &PageView);

    /// Show the fallback page for a path that matches no route.
    fn render_fallback(&self, path: &str, view: &PageView);

    /// Default error surface for navigation failures.
    fn report_error(&self, err: &NavError) {
        error!(code = err.error_code(), error = %err, "navigation failed");
    }
}

// =============================================================================
// TERMINAL SHELL
// =============================================================================

/// Window dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Shell that draws pages as text, framed by the sidebar.
pub struct TerminalShell<W> {
    out: Mutex<W>,
    sidebar: Mutex<Sidebar>,
    window: WindowSize,
}

impl<W: Write + Send> TerminalShell<W> {
    pub fn new(out: W, sidebar: Sidebar, window: WindowSize) -> Self {
        Self { out: Mutex::new(out), sidebar: Mutex::new(sidebar), window }
    }

    /// Collapse or expand the sidebar and redraw its line.
    pub fn toggle_sidebar(&self) {
        let line = {
            let mut sidebar = self.sidebar.lock().unwrap_or_else(PoisonError::into_inner);
            let expanded = sidebar.toggle();
            debug!(expanded, width = sidebar.width(), divider = sidebar.divider_width(), "sidebar toggled");
            sidebar.render_line()
        };
        self.write_lines(&[line]);
    }

    /// Path behind the sidebar item for `route`.
    pub fn path_of(&self, route: &str) -> Option<String> {
        let sidebar = self.sidebar.lock().unwrap_or_else(PoisonError::into_inner);
        sidebar.path_of(route).map(str::to_string)
    }

    /// Snapshot of the sidebar as last drawn.
    pub fn sidebar(&self) -> Sidebar {
        self.sidebar.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Consume the shell and return its writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn draw(&self, active: Option<&str>, view: &PageView) {
        let nav = {
            let mut sidebar = self.sidebar.lock().unwrap_or_else(PoisonError::into_inner);
            sidebar.activate(active);
            sidebar.render_line()
        };
        let mut lines = Vec::with_capacity(view.body.len() + 2);
        lines.push(nav);
        lines.push(format!("== {} ==", view.title));
        lines.extend(view.body.iter().cloned());
        self.write_lines(&lines);
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            if let Err(e) = writeln!(out, "{line}") {
                warn!(error = %e, "terminal write failed");
                return;
            }
        }
        if let Err(e) = out.flush() {
            warn!(error = %e, "terminal flush failed");
        }
    }
}

impl<W: Write + Send> Shell for TerminalShell<W> {
    fn mount(&self, root: &RootHandle, resources: &[Resource]) -> Result<(), ShellError> {
        for resource in resources {
            if resource.href.is_empty() {
                return Err(ShellError::Mount("resource with empty href".into()));
            }
        }
        info!(
            root = root.selector(),
            width = self.window.width,
            height = self.window.height,
            resources = resources.len(),
            "terminal shell mounted"
        );
        self.write_lines(&[format!("pageshell {}x{} mounted at {}", self.window.width, self.window.height, root.selector())]);
        Ok(())
    }

    fn render(&self, route: &Route, view: &PageView) {
        self.draw(Some(route.name()), view);
    }

    fn render_fallback(&self, _path: &str, view: &PageView) {
        self.draw(None, view);
    }

    fn report_error(&self, err: &NavError) {
        error!(code = err.error_code(), error = %err, "navigation failed");
        self.write_lines(&[format!("!! {err}")]);
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
