//! Page contract: what the navigator gets back from a loader.
//!
//! DESIGN
//! ======
//! Pages are opaque collaborators. The only thing the shell needs from one
//! is "produce a renderable view given no arguments", so the trait has a
//! single method. A loaded page is shared as `PageModule` (`Arc<dyn Page>`)
//! so every waiter on the same load holds the same instance.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

/// Shared handle to a loaded page.
pub type PageModule = Arc<dyn Page>;

/// A page that can render itself.
pub trait Page: Send + Sync + fmt::Debug {
    /// Produce the view for this page.
    fn render(&self) -> PageView;
}

// =============================================================================
// PAGE VIEW
// =============================================================================

/// Rendered output of a page: a title and body lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
}

impl PageView {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), body: Vec::new() }
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }
}

// =============================================================================
// STATIC PAGE
// =============================================================================

/// A page whose view is fixed at construction. Backs both the built-in
/// pages and pages loaded from manifest files.
#[derive(Debug, Clone)]
pub struct StaticPage {
    view: PageView,
}

impl StaticPage {
    #[must_use]
    pub fn new(view: PageView) -> Self {
        Self { view }
    }

    /// Wrap into a shareable module handle.
    #[must_use]
    pub fn into_module(self) -> PageModule {
        Arc::new(self)
    }
}

impl Page for StaticPage {
    fn render(&self) -> PageView {
        self.view.clone()
    }
}

/// On-disk format of a file-backed page: `{"title": "...", "body": [...]}`.
pub type PageManifest = PageView;

/// Fallback view shown when a path matches no route.
#[must_use]
pub fn not_found_view(path: &str) -> PageView {
    PageView::new("Page not found").line(format!("No page is registered at {path}."))
}
