//! Built-in pages and the application's route list.
//!
//! Each page is produced on first navigation. With a pages directory
//! configured, the same routes read `<dir>/<name>.json` instead.

use std::path::Path;
use std::sync::Arc;

use crate::loader::FileLoader;
use crate::page::{PageView, StaticPage};
use crate::route::Route;

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;

/// `(path, name)` of every registered page, in sidebar order.
pub const ROUTES: &[(&str, &str)] = &[
    ("/", "home"),
    ("/chat", "chat"),
    ("/calendar", "calendar"),
    ("/phone", "phone"),
    ("/template", "template"),
    ("/settings", "settings"),
];

/// Built-in view for a registered page name.
#[must_use]
pub fn builtin_view(name: &str) -> Option<PageView> {
    let view = match name {
        "home" => PageView::new("Home").line("Welcome back."),
        "chat" => PageView::new("Chat").line("No conversations yet."),
        "calendar" => PageView::new("Calendar").line("Nothing scheduled."),
        "phone" => PageView::new("Phone").line("No recent calls."),
        "template" => PageView::new("Template").line("Pick a template to start from."),
        "settings" => PageView::new("Settings"),
        _ => return None,
    };
    Some(view)
}

/// The application's routes. Built-in pages unless `pages_dir` is given.
#[must_use]
pub fn default_routes(pages_dir: Option<&Path>) -> Vec<Route> {
    ROUTES
        .iter()
        .map(|&(path, name)| match pages_dir {
            Some(dir) => Route::new(path, name, Arc::new(FileLoader::in_dir(dir, name))),
            None => builtin_route(path, name),
        })
        .collect()
}

fn builtin_route(path: &str, name: &'static str) -> Route {
    Route::lazy(path, name, move || async move {
        let view = builtin_view(name).unwrap_or_else(|| PageView::new(name));
        Ok(StaticPage::new(view).into_module())
    })
}
