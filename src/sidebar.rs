//! Sidebar navigation model.
//!
//! One item per route, split into a top group and a bottom group (settings
//! sits at the bottom). Exactly one item is active at a time. The sidebar
//! collapses to an icon strip and expands to show labels.

use serde::Serialize;

use crate::route::RouteTable;

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod tests;

pub const COLLAPSED_WIDTH: u32 = 60;
pub const EXPANDED_WIDTH: u32 = 200;
pub const COLLAPSED_DIVIDER_WIDTH: u32 = 40;
pub const EXPANDED_DIVIDER_WIDTH: u32 = 180;

/// Route names placed in the bottom group.
const BOTTOM_ROUTES: &[&str] = &["settings"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub route: String,
    pub path: String,
    pub placement: Placement,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    items: Vec<NavItem>,
    active: Option<String>,
    expanded: bool,
}

impl Sidebar {
    #[must_use]
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items, active: None, expanded: false }
    }

    /// One item per route, labelled with the capitalized route name.
    #[must_use]
    pub fn from_table(table: &RouteTable) -> Self {
        let items = table
            .iter()
            .map(|route| NavItem {
                label: capitalize(route.name()),
                route: route.name().to_string(),
                path: route.path().to_string(),
                placement: if BOTTOM_ROUTES.contains(&route.name()) { Placement::Bottom } else { Placement::Top },
            })
            .collect();
        Self::new(items)
    }

    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    #[must_use]
    pub fn active(&self) -> Option<&NavItem> {
        let active = self.active.as_deref()?;
        self.items.iter().find(|item| item.route == active)
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip between collapsed and expanded; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        if self.expanded { EXPANDED_WIDTH } else { COLLAPSED_WIDTH }
    }

    #[must_use]
    pub fn divider_width(&self) -> u32 {
        if self.expanded { EXPANDED_DIVIDER_WIDTH } else { COLLAPSED_DIVIDER_WIDTH }
    }

    /// Path behind the item for `route`. The highlight only moves once
    /// that page is rendered.
    #[must_use]
    pub fn path_of(&self, route: &str) -> Option<&str> {
        self.items.iter().find(|item| item.route == route).map(|item| item.path.as_str())
    }

    /// Sync the active item with the rendered route. `None` (a fallback
    /// page) or a route without an item clears the highlight.
    pub fn activate(&mut self, route: Option<&str>) {
        self.active = route.filter(|&r| self.items.iter().any(|item| item.route == r)).map(str::to_string);
    }

    /// Text rendering: `[Label]` marks the active item, `|` separates the
    /// groups. Collapsed sidebars show initials only.
    #[must_use]
    pub fn render_line(&self) -> String {
        let render_group = |placement: Placement| {
            self.items
                .iter()
                .filter(|item| item.placement == placement)
                .map(|item| {
                    let text = if self.expanded { item.label.clone() } else { item.label.chars().take(1).collect() };
                    if self.active.as_deref() == Some(item.route.as_str()) { format!("[{text}]") } else { text }
                })
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!("{} | {}", render_group(Placement::Top), render_group(Placement::Bottom))
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
