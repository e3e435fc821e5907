//! Browser-style history stack.
//!
//! Entries are route paths. In `Web` mode the location bar shows the clean
//! path (`/chat`); in `Hash` mode it shows a fragment (`#/chat`). Pushing
//! after going back drops the forward entries, the same way a browser does.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    #[default]
    Web,
    Hash,
}

impl FromStr for HistoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Self::Web),
            "hash" => Ok(Self::Hash),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Web => f.write_str("web"),
            Self::Hash => f.write_str("hash"),
        }
    }
}

/// Extract the route path from a location string.
///
/// Accepts clean paths and `#/...` fragments, and drops any query string or
/// trailing fragment. An empty location is the root.
#[must_use]
pub fn parse_location(location: &str) -> String {
    let raw = location.strip_prefix('#').unwrap_or(location);
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

// =============================================================================
// HISTORY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    mode: HistoryMode,
    entries: Vec<String>,
    index: usize,
}

impl History {
    #[must_use]
    pub fn new(mode: HistoryMode) -> Self {
        Self { mode, entries: Vec::new(), index: 0 }
    }

    #[must_use]
    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    /// Location bar text for the current entry.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.current().map(|path| match self.mode {
            HistoryMode::Web => path.to_string(),
            HistoryMode::Hash => format!("#{path}"),
        })
    }

    /// Append an entry after the current one, discarding forward entries.
    pub fn push(&mut self, path: impl Into<String>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(path.into());
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the current entry, or push if the stack is empty.
    pub fn replace(&mut self, path: impl Into<String>) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = path.into(),
            None => self.push(path),
        }
    }

    /// Index and path `delta` entries away from the current one.
    #[must_use]
    pub fn peek(&self, delta: isize) -> Option<(usize, &str)> {
        let target = self.index.checked_add_signed(delta)?;
        self.entries.get(target).map(|path| (target, path.as_str()))
    }

    /// Move to `index` if it is still an entry holding `path`.
    ///
    /// Returns false if the stack changed since the index was taken.
    pub fn set_index(&mut self, index: usize, path: &str) -> bool {
        if self.entries.get(index).is_some_and(|entry| entry == path) {
            self.index = index;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.peek(-1).is_some()
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.peek(1).is_some()
    }
}
