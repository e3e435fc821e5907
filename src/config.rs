//! Shell configuration parsed from environment variables.
//!
//! Every variable is optional. Numeric values that are missing or fail to
//! parse fall back to their defaults; an unknown history mode is an error.

use std::path::PathBuf;

use crate::history::HistoryMode;
use crate::route::HOME_PATH;
use crate::shell::WindowSize;

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;
pub const DEFAULT_ROOT: &str = "#app";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown PAGESHELL_HISTORY_MODE: {0} (expected 'web' or 'hash')")]
    InvalidHistoryMode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub window: WindowSize,
    pub history_mode: HistoryMode,
    /// Directory of page manifests; built-in pages when `None`.
    pub pages_dir: Option<PathBuf>,
    pub root: String,
    pub start_path: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window: WindowSize { width: DEFAULT_WINDOW_WIDTH, height: DEFAULT_WINDOW_HEIGHT },
            history_mode: HistoryMode::Web,
            pages_dir: None,
            root: DEFAULT_ROOT.to_string(),
            start_path: HOME_PATH.to_string(),
        }
    }
}

impl ShellConfig {
    /// Build config from environment variables.
    ///
    /// - `PAGESHELL_WINDOW_WIDTH`: default 800
    /// - `PAGESHELL_WINDOW_HEIGHT`: default 720
    /// - `PAGESHELL_HISTORY_MODE`: `web` (default) or `hash`
    /// - `PAGESHELL_PAGES_DIR`: load page manifests from this directory
    /// - `PAGESHELL_ROOT`: root selector, default `#app`
    /// - `PAGESHELL_START_PATH`: first page, default `/`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHistoryMode`] for an unknown mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let history_mode = match std::env::var("PAGESHELL_HISTORY_MODE") {
            Ok(raw) => raw.parse::<HistoryMode>().map_err(ConfigError::InvalidHistoryMode)?,
            Err(_) => HistoryMode::Web,
        };

        Ok(Self {
            window: WindowSize {
                width: env_parse("PAGESHELL_WINDOW_WIDTH", DEFAULT_WINDOW_WIDTH),
                height: env_parse("PAGESHELL_WINDOW_HEIGHT", DEFAULT_WINDOW_HEIGHT),
            },
            history_mode,
            pages_dir: std::env::var_os("PAGESHELL_PAGES_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            root: std::env::var("PAGESHELL_ROOT").unwrap_or_else(|_| DEFAULT_ROOT.to_string()),
            start_path: std::env::var("PAGESHELL_START_PATH").unwrap_or_else(|_| HOME_PATH.to_string()),
        })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
