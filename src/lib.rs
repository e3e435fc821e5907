//! # pageshell
//!
//! Navigation core for a desktop application shell. A static route table
//! maps paths to pages that are loaded lazily on first navigation and cached
//! for the rest of the session. The latest navigation always wins: a slow
//! page load that finishes after a newer navigation is discarded.
//!
//! Startup is `config` -> `app::default_table` -> `app::bootstrap`
//! (one-shot mount) -> `Navigator`. The binary drives the navigator from stdin and draws into
//! a `TerminalShell`.

pub mod app;
pub mod command;
pub mod config;
pub mod history;
pub mod loader;
pub mod navigator;
pub mod page;
pub mod pages;
pub mod route;
pub mod shell;
pub mod sidebar;

pub use app::{App, StartupError, bootstrap, default_table};
pub use navigator::{NavError, Navigation, Navigator};
pub use page::{Page, PageModule, PageView};
pub use route::{Route, RouteTable};
pub use shell::{Shell, TerminalShell};
