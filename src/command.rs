//! Commands read by the terminal driver, one per line.

use crate::history::parse_location;

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a path (`/chat`, `#/chat`, `chat?x=1`).
    Navigate(String),
    /// Click the sidebar item for a route name (`go chat`).
    Select(String),
    Back,
    Forward,
    Toggle,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let cmd = match line {
            "back" => Self::Back,
            "forward" => Self::Forward,
            "toggle" => Self::Toggle,
            "quit" | "exit" => Self::Quit,
            _ => match line.strip_prefix("go ") {
                Some(name) => Self::Select(name.trim().to_string()),
                None => Self::Navigate(parse_location(line)),
            },
        };
        Some(cmd)
    }
}
