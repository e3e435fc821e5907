use super::*;
use crate::loader::test_helpers::static_route;
use crate::route::RouteTable;

fn terminal() -> TerminalShell<Vec<u8>> {
    let table = RouteTable::new(vec![
        static_route("/", "home"),
        static_route("/chat", "chat"),
        static_route("/settings", "settings"),
    ])
    .unwrap();
    TerminalShell::new(Vec::new(), Sidebar::from_table(&table), WindowSize { width: 800, height: 720 })
}

fn output(shell: TerminalShell<Vec<u8>>) -> String {
    String::from_utf8(shell.into_inner()).unwrap()
}

// =============================================================================
// RootHandle
// =============================================================================

#[test]
fn root_handle_accepts_id_selector() {
    let root = RootHandle::new("#app").unwrap();
    assert_eq!(root.selector(), "#app");
    assert_eq!(root.id(), "app");
}

#[test]
fn root_handle_rejects_bad_selectors() {
    for bad in ["", "#", "app", ".app", "#my app"] {
        let err = RootHandle::new(bad).unwrap_err();
        assert!(matches!(err, ShellError::InvalidRoot(_)), "accepted {bad:?}");
    }
}

#[test]
fn default_resources_include_stylesheet_and_fonts() {
    let resources = default_resources();
    assert_eq!(resources[0], Resource::stylesheet("style.css"));
    let fonts = resources.iter().filter(|r| r.kind == ResourceKind::Font).count();
    assert_eq!(fonts, 3);
}

// =============================================================================
// TerminalShell
// =============================================================================

#[test]
fn terminal_mount_writes_banner() {
    let shell = terminal();
    shell.mount(&RootHandle::new("#app").unwrap(), &default_resources()).unwrap();
    assert_eq!(output(shell), "pageshell 800x720 mounted at #app\n");
}

#[test]
fn terminal_mount_rejects_empty_resource() {
    let shell = terminal();
    let err = shell.mount(&RootHandle::new("#app").unwrap(), &[Resource::font("")]).unwrap_err();
    assert!(matches!(err, ShellError::Mount(_)));
}

#[test]
fn terminal_render_highlights_route_and_prints_view() {
    let shell = terminal();
    let route = static_route("/chat", "chat");
    shell.render(&route, &PageView::new("Chat").line("No conversations yet."));
    assert_eq!(output(shell), "H [C] | S\n== Chat ==\nNo conversations yet.\n");
}

#[test]
fn terminal_fallback_clears_highlight() {
    let shell = terminal();
    shell.render(&static_route("/chat", "chat"), &PageView::new("Chat"));
    shell.render_fallback("/missing", &PageView::new("Page not found"));
    let text = output(shell);
    assert!(text.ends_with("H C | S\n== Page not found ==\n"));
}

#[test]
fn terminal_fallback_after_render_shows_no_active_item() {
    let shell = terminal();
    shell.render(&static_route("/chat", "chat"), &PageView::new("Chat"));
    shell.render_fallback("/missing", &PageView::new("Page not found"));
    assert!(shell.sidebar().active().is_none());
    assert_eq!(output(shell), "H [C] | S\n== Chat ==\nH C | S\n== Page not found ==\n");
}

#[test]
fn terminal_path_of_does_not_move_highlight() {
    let shell = terminal();
    shell.render(&static_route("/", "home"), &PageView::new("Home"));
    assert_eq!(shell.path_of("settings").as_deref(), Some("/settings"));
    assert!(shell.path_of("phone").is_none());
    assert_eq!(shell.sidebar().active().unwrap().route, "home");
    shell.toggle_sidebar();
    assert!(output(shell).ends_with("[Home] Chat | Settings\n"));
}

/// Writer that accepts bytes but cannot flush.
struct NoFlush(Vec<u8>);

impl Write for NoFlush {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::other("closed"))
    }
}

#[test]
fn terminal_flush_failure_is_not_fatal() {
    let table = RouteTable::new(vec![static_route("/", "home")]).unwrap();
    let shell = TerminalShell::new(NoFlush(Vec::new()), Sidebar::from_table(&table), WindowSize { width: 800, height: 720 });
    shell.render(&static_route("/", "home"), &PageView::new("Home"));
    shell.report_error(&NavError::NotFound { path: "/x".into() });
    let text = String::from_utf8(shell.into_inner().0).unwrap();
    assert_eq!(text, "[H] | \n== Home ==\n!! no route matches '/x'\n");
}

#[test]
fn terminal_report_error_prints_message() {
    let shell = terminal();
    shell.report_error(&NavError::NotFound { path: "/x".into() });
    assert_eq!(output(shell), "!! no route matches '/x'\n");
}
