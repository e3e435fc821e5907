use std::process::ExitCode;
use std::sync::Arc;

use futures::FutureExt;
use futures::StreamExt;
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use pageshell::command::Command;
use pageshell::config::ShellConfig;
use pageshell::sidebar::Sidebar;
use pageshell::{NavError, Navigation, Navigator, StartupError, TerminalShell, bootstrap, default_table};

type Pending<'a> = FuturesUnordered<LocalBoxFuture<'a, Result<Navigation, NavError>>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "pageshell failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ShellConfig::from_env()?;
    let table = default_table(&config)?;
    let sidebar = Sidebar::from_table(&table);
    let shell = Arc::new(TerminalShell::new(std::io::stdout(), sidebar, config.window));
    let navigator = bootstrap(&config, table, shell.clone())?;

    let mut pending: Pending<'_> = FuturesUnordered::new();
    pending.push(navigator.navigate(&config.start_path).boxed_local());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin read failed");
                        break;
                    }
                };
                let Some(command) = Command::parse(&line) else { continue };
                if !dispatch(command, &navigator, &shell, &mut pending) {
                    break;
                }
            }
            Some(outcome) = pending.next(), if !pending.is_empty() => log_outcome(outcome),
        }
    }

    while let Some(outcome) = pending.next().await {
        log_outcome(outcome);
    }
    tracing::info!("pageshell closed");
    Ok(())
}

/// Queue the navigation for `command`. Returns false on quit.
fn dispatch<'a>(
    command: Command,
    navigator: &'a Navigator,
    shell: &TerminalShell<std::io::Stdout>,
    pending: &mut Pending<'a>,
) -> bool {
    match command {
        Command::Navigate(path) => pending.push(navigator.navigate(&path).boxed_local()),
        Command::Select(name) => match shell.path_of(&name) {
            Some(path) => pending.push(navigator.navigate(&path).boxed_local()),
            None => tracing::warn!(route = %name, "no sidebar item for route"),
        },
        Command::Back => match navigator.back() {
            Some(nav) => pending.push(nav.boxed_local()),
            None => tracing::debug!("already at the oldest history entry"),
        },
        Command::Forward => match navigator.forward() {
            Some(nav) => pending.push(nav.boxed_local()),
            None => tracing::debug!("already at the newest history entry"),
        },
        Command::Toggle => shell.toggle_sidebar(),
        Command::Quit => return false,
    }
    true
}

fn log_outcome(outcome: Result<Navigation, NavError>) {
    match outcome {
        Ok(Navigation::Rendered { path, route }) => tracing::debug!(%path, %route, "rendered"),
        Ok(Navigation::Unchanged { path }) => tracing::debug!(%path, "already showing"),
        Ok(Navigation::Superseded { path }) => tracing::debug!(%path, "superseded"),
        Err(e) => tracing::warn!(code = e.error_code(), error = %e, "navigation failed"),
    }
}
