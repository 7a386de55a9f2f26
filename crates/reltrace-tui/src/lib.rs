pub mod app;
pub mod database;
pub mod event;
pub mod execution;
pub mod progress;
pub mod theme;
pub mod widgets;
pub mod wizard;

use std::io;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;

use reltrace_core::config::AppConfig;
use reltrace_core::dump::DumpConfig;
use reltrace_core::engine::{DumpEngine, DumpReport};
use reltrace_core::error::ReltraceResult;

use app::{App, AppCommand};
use event::{EventHandler, TuiEvent};

/// Launch the TUI. This is the entry point called from the CLI.
///
/// Returns the configuration the engine accepted, or `None` when the user
/// quit first or the engine rejected it.
pub async fn launch_tui(
    config: AppConfig,
    engine: Arc<dyn DumpEngine>,
) -> anyhow::Result<Option<DumpConfig>> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, engine).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    engine: Arc<dyn DumpEngine>,
) -> anyhow::Result<Option<DumpConfig>> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(std::time::Duration::from_millis(100));

    let mut result_rx: Option<tokio::sync::mpsc::UnboundedReceiver<ReltraceResult<DumpReport>>> =
        None;
    let mut task_handle: Option<tokio::task::JoinHandle<()>> = None;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    break;
                };
                if let TuiEvent::Resize(w, h) = event {
                    tracing::debug!(width = w, height = h, "Terminal resized");
                }
                if let AppCommand::Execute(dump) = app.handle_event(event) {
                    let (rx, handle) = execution::spawn_execution(engine.clone(), *dump);
                    result_rx = Some(rx);
                    task_handle = Some(handle);
                }
            }
            Some(result) = async {
                match result_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                result_rx = None;
                task_handle = None;
                app.finish_execution(result);
            }
        }
    }

    if let Some(handle) = task_handle.take() {
        tracing::info!("Cancelling dump engine task");
        handle.abort();
    }

    Ok(app.accepted_config().cloned())
}
