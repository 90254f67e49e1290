use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval};
use tracing::{info, warn};

use surimon::adapters::ReqwestHttpClient;
use surimon::app::{App, AppMessage};
use surimon::cli::{parse_args, CliCommand, USAGE, VERSION};
use surimon::config::DashConfig;
use surimon::control::{edit_in_editor, EditTarget};
use surimon::logging::init_logging;
use surimon::logstream::StreamState;
use surimon::ui;

/// Spinner and redraw cadence
const TICK: Duration = Duration::from_millis(100);

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    // Handle flags that exit before any initialization
    let overrides = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("surimon {}", VERSION);
            std::process::exit(0);
        }
        CliCommand::Help => {
            println!("surimon {}\n\n{}", VERSION, USAGE);
            std::process::exit(0);
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
        CliCommand::RunTui(overrides) => overrides,
    };

    color_eyre::install()?;

    let config = DashConfig::from_env()?.apply_overrides(&overrides);
    config.validate()?;

    // A dashboard without a log file is still usable
    if let Err(e) = init_logging(&config) {
        eprintln!("warning: could not open log file {}: {}", config.log_path().display(), e);
    }

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Arc::new(ReqwestHttpClient::new()));

    // Main event loop
    let result = runtime.block_on(run_app(&mut terminal, &mut app));

    restore_terminal(&mut terminal)?;
    info!("surimon exiting");

    result
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Give the terminal to the editor, then take it back.
fn run_editor_suspended(terminal: &mut Tui, target: &EditTarget) -> Result<io::Result<Option<EditTarget>>> {
    restore_terminal(terminal)?;
    let edited = tokio::task::block_in_place(|| edit_in_editor(target));
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;
    Ok(edited)
}

async fn next_refresh(refresh: &mut Option<Interval>) {
    match refresh {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    // Create async event stream for keyboard input
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    let mut refresh = app
        .config
        .refresh_interval
        .map(|every| tokio::time::interval_at(Instant::now() + every, every));

    app.start();

    loop {
        // Draw the UI only when needed
        if app.needs_redraw {
            terminal.draw(|f| {
                ui::render(f, &mut *app);
            })?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(TICK);

        tokio::select! {
            _ = timeout => {
                app.tick();
                if matches!(app.log_stream.state(), StreamState::Connecting(_)) {
                    app.mark_dirty();
                }
            }

            _ = next_refresh(&mut refresh) => {
                app.refresh_charts();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => warn!("terminal event error: {}", e),
                    None => app.quit(),
                }
            }

            // Handle async messages from background tasks
            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if let Some(target) = app.take_pending_edit() {
            // The event stream would compete with the editor for stdin
            drop(event_stream);
            let edited = run_editor_suspended(terminal, &target)?;
            event_stream = EventStream::new();
            app.finish_edit(&target, edited);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
