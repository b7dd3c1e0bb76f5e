mod app;
mod components;
mod draw;
mod keys;
mod mouse;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::{AppSettings, DataSource};
use crate::state::loader::{LoaderWorker, LoadingState};
use crate::state::messages::{LoaderRequest, LoaderResponse, UiEvent};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::{cursor, execute, terminal};
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(cli_path) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let settings = AppSettings::load(cli_path);

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let level = settings.log_level.unwrap_or(log::LevelFilter::Info);
    tui_logger::init_logger(level)?;
    tui_logger::set_default_level(level);

    let source = settings.source.clone();
    let refresh_every = settings.refresh_every;
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (loader_req_tx, loader_req_rx) = mpsc::channel::<LoaderRequest>(100);
    let (loader_resp_tx, loader_resp_rx) = mpsc::channel::<LoaderResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Loader thread
    let loader_worker = LoaderWorker::new(source.clone(), loader_req_rx, loader_resp_tx);
    let loader_task = tokio::spawn(loader_worker.run());

    // Periodic reload thread, only for files that can change underneath us
    let periodic_task = match (&source, refresh_every) {
        (DataSource::File(_), Some(every)) => {
            let refresher = PeriodicRefresher::new(loader_req_tx.clone(), every);
            Some(tokio::spawn(refresher.run()))
        }
        _ => None,
    };

    // Trigger the first load
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, loader_req_tx, loader_resp_rx).await;

    input_handler.abort();
    loader_task.abort();
    if let Some(task) = periodic_task {
        task.abort();
    }

    Ok(())
}

/// Returns the optional bracket path, or `None` when the process should exit
/// right away (help / version printed).
fn handle_cli_args() -> Option<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Some(None);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            None
        }
        "-V" | "--version" => {
            println!("bracketview {}", env!("CARGO_PKG_VERSION"));
            None
        }
        flag if flag.starts_with('-') => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
        _ => {
            if let Some(extra) = args.next() {
                eprintln!("Unexpected argument: {extra}\n\n{}", usage_text());
                std::process::exit(2);
            }
            Some(Some(PathBuf::from(arg)))
        }
    }
}

fn usage_text() -> &'static str {
    "bracketview - tournament bracket viewer for the terminal

Usage:
  bracketview [PATH]
  bracketview --help
  bracketview --version

Without PATH a built-in sample bracket is shown.

Environment:
  BRACKETVIEW_JSON           Path to tournament JSON (PATH takes precedence)
  BRACKETVIEW_EXPORT         Where `e` writes the layout snapshot (default bracket_snapshot.json)
  BRACKETVIEW_LOG            Log level: error, warn, info, debug, trace
  BRACKETVIEW_REFRESH_SECS   Reload period for PATH in seconds, 0 disables (default 30)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    loader_requests: mpsc::Sender<LoaderRequest>,
    mut loader_responses: mpsc::Receiver<LoaderResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &loader_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = loader_responses.recv() => {
                handle_loader_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    loader_requests: &mpsc::Sender<LoaderRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = loader_requests.send(LoaderRequest::Load).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, loader_requests).await;
            true
        }
        UiEvent::Mouse(mouse_event) => mouse::handle_mouse_event(mouse_event, app).await,
        UiEvent::Resize => true,
    }
}

async fn handle_loader_response(
    response: LoaderResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) {
    match response {
        LoaderResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        LoaderResponse::TournamentLoaded { data, source } => {
            let mut guard = app.lock().await;
            guard.on_tournament_loaded(data, source);
        }
        LoaderResponse::Error { message } => {
            let mut guard = app.lock().await;
            guard.on_load_error(message);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let Ok(event) = tokio::task::spawn_blocking(crossterm_event::read).await else {
            break;
        };
        if let Ok(event) = event {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Mouse(mouse_event) => Some(UiEvent::Mouse(mouse_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, EnableMouseCapture)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Best effort; also runs from the panic hook, so failures are ignored.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, DisableMouseCapture);
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
