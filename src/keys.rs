use crate::app::{App, PanDirection};
use crate::state::messages::LoaderRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    loader_requests: &mpsc::Sender<LoaderRequest>,
) {
    let mut guard = app.lock().await;
    guard.state.notice = None;

    match (key_event.code, key_event.modifiers) {
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Zoom
        (Char('+') | Char('='), _) => guard.zoom_in(),
        (Char('-'), _) => guard.zoom_out(),
        (Char('0'), _) => guard.reset_zoom(),
        (Char('f'), _) => guard.fit(),

        // Pan
        (Char('h') | KeyCode::Left, _) => guard.pan(PanDirection::Left),
        (Char('l') | KeyCode::Right, _) => guard.pan(PanDirection::Right),
        (Char('k') | KeyCode::Up, _) => guard.pan(PanDirection::Up),
        (Char('j') | KeyCode::Down, _) => guard.pan(PanDirection::Down),

        (Char('e'), _) => {
            guard.export_snapshot();
        }
        (Char('r'), _) => {
            drop(guard);
            let _ = loader_requests.send(LoaderRequest::Load).await;
        }
        (Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
