use crate::state::loader::LoadingState;
use bracket_engine::TournamentData;
use crossterm::event::{KeyEvent, MouseEvent};

#[derive(Debug, Clone)]
pub enum LoaderRequest {
    /// Read the source with the spinner shown (startup and `r`).
    Load,
    /// Re-read the source; unchanged data is dropped by the session cache.
    Reload,
}

#[derive(Debug)]
pub enum LoaderResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TournamentLoaded { data: TournamentData, source: String },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    AppStarted,
}
