use bracket_engine::{BracketSession, LayoutConfig};
use tui::layout::Rect;

// ---------------------------------------------------------------------------
// Pointer state
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Terminal cell where the current left-button drag was last seen.
    pub last: Option<(u16, u16)>,
}

impl DragState {
    pub fn begin(&mut self, col: u16, row: u16) {
        self.last = Some((col, row));
    }

    /// Move the drag to a new cell, returning the cell delta since the last one.
    pub fn update(&mut self, col: u16, row: u16) -> Option<(i32, i32)> {
        let (last_col, last_row) = self.last?;
        self.last = Some((col, row));
        Some((
            i32::from(col) - i32::from(last_col),
            i32::from(row) - i32::from(last_row),
        ))
    }

    pub fn end(&mut self) {
        self.last = None;
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub session: BracketSession,
    /// Screen area the bracket was last drawn into. Mouse events are mapped
    /// through it, so it is refreshed on every frame.
    pub canvas: Rect,
    /// Fit the tree to the canvas on the next frame (first load).
    pub pending_fit: bool,
    pub drag: DragState,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// One-line notice for the status bar (export result and the like).
    pub notice: Option<String>,
    pub loaded_from: Option<String>,
    pub loaded_at: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: BracketSession::new(LayoutConfig::default()),
            canvas: Rect::ZERO,
            pending_fit: false,
            drag: DragState::default(),
            show_logs: false,
            last_error: None,
            notice: None,
            loaded_from: None,
            loaded_at: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
