use crate::components::bracket::{CELL_PX_H, CELL_PX_W, canvas_size_px, cell_center_px};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use bracket_engine::TournamentData;
use chrono::Local;
use log::{error, info, warn};

/// Padding around the tree when fitting it to the canvas, in pixels.
pub const FIT_PADDING: f64 = 16.0;
/// Padding added around card extents in an exported snapshot.
pub const EXPORT_PADDING: f64 = 50.0;
/// Columns / rows moved per arrow key press.
const PAN_STEP_COLS: f64 = 4.0;
const PAN_STEP_ROWS: f64 = 2.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        Self { state: AppState::new(), settings }
    }

    // -----------------------------------------------------------------------
    // Loader response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_tournament_loaded(&mut self, data: TournamentData, source: String) {
        self.state.last_error = None;
        let first_load = self.state.session.data().is_none();
        if self.state.session.load(data) {
            info!(
                "laid out {} cards in {} rounds from {source}",
                self.state.session.positions().len(),
                self.state.session.headers().len()
            );
            self.state.loaded_at = Some(Local::now().format("%H:%M").to_string());
        }
        if first_load {
            self.state.pending_fit = true;
        }
        self.state.loaded_from = Some(source);
    }

    pub fn on_load_error(&mut self, message: String) {
        error!("Load error: {message}");
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Viewport — keys and mouse both end up here
    // -----------------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.state.session.viewport_mut().zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.state.session.viewport_mut().zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.state.session.viewport_mut().reset_zoom();
    }

    pub fn fit(&mut self) {
        let (width, height) = canvas_size_px(self.state.canvas);
        if width <= 2.0 * FIT_PADDING || height <= 2.0 * FIT_PADDING {
            // No room inside the padding, or nothing drawn yet.
            self.state.pending_fit = true;
            return;
        }
        self.state.session.fit(width, height, FIT_PADDING);
        self.state.pending_fit = false;
    }

    /// Move the camera one step; the tree moves the other way.
    pub fn pan(&mut self, direction: PanDirection) {
        let (dx, dy) = match direction {
            PanDirection::Left => (PAN_STEP_COLS * CELL_PX_W, 0.0),
            PanDirection::Right => (-PAN_STEP_COLS * CELL_PX_W, 0.0),
            PanDirection::Up => (0.0, PAN_STEP_ROWS * CELL_PX_H),
            PanDirection::Down => (0.0, -PAN_STEP_ROWS * CELL_PX_H),
        };
        self.state.session.viewport_mut().pan_by(dx, dy);
    }

    pub fn drag_to(&mut self, col: u16, row: u16) {
        if let Some((dcol, drow)) = self.state.drag.update(col, row) {
            self.state
                .session
                .viewport_mut()
                .pan_by(f64::from(dcol) * CELL_PX_W, f64::from(drow) * CELL_PX_H);
        }
    }

    /// Wheel notch over a terminal cell. Positive `delta_y` zooms in.
    pub fn wheel(&mut self, col: u16, row: u16, delta_y: f64) -> bool {
        let Some(pointer) = cell_center_px(self.state.canvas, col, row) else {
            return false;
        };
        self.state.session.wheel_at(pointer, delta_y);
        // Wheel events may come from a cell no move event reported.
        self.state.session.hover_at(pointer);
        true
    }

    /// Pointer moved; returns `true` when the highlight changed.
    pub fn hover(&mut self, col: u16, row: u16) -> bool {
        match cell_center_px(self.state.canvas, col, row) {
            Some(pointer) => self.state.session.hover_at(pointer),
            None if self.state.session.hovered().is_some() => {
                self.state.session.clear_highlight();
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Write the layout snapshot to the export path. The outcome is logged and
    /// shown as the status-bar notice.
    pub fn export_snapshot(&mut self) {
        let path = self.settings.export_path.clone();
        let result = serde_json::to_string_pretty(&self.state.session.snapshot(EXPORT_PADDING))
            .map_err(|e| format!("Failed to serialize snapshot: {e}"))
            .and_then(|json| {
                std::fs::write(&path, json)
                    .map_err(|e| format!("Failed to write {}: {e}", path.display()))
            });

        match result {
            Ok(()) => {
                info!("exported layout snapshot to {}", path.display());
                self.state.notice = Some(format!("exported to {}", path.display()));
            }
            Err(message) => {
                warn!("{message}");
                self.state.notice = Some(message);
            }
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }
}
