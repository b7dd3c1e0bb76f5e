use tui::layout::{Constraint, Layout, Rect, Size};

pub const HEADER_HEIGHT: u16 = 1;
pub const STATUS_HEIGHT: u16 = 1;
pub const LOG_PANE_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: Rect,
    pub canvas: Rect,
    /// Zero-sized unless the log pane is open.
    pub logs: Rect,
    pub status: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false)
    }

    pub fn update(&mut self, area: Rect, show_logs: bool) {
        *self = Self::from_rect(area, show_logs);
    }

    fn from_rect(area: Rect, show_logs: bool) -> Self {
        let log_height = if show_logs { LOG_PANE_HEIGHT } else { 0 };
        let [header, canvas, logs, status] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(log_height),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);

        LayoutAreas { header, canvas, logs, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_takes_remaining_rows() {
        let areas = LayoutAreas::new(Size::new(80, 24));
        assert_eq!(areas.header, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.canvas, Rect::new(0, 1, 80, 22));
        assert_eq!(areas.logs.height, 0);
        assert_eq!(areas.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_log_pane_shrinks_canvas() {
        let mut areas = LayoutAreas::new(Size::new(80, 24));
        areas.update(Rect::new(0, 0, 80, 24), true);
        assert_eq!(areas.canvas.height, 22 - LOG_PANE_HEIGHT);
        assert_eq!(areas.logs, Rect::new(0, 1 + 22 - LOG_PANE_HEIGHT, 80, LOG_PANE_HEIGHT));
    }
}
