use crate::app::App;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Route a mouse event to the viewport. Returns `true` when a redraw is needed.
pub async fn handle_mouse_event(mouse_event: MouseEvent, app: &Arc<Mutex<App>>) -> bool {
    let mut guard = app.lock().await;
    let (col, row) = (mouse_event.column, mouse_event.row);

    match mouse_event.kind {
        MouseEventKind::ScrollUp => guard.wheel(col, row, 1.0),
        MouseEventKind::ScrollDown => guard.wheel(col, row, -1.0),
        MouseEventKind::Moved => guard.hover(col, row),
        MouseEventKind::Down(MouseButton::Left) => {
            guard.state.drag.begin(col, row);
            false
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            guard.drag_to(col, row);
            true
        }
        MouseEventKind::Up(MouseButton::Left) => {
            guard.state.drag.end();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use crossterm::event::KeyModifiers;
    use tui::layout::Rect;

    fn event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    fn app() -> Arc<Mutex<App>> {
        let mut app = App::new(AppSettings::default());
        app.state.canvas = Rect::new(0, 1, 80, 20);
        Arc::new(Mutex::new(app))
    }

    #[tokio::test]
    async fn test_scroll_up_zooms_in() {
        let app = app();
        assert!(handle_mouse_event(event(MouseEventKind::ScrollUp, 5, 5), &app).await);
        assert!(app.lock().await.state.session.viewport().scale > 1.0);
        assert!(handle_mouse_event(event(MouseEventKind::ScrollDown, 5, 5), &app).await);
        assert!((app.lock().await.state.session.viewport().scale - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_left_drag_pans() {
        let app = app();
        handle_mouse_event(event(MouseEventKind::Down(MouseButton::Left), 10, 10), &app).await;
        handle_mouse_event(event(MouseEventKind::Drag(MouseButton::Left), 13, 10), &app).await;
        handle_mouse_event(event(MouseEventKind::Up(MouseButton::Left), 13, 10), &app).await;
        // Further drags without a press are ignored.
        handle_mouse_event(event(MouseEventKind::Drag(MouseButton::Left), 20, 10), &app).await;

        let guard = app.lock().await;
        assert_eq!(guard.state.session.viewport().offset.x, 24.0);
        assert_eq!(guard.state.session.viewport().offset.y, 50.0);
    }
}
