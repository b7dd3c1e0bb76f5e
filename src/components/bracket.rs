use std::collections::BTreeMap;

use bracket_engine::{BracketSession, CardPosition, Match, MatchStatus, Point, Viewport, draw_order};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::widgets::Widget;

use crate::components::theme::{Theme, ThemeColor, resolve};

// ---------------------------------------------------------------------------
// Cell metric — terminal cells <-> engine pixels
// ---------------------------------------------------------------------------

/// Pixels covered by one terminal column.
pub const CELL_PX_W: f64 = 8.0;
/// Pixels covered by one terminal row. Cells are roughly twice as tall as wide.
pub const CELL_PX_H: f64 = 16.0;

/// Tree-space y of the round header row (the default viewport offset leaves
/// room for it above the first card).
const HEADER_TREE_Y: f64 = 0.0;

/// Canvas size in engine pixels.
pub fn canvas_size_px(canvas: Rect) -> (f64, f64) {
    (
        f64::from(canvas.width) * CELL_PX_W,
        f64::from(canvas.height) * CELL_PX_H,
    )
}

/// Screen-pixel position (relative to the canvas) of the center of a terminal
/// cell. `None` when the cell lies outside the canvas.
pub fn cell_center_px(canvas: Rect, col: u16, row: u16) -> Option<Point> {
    if col < canvas.x || row < canvas.y || col >= canvas.right() || row >= canvas.bottom() {
        return None;
    }
    Some(Point::new(
        (f64::from(col - canvas.x) + 0.5) * CELL_PX_W,
        (f64::from(row - canvas.y) + 0.5) * CELL_PX_H,
    ))
}

/// Absolute terminal cell of a tree-space point.
fn project(viewport: &Viewport, canvas: Rect, point: Point) -> (i32, i32) {
    let screen = viewport.tree_to_screen(point);
    (
        i32::from(canvas.x) + (screen.x / CELL_PX_W).floor() as i32,
        i32::from(canvas.y) + (screen.y / CELL_PX_H).floor() as i32,
    )
}

// ---------------------------------------------------------------------------
// Box-drawing glyphs as arm masks
// ---------------------------------------------------------------------------

const UP: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const RIGHT: u8 = 8;

fn glyph(arms: u8) -> char {
    match arms {
        0 => ' ',
        a if a & (UP | DOWN) == 0 => '─',
        a if a & (LEFT | RIGHT) == 0 => '│',
        a if a == DOWN | RIGHT => '┌',
        a if a == DOWN | LEFT => '┐',
        a if a == UP | RIGHT => '└',
        a if a == UP | LEFT => '┘',
        a if a == UP | DOWN | RIGHT => '├',
        a if a == UP | DOWN | LEFT => '┤',
        a if a == LEFT | RIGHT | DOWN => '┬',
        a if a == LEFT | RIGHT | UP => '┴',
        _ => '┼',
    }
}

fn arms(ch: char) -> u8 {
    match ch {
        '─' => LEFT | RIGHT,
        '│' => UP | DOWN,
        '┌' => DOWN | RIGHT,
        '┐' => DOWN | LEFT,
        '└' => UP | RIGHT,
        '┘' => UP | LEFT,
        '├' => UP | DOWN | RIGHT,
        '┤' => UP | DOWN | LEFT,
        '┬' => LEFT | RIGHT | DOWN,
        '┴' => LEFT | RIGHT | UP,
        '┼' => UP | DOWN | LEFT | RIGHT,
        _ => 0,
    }
}

/// Rasterize a cell-space polyline into box-drawing arms per cell.
///
/// Shared vertices pick up the arms of both segments, so an elbow's turns come
/// out as corner glyphs. Diagonal segments are drawn horizontal-then-vertical.
fn rasterize_polyline(vertices: &[(i32, i32)]) -> BTreeMap<(i32, i32), u8> {
    let mut cells = BTreeMap::new();
    for pair in vertices.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let corner = (b.0, a.1);
        rasterize_segment(&mut cells, a, corner);
        rasterize_segment(&mut cells, corner, b);
    }
    cells
}

fn rasterize_segment(cells: &mut BTreeMap<(i32, i32), u8>, a: (i32, i32), b: (i32, i32)) {
    if a == b {
        return;
    }
    let (forward, backward) = if a.1 == b.1 {
        if b.0 > a.0 { (RIGHT, LEFT) } else { (LEFT, RIGHT) }
    } else if b.1 > a.1 {
        (DOWN, UP)
    } else {
        (UP, DOWN)
    };
    let (dx, dy) = ((b.0 - a.0).signum(), (b.1 - a.1).signum());
    let mut cell = a;
    loop {
        let mut mask = 0;
        if cell != a {
            mask |= backward;
        }
        if cell != b {
            mask |= forward;
        }
        *cells.entry(cell).or_insert(0) |= mask;
        if cell == b {
            break;
        }
        cell = (cell.0 + dx, cell.1 + dy);
    }
}

// ---------------------------------------------------------------------------
// BracketCanvas widget
// ---------------------------------------------------------------------------

/// Draws the session's layout through its viewport: round headers, then
/// connectors (highlighted ones last), then cards on top.
pub struct BracketCanvas<'a> {
    pub session: &'a BracketSession,
    pub theme: Theme,
}

impl Widget for BracketCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let viewport = self.session.viewport();
        let highlight = self.session.highlight();

        for header in self.session.headers() {
            let (col, row) = project(viewport, area, Point::new(header.x, HEADER_TREE_Y));
            let style = resolve(ThemeColor::Header, self.theme);
            put_str(buf, area, col, row, &header.name, usize::MAX, style);
        }

        for (line, on_path) in draw_order(self.session.connectors(), highlight) {
            let style = if on_path {
                resolve(ThemeColor::Path, self.theme).add_modifier(Modifier::BOLD)
            } else {
                resolve(ThemeColor::Line, self.theme)
            };
            let vertices: Vec<(i32, i32)> =
                line.vertices().map(|p| project(viewport, area, p)).collect();
            for ((col, row), mask) in rasterize_polyline(&vertices) {
                put_arms(buf, area, col, row, mask, style);
            }
        }

        let config = self.session.config();
        for (index, card) in self.session.positions().iter().enumerate() {
            let top_left = project(viewport, area, Point::new(card.x, card.y));
            let bottom_right = project(
                viewport,
                area,
                Point::new(card.right(config), card.y + config.card_height),
            );
            let tone = if self.session.hovered() == Some(index) {
                CardTone::Hovered
            } else if highlight.is_some_and(|h| h.contains(index)) {
                CardTone::OnPath
            } else {
                CardTone::Normal
            };
            draw_card(buf, area, card, top_left, bottom_right, tone, self.theme);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CardTone {
    Normal,
    OnPath,
    Hovered,
}

/// Draw one card into the cell box `[top_left, bottom_right)`.
///
/// Three or more rows get a rounded border with player lines inside; smaller
/// cards collapse to bare text rows so a zoomed-out bracket stays legible.
fn draw_card(
    buf: &mut Buffer,
    area: Rect,
    card: &CardPosition,
    top_left: (i32, i32),
    bottom_right: (i32, i32),
    tone: CardTone,
    theme: Theme,
) {
    let (left, top) = top_left;
    let width = (bottom_right.0 - left).max(1);
    let height = (bottom_right.1 - top).max(1);

    let border = match tone {
        CardTone::Normal => resolve(ThemeColor::Line, theme),
        CardTone::OnPath => resolve(ThemeColor::Path, theme),
        CardTone::Hovered => resolve(ThemeColor::Hovered, theme),
    };

    if height < 3 || width < 4 {
        if height == 1 {
            let text = compact_line(&card.game);
            put_str(buf, area, left, top, &text, width as usize, border);
            return;
        }
        let rows = card_lines(&card.game, theme);
        for (row, (text, style)) in rows.iter().take(height as usize).enumerate() {
            put_str(buf, area, left, top + row as i32, text, width as usize, *style);
        }
        return;
    }

    let right = left + width - 1;
    let bottom = top + height - 1;
    for col in left + 1..right {
        put(buf, area, col, top, '─', border);
        put(buf, area, col, bottom, '─', border);
    }
    for row in top + 1..bottom {
        put(buf, area, left, row, '│', border);
        put(buf, area, right, row, '│', border);
        for col in left + 1..right {
            put(buf, area, col, row, ' ', Style::default());
        }
    }
    put(buf, area, left, top, '╭', border);
    put(buf, area, right, top, '╮', border);
    put(buf, area, left, bottom, '╰', border);
    put(buf, area, right, bottom, '╯', border);

    let inner_width = (width - 2) as usize;
    for (row, (text, style)) in card_lines(&card.game, theme)
        .iter()
        .take((height - 2) as usize)
        .enumerate()
    {
        put_str(buf, area, left + 1, top + 1 + row as i32, text, inner_width, *style);
    }
}

/// Player rows then a status row, each with its style.
fn card_lines(game: &Match, theme: Theme) -> Vec<(String, Style)> {
    let player_style = |name: &str| {
        if game.is_winner(name) {
            resolve(ThemeColor::Winner, theme)
        } else {
            resolve(ThemeColor::Player, theme)
        }
    };

    let mut lines = vec![(game.player1.clone(), player_style(&game.player1))];
    match game.player2.as_deref() {
        Some(p2) if !game.is_bye => lines.push((p2.to_string(), player_style(p2))),
        _ => lines.push(("bye".to_string(), resolve(ThemeColor::Dim, theme))),
    }

    let status = game.status.unwrap_or_default();
    let status_style = match status {
        MatchStatus::Ongoing => resolve(ThemeColor::Live, theme),
        _ => resolve(ThemeColor::Dim, theme),
    };
    lines.push((format!("#{} · {}", game.seed, status.label()), status_style));
    lines
}

fn compact_line(game: &Match) -> String {
    if game.is_walkover() {
        format!("{} (bye)", game.player1)
    } else {
        format!(
            "{} v {}",
            game.player1,
            game.player2.as_deref().unwrap_or_default()
        )
    }
}

// ---------------------------------------------------------------------------
// Clipped cell writes
// ---------------------------------------------------------------------------

fn inside(area: Rect, col: i32, row: i32) -> Option<(u16, u16)> {
    let (col, row) = (u16::try_from(col).ok()?, u16::try_from(row).ok()?);
    (col >= area.x && col < area.right() && row >= area.y && row < area.bottom()).then_some((col, row))
}

fn put(buf: &mut Buffer, area: Rect, col: i32, row: i32, ch: char, style: Style) {
    if let Some(pos) = inside(area, col, row)
        && let Some(cell) = buf.cell_mut(pos)
    {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

/// Merge connector arms with whatever line glyph is already in the cell.
fn put_arms(buf: &mut Buffer, area: Rect, col: i32, row: i32, mask: u8, style: Style) {
    let Some(pos) = inside(area, col, row) else {
        return;
    };
    if let Some(cell) = buf.cell_mut(pos) {
        let existing = cell.symbol().chars().next().map(arms).unwrap_or(0);
        cell.set_char(glyph(existing | mask));
        cell.set_style(style);
    }
}

fn put_str(buf: &mut Buffer, area: Rect, col: i32, row: i32, text: &str, max: usize, style: Style) {
    for (i, ch) in text.chars().take(max).enumerate() {
        put(buf, area, col + i as i32, row, ch, style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_engine::{LayoutConfig, TournamentData};

    fn game(seed: &str, p1: &str, p2: Option<&str>) -> Match {
        Match {
            seed: seed.into(),
            player1: p1.into(),
            player2: p2.map(Into::into),
            ..Default::default()
        }
    }

    fn scenario_session() -> BracketSession {
        let data: TournamentData = [
            (
                "Round-01",
                vec![game("1", "Ana", Some("Bo")), game("2", "Cy", Some("Di"))],
            ),
            ("Round-02", vec![game("F", "Ana", Some("Cy"))]),
        ]
        .into_iter()
        .collect();
        let mut session = BracketSession::new(LayoutConfig::default());
        session.load(data);
        session
    }

    fn render(session: &BracketSession) -> Buffer {
        let area = Rect::new(0, 0, 60, 25);
        let mut buf = Buffer::empty(area);
        BracketCanvas { session, theme: Theme::Dark }.render(area, &mut buf);
        buf
    }

    #[test]
    fn test_glyph_arm_round_trip() {
        for ch in ['─', '│', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼'] {
            assert_eq!(glyph(arms(ch)), ch);
        }
    }

    #[test]
    fn test_elbow_rasterizes_to_corners() {
        let cells = rasterize_polyline(&[(0, 0), (3, 0), (3, 2), (5, 2)]);
        let at = |c, r| glyph(cells[&(c, r)]);
        assert_eq!(at(0, 0), '─');
        assert_eq!(at(3, 0), '┐');
        assert_eq!(at(3, 1), '│');
        assert_eq!(at(3, 2), '└');
        assert_eq!(at(5, 2), '─');
    }

    #[test]
    fn test_cell_center_px_respects_canvas() {
        let canvas = Rect::new(2, 3, 10, 5);
        assert_eq!(cell_center_px(canvas, 2, 3), Some(Point::new(4.0, 8.0)));
        assert_eq!(cell_center_px(canvas, 1, 3), None);
        assert_eq!(cell_center_px(canvas, 12, 3), None);
        assert_eq!(canvas_size_px(canvas), (80.0, 80.0));
    }

    #[test]
    fn test_connectors_meet_in_a_tee() {
        // Default viewport: scale 1, offset (0, 50). The shared midline is
        // x=390 -> col 48; child rows 140/300 -> 8/18; parent row 220 -> 13.
        let buf = render(&scenario_session());
        assert_eq!(buf[(48u16, 8u16)].symbol(), "┐");
        assert_eq!(buf[(48u16, 13u16)].symbol(), "├");
        assert_eq!(buf[(48u16, 18u16)].symbol(), "┘");
    }

    #[test]
    fn test_cards_and_headers_are_drawn() {
        let buf = render(&scenario_session());
        // Card 0 spans cols 5..42 and rows 5..11.
        assert_eq!(buf[(5u16, 5u16)].symbol(), "╭");
        assert_eq!(buf[(41u16, 10u16)].symbol(), "╯");
        assert_eq!(buf[(6u16, 6u16)].symbol(), "A");
        // Header row at tree y=0 -> screen row 3.
        assert_eq!(buf[(5u16, 3u16)].symbol(), "R");
    }

    #[test]
    fn test_highlighted_path_uses_path_color() {
        let mut session = scenario_session();
        session.highlight_card(0);
        let buf = render(&session);
        let path = resolve(ThemeColor::Path, Theme::Dark).fg;
        let line = resolve(ThemeColor::Line, Theme::Dark).fg;
        assert_eq!(Some(buf[(48u16, 8u16)].fg), path);
        assert_eq!(Some(buf[(48u16, 18u16)].fg), line);
        assert_eq!(Some(buf[(5u16, 5u16)].fg), resolve(ThemeColor::Hovered, Theme::Dark).fg);
    }

    #[test]
    fn test_tiny_cards_collapse_to_text() {
        let mut session = scenario_session();
        session.viewport_mut().scale = 0.1;
        let buf = render(&session);
        // Card 0 at scale 0.1: x=4 -> col 0, y=4+50 -> row 3, one row tall.
        let row: String = (0..9u16).map(|c| buf[(c, 3u16)].symbol().to_string()).collect();
        assert!(row.starts_with("Ana"), "row: {row:?}");
    }

    #[test]
    fn test_offscreen_content_is_clipped() {
        let mut session = scenario_session();
        session.viewport_mut().pan_by(-10_000.0, -10_000.0);
        let buf = render(&session);
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }
}
