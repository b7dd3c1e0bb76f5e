use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::bracket::BracketCanvas;
use crate::components::theme::{Theme, ThemeColor, resolve};
use crate::state::loader::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

const KEY_HINTS: &str = "+/- zoom  0 reset  f fit  ←↓↑→ pan  e export  r reload  \" logs  q quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 5 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    layout.update(
        Rect::new(0, 0, current_size.width, current_size.height),
        app.state.show_logs,
    );

    // Mouse events are mapped through the canvas, and the first fit needs
    // its size, so both happen before rendering.
    app.state.canvas = layout.canvas;
    if app.state.pending_fit && app.state.session.data().is_some() {
        app.fit();
    }

    let result = terminal.draw(|f| {
        draw_header(f, layout.header, app);
        f.render_widget(
            BracketCanvas {
                session: &app.state.session,
                theme: Theme::Dark,
            },
            layout.canvas,
        );
        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
        draw_status(f, layout.status, app);
        draw_loading_spinner(f, layout.status, loading);
    });

    if let Err(e) = result {
        error!("Failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = Theme::Dark;
    let dim = resolve(ThemeColor::Dim, theme);
    let session = &app.state.session;

    let mut spans = vec![Span::styled(
        " bracketview ",
        resolve(ThemeColor::Header, theme).add_modifier(Modifier::REVERSED),
    )];
    if let Some(source) = &app.state.loaded_from {
        spans.push(Span::styled(format!(" {source}"), resolve(ThemeColor::Player, theme)));
    }
    if let Some(data) = session.data() {
        spans.push(Span::styled(
            format!("  {} rounds, {} matches", data.round_count(), data.match_count()),
            dim,
        ));
    }
    if let Some(at) = &app.state.loaded_at {
        spans.push(Span::styled(format!("  loaded at {at}"), dim));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let zoom = format!("{:.0}% ", session.viewport().scale * 100.0);
    f.render_widget(
        Paragraph::new(zoom).alignment(Alignment::Right).style(dim),
        area,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = Theme::Dark;
    let line = if let Some(err) = &app.state.last_error {
        Line::from(Span::styled(format!(" {err}"), Style::default().fg(Color::Red)))
    } else if let Some(notice) = &app.state.notice {
        Line::from(Span::styled(format!(" {notice}"), resolve(ThemeColor::Winner, theme)))
    } else if let Some(card) = app
        .state
        .session
        .hovered()
        .and_then(|i| app.state.session.positions().get(i))
    {
        let game = &card.game;
        let opponent = match game.player2.as_deref() {
            Some(p2) if !game.is_bye => p2,
            _ => "bye",
        };
        let mut text = format!(" #{} {} vs {}", game.seed, game.player1, opponent);
        if let Some(winner) = &game.winner {
            text.push_str(&format!("  winner: {winner}"));
        }
        Line::from(Span::styled(text, resolve(ThemeColor::Player, theme)))
    } else {
        Line::from(Span::styled(format!(" {KEY_HINTS}"), resolve(ThemeColor::Dim, theme)))
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray))
        .output_timestamp(Some("%H:%M:%S".to_string()));
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = Rect::new(area.right().saturating_sub(2), area.y, 1, 1);
    f.render_widget(spinner, area);
}
