use tui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeColor {
    /// Card border and connector at rest.
    Line,
    /// Cards and connectors on the hovered path.
    Path,
    /// The card under the pointer.
    Hovered,
    Header,
    Player,
    Winner,
    Live,
    Dim,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Theme {
    #[default]
    Dark,
}

pub fn resolve(color: ThemeColor, _theme: Theme) -> Style {
    match color {
        ThemeColor::Line => Style::default().fg(Color::Indexed(244)),
        ThemeColor::Path => Style::default().fg(Color::Yellow),
        ThemeColor::Hovered => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ThemeColor::Header => Style::default().fg(Color::Rgb(0, 122, 195)).add_modifier(Modifier::BOLD),
        ThemeColor::Player => Style::default().fg(Color::Gray),
        ThemeColor::Winner => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ThemeColor::Live => Style::default().fg(Color::Rgb(255, 103, 31)),
        ThemeColor::Dim => Style::default().fg(Color::Indexed(240)),
    }
}
