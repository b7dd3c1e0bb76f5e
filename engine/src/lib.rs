pub mod connectors;
pub mod highlight;
pub mod layout;
pub mod load;
pub mod session;
pub mod viewport;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use connectors::compute_connectors;
pub use highlight::{HighlightState, compute_highlight_path, draw_order};
pub use layout::{RoundHeader, card_at, compute_positions, content_bounds, round_headers};
pub use session::{BracketSession, LayoutSnapshot};
pub use viewport::{Viewport, handle_wheel};

// ---------------------------------------------------------------------------
// Input types — what the data layer hands us
// ---------------------------------------------------------------------------

/// One bracket match as supplied by the caller. Never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub seed: String,
    pub player1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default)]
    pub is_bye: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
}

impl Match {
    /// A walkover has no second player, or is flagged as a bye.
    pub fn is_walkover(&self) -> bool {
        self.is_bye || self.player2.is_none()
    }

    pub fn is_winner(&self, player: &str) -> bool {
        self.winner.as_deref() == Some(player)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    #[default]
    NotStarted,
    Ongoing,
    Finished,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::NotStarted => "Not started",
            MatchStatus::Ongoing => "Live",
            MatchStatus::Finished => "Final",
        }
    }
}

/// Round name -> matches, in reading order. Round 0 is the first key.
///
/// Within a round, match `i` of round `r + 1` is fed by matches `2i` and
/// `2i + 1` of round `r`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentData {
    rounds: IndexMap<String, Vec<Match>>,
}

impl TournamentData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a round. Reusing an existing name replaces that round in place.
    pub fn push_round(&mut self, name: impl Into<String>, matches: Vec<Match>) {
        self.rounds.insert(name.into(), matches);
    }

    pub fn rounds(&self) -> impl Iterator<Item = (&str, &[Match])> {
        self.rounds.iter().map(|(name, matches)| (name.as_str(), matches.as_slice()))
    }

    pub fn round_names(&self) -> impl Iterator<Item = &str> {
        self.rounds.keys().map(String::as_str)
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn match_count(&self) -> usize {
        self.rounds.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.match_count() == 0
    }
}

// IndexMap equality ignores key order, but round order is part of the data.
impl PartialEq for TournamentData {
    fn eq(&self, other: &Self) -> bool {
        self.rounds.len() == other.rounds.len() && self.rounds.iter().eq(other.rounds.iter())
    }
}

impl Eq for TournamentData {}

impl<S: Into<String>> FromIterator<(S, Vec<Match>)> for TournamentData {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Match>)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (name, matches) in iter {
            data.push_round(name, matches);
        }
        data
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Static card geometry. One instance is used for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub card_width: f64,
    pub card_height: f64,
    /// Horizontal distance between the left edges of adjacent rounds.
    pub round_spacing: f64,
    /// Vertical distance between first-round cards.
    pub match_spacing: f64,
    pub start_x: f64,
    pub start_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 300.0,
            card_height: 100.0,
            round_spacing: 400.0,
            match_spacing: 160.0,
            start_x: 40.0,
            start_y: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn center(&self) -> Point {
        Point::new(self.min_x + self.width / 2.0, self.min_y + self.height / 2.0)
    }
}

// ---------------------------------------------------------------------------
// Derived view-model — rebuilt on every layout pass
// ---------------------------------------------------------------------------

/// Where one match card sits. `x`/`y` are the card's top-left corner.
///
/// A card's index in the sequence returned by [`compute_positions`] is its
/// identity, and only until the next recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPosition {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "match")]
    pub game: Match,
    pub round_index: usize,
    pub match_index: usize,
}

impl CardPosition {
    /// Vertical center of the card, where connectors attach.
    pub fn mid_y(&self, config: &LayoutConfig) -> f64 {
        self.y + config.card_height / 2.0
    }

    pub fn right(&self, config: &LayoutConfig) -> f64 {
        self.x + config.card_width
    }

    pub fn contains(&self, config: &LayoutConfig, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right(config)
            && point.y >= self.y
            && point.y <= self.y + config.card_height
    }
}

/// A child -> parent elbow polyline, flattened as `x0, y0, x1, y1, ...`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionLine {
    pub points: Vec<f64>,
    pub source_index: usize,
    pub target_index: usize,
}

impl ConnectionLine {
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1]))
    }
}

/// Chain of card indices from a hovered card forward to the final.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathHighlight {
    pub card_indices: Vec<usize>,
}

impl PathHighlight {
    pub fn is_empty(&self) -> bool {
        self.card_indices.is_empty()
    }

    pub fn contains(&self, card_index: usize) -> bool {
        self.card_indices.contains(&card_index)
    }

    /// A line is on the path only when both of its ends are.
    pub fn is_line_highlighted(&self, line: &ConnectionLine) -> bool {
        self.contains(line.source_index) && self.contains(line.target_index)
    }
}
