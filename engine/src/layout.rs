use log::debug;
use serde::Serialize;

use crate::{BoundingBox, CardPosition, LayoutConfig, Point, TournamentData};

// ---------------------------------------------------------------------------
// Tree positions
// ---------------------------------------------------------------------------

/// Place every match card of the bracket.
///
/// Column `r` sits at `start_x + r * round_spacing`. First-round cards are
/// stacked `match_spacing` apart; every later card is centered between its two
/// feeders in the previous round:
///
/// ```text
///   round 0        round 1
///   [ 0 ] y=40
///                  [ 0 ] y=(40+200)/2=120
///   [ 1 ] y=200
/// ```
///
/// When a feeder is missing (short or sparse round) the card falls back to
/// `start_y + i * match_spacing * 2`, without looking at the surviving sibling.
///
/// Output order is round 0 in array order, then round 1, and so on. Only the
/// previous round's y values are carried forward.
pub fn compute_positions(data: &TournamentData, config: &LayoutConfig) -> Vec<CardPosition> {
    let mut positions = Vec::with_capacity(data.match_count());
    let mut prev_ys: Vec<f64> = Vec::new();

    for (round_index, (_, matches)) in data.rounds().enumerate() {
        let x = config.start_x + round_index as f64 * config.round_spacing;
        let mut ys = Vec::with_capacity(matches.len());

        for (match_index, game) in matches.iter().enumerate() {
            let y = if round_index == 0 {
                config.start_y + match_index as f64 * config.match_spacing
            } else {
                match (prev_ys.get(2 * match_index), prev_ys.get(2 * match_index + 1)) {
                    (Some(top), Some(bottom)) => (top + bottom) / 2.0,
                    _ => config.start_y + match_index as f64 * config.match_spacing * 2.0,
                }
            };
            ys.push(y);
            positions.push(CardPosition {
                x,
                y,
                game: game.clone(),
                round_index,
                match_index,
            });
        }

        prev_ys = ys;
    }

    debug!(
        "laid out {} cards across {} rounds",
        positions.len(),
        data.round_count()
    );
    positions
}

// ---------------------------------------------------------------------------
// Extents, headers, hit testing
// ---------------------------------------------------------------------------

/// Bounding box of every card, grown by `padding` on each side.
///
/// Returns `None` when there are no cards to measure.
pub fn content_bounds(
    positions: &[CardPosition],
    config: &LayoutConfig,
    padding: f64,
) -> Option<BoundingBox> {
    let first = positions.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.right(config), first.y + config.card_height);

    for card in &positions[1..] {
        min_x = min_x.min(card.x);
        min_y = min_y.min(card.y);
        max_x = max_x.max(card.right(config));
        max_y = max_y.max(card.y + config.card_height);
    }

    Some(BoundingBox {
        min_x: min_x - padding,
        min_y: min_y - padding,
        width: max_x - min_x + 2.0 * padding,
        height: max_y - min_y + 2.0 * padding,
    })
}

/// Column label drawn in the header row above each round.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundHeader {
    pub name: String,
    pub round_index: usize,
    pub x: f64,
}

pub fn round_headers(data: &TournamentData, config: &LayoutConfig) -> Vec<RoundHeader> {
    data.round_names()
        .enumerate()
        .map(|(round_index, name)| RoundHeader {
            name: name.to_string(),
            round_index,
            x: config.start_x + round_index as f64 * config.round_spacing,
        })
        .collect()
}

/// Index of the first card containing `point` (tree space, edges inclusive).
pub fn card_at(positions: &[CardPosition], config: &LayoutConfig, point: Point) -> Option<usize> {
    positions.iter().position(|card| card.contains(config, point))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
