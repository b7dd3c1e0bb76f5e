use log::debug;

use crate::{CardPosition, ConnectionLine, PathHighlight};

/// Trace the path a match's winner takes to the final.
///
/// Starts at `card_index` and climbs one round at a time to match
/// `match_index / 2` of the next round. A round without that match is skipped
/// rather than ending the trace. Out-of-range indices give an empty highlight.
pub fn compute_highlight_path(card_index: usize, positions: &[CardPosition]) -> PathHighlight {
    let Some(start) = positions.get(card_index) else {
        return PathHighlight::default();
    };

    let max_round = positions.iter().map(|p| p.round_index).max().unwrap_or(0);
    let mut card_indices = vec![card_index];
    let mut current_round = start.round_index;
    let mut current_match = start.match_index;

    while current_round < max_round {
        let next_round = current_round + 1;
        let next_match = current_match / 2;
        if let Some(found) = positions
            .iter()
            .position(|p| p.round_index == next_round && p.match_index == next_match)
        {
            card_indices.push(found);
        }
        current_round = next_round;
        current_match = next_match;
    }

    PathHighlight { card_indices }
}

/// Lines in paint order: everything off the path first, highlighted lines
/// last so they sit on top. Relative order is otherwise preserved.
pub fn draw_order<'a>(
    lines: &'a [ConnectionLine],
    highlight: Option<&PathHighlight>,
) -> Vec<(&'a ConnectionLine, bool)> {
    let Some(highlight) = highlight else {
        return lines.iter().map(|line| (line, false)).collect();
    };
    let (on_path, off_path): (Vec<_>, Vec<_>) =
        lines.iter().partition(|line| highlight.is_line_highlighted(line));
    off_path
        .into_iter()
        .map(|line| (line, false))
        .chain(on_path.into_iter().map(|line| (line, true)))
        .collect()
}

// ---------------------------------------------------------------------------
// HighlightState — the single live hover highlight
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HighlightState {
    hovered: Option<usize>,
    current: Option<PathHighlight>,
}

impl HighlightState {
    /// Pointer entered `card_index`; replaces whatever was highlighted.
    pub fn highlight_path(&mut self, card_index: usize, positions: &[CardPosition]) {
        let path = compute_highlight_path(card_index, positions);
        debug!("highlighting path {:?}", path.card_indices);
        self.hovered = Some(card_index);
        self.current = Some(path);
    }

    /// Pointer left the card.
    pub fn clear_highlight(&mut self) {
        self.hovered = None;
        self.current = None;
    }

    pub fn current(&self) -> Option<&PathHighlight> {
        self.current.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Feed a hit-test result from a pointer move. Entering a card, moving to
    /// another card and leaving all cards are the only transitions.
    ///
    /// Returns `true` when the highlight changed.
    pub fn hover(&mut self, hit: Option<usize>, positions: &[CardPosition]) -> bool {
        if hit == self.hovered {
            return false;
        }
        match hit {
            Some(card_index) => self.highlight_path(card_index, positions),
            None => self.clear_highlight(),
        }
        true
    }
}
