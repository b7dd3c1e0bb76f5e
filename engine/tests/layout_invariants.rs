//! Property-based invariant tests for the bracket engine.
//!
//! 1. Card count — one position per match, round-then-array order
//! 2. Midpoint — a card with two feeders sits halfway between them
//! 3. Highlight termination — path starts at the card and is bounded by depth
//! 4. Zoom clamp — wheel and step zoom never leave [0.1, 5]
//! 5. Anchored zoom — the tree point under the pointer does not move
//! 6. Fit centering — fitted content is centered in the viewport
//! 7. Connector endpoints — every line joins a card's right edge to its parent's left edge

use bracket_engine::viewport::{MAX_SCALE, MIN_SCALE};
use bracket_engine::{
    LayoutConfig, Match, Point, TournamentData, Viewport, compute_connectors,
    compute_highlight_path, compute_positions, handle_wheel,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn build(sizes: &[usize]) -> TournamentData {
    sizes
        .iter()
        .enumerate()
        .map(|(r, &n)| {
            let matches = (0..n)
                .map(|i| Match {
                    seed: format!("{r}-{i}"),
                    player1: format!("p{r}{i}"),
                    player2: (i % 3 != 0).then(|| format!("q{r}{i}")),
                    ..Default::default()
                })
                .collect();
            (format!("Round-{:02}", r + 1), matches)
        })
        .collect()
}

/// Arbitrary, possibly ragged round sizes.
fn round_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..12, 0..6)
}

/// A complete bracket of the given depth: 2^(d-1), ..., 2, 1.
fn full_bracket_sizes() -> impl Strategy<Value = Vec<usize>> {
    (1u32..6).prop_map(|depth| (0..depth).rev().map(|d| 1usize << d).collect())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[derive(Debug, Clone)]
enum ZoomOp {
    Wheel(f64, f64, f64),
    In,
    Out,
}

fn zoom_op() -> impl Strategy<Value = ZoomOp> {
    prop_oneof![
        (-500.0..1500.0f64, -500.0..1500.0f64, -3.0..3.0f64)
            .prop_map(|(x, y, d)| ZoomOp::Wheel(x, y, d)),
        Just(ZoomOp::In),
        Just(ZoomOp::Out),
    ]
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn card_count_and_order(sizes in round_sizes()) {
        let data = build(&sizes);
        let positions = compute_positions(&data, &LayoutConfig::default());
        prop_assert_eq!(positions.len(), sizes.iter().sum::<usize>());

        let expected: Vec<(usize, usize)> = sizes
            .iter()
            .enumerate()
            .flat_map(|(r, &n)| (0..n).map(move |i| (r, i)))
            .collect();
        let actual: Vec<(usize, usize)> =
            positions.iter().map(|p| (p.round_index, p.match_index)).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn parent_sits_between_feeders(sizes in round_sizes()) {
        let positions = compute_positions(&build(&sizes), &LayoutConfig::default());
        for card in positions.iter().filter(|p| p.round_index > 0) {
            let feeder = |k: usize| {
                positions
                    .iter()
                    .find(|p| p.round_index == card.round_index - 1 && p.match_index == k)
            };
            if let (Some(a), Some(b)) = (feeder(2 * card.match_index), feeder(2 * card.match_index + 1)) {
                prop_assert_eq!(card.y, (a.y + b.y) / 2.0);
            }
        }
    }

    #[test]
    fn highlight_is_bounded(sizes in round_sizes(), pick in 0usize..64) {
        let positions = compute_positions(&build(&sizes), &LayoutConfig::default());
        let path = compute_highlight_path(pick, &positions);
        match positions.get(pick) {
            None => prop_assert!(path.is_empty()),
            Some(card) => {
                let max_round = positions.iter().map(|p| p.round_index).max().unwrap_or(0);
                prop_assert_eq!(path.card_indices[0], pick);
                prop_assert!(path.card_indices.len() <= max_round - card.round_index + 1);
            }
        }
    }

    #[test]
    fn full_bracket_highlight_reaches_final(sizes in full_bracket_sizes(), pick in 0usize..16) {
        let positions = compute_positions(&build(&sizes), &LayoutConfig::default());
        let pick = pick % positions.len();
        let path = compute_highlight_path(pick, &positions);
        prop_assert_eq!(path.card_indices.last().copied(), Some(positions.len() - 1));
    }

    #[test]
    fn zoom_stays_clamped(ops in prop::collection::vec(zoom_op(), 0..80)) {
        let mut vp = Viewport::default();
        for op in ops {
            match op {
                ZoomOp::Wheel(x, y, d) => vp.wheel(Point::new(x, y), d),
                ZoomOp::In => vp.zoom_in(),
                ZoomOp::Out => vp.zoom_out(),
            }
            prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&vp.scale));
        }
    }

    #[test]
    fn wheel_zoom_is_pointer_anchored(
        px in -1000.0..1000.0f64,
        py in -1000.0..1000.0f64,
        ox in -500.0..500.0f64,
        oy in -500.0..500.0f64,
        scale in MIN_SCALE..MAX_SCALE,
        delta in -5.0..5.0f64,
    ) {
        let offset = Point::new(ox, oy);
        let (new_scale, new_offset) = handle_wheel(Point::new(px, py), delta, scale, offset);
        prop_assert!(close((px - ox) / scale, (px - new_offset.x) / new_scale));
        prop_assert!(close((py - oy) / scale, (py - new_offset.y) / new_scale));
    }

    #[test]
    fn fit_centers_content(
        w in 200.0..3000.0f64,
        h in 200.0..3000.0f64,
        cw in 1.0..5000.0f64,
        ch in 1.0..5000.0f64,
        pad in 0.0..90.0f64,
    ) {
        let mut vp = Viewport::default();
        vp.fit_to_screen(w, h, cw, ch, pad);
        let center = vp.tree_to_screen(Point::new(cw / 2.0, ch / 2.0));
        prop_assert!(close(center.x, w / 2.0));
        prop_assert!(close(center.y, h / 2.0));
    }

    #[test]
    fn connectors_join_edges(sizes in round_sizes()) {
        let cfg = LayoutConfig::default();
        let positions = compute_positions(&build(&sizes), &cfg);
        for line in compute_connectors(&positions, &cfg) {
            let child = &positions[line.source_index];
            let parent = &positions[line.target_index];
            prop_assert_eq!(parent.round_index, child.round_index + 1);
            prop_assert_eq!(parent.match_index, child.match_index / 2);
            prop_assert_eq!(line.points[0], child.x + cfg.card_width);
            prop_assert_eq!(line.points[1], child.y + cfg.card_height / 2.0);
            prop_assert_eq!(line.points[6], parent.x);
            prop_assert_eq!(line.points[7], parent.y + cfg.card_height / 2.0);
        }
    }
}

#[test]
fn empty_data_is_empty_everywhere() {
    let cfg = LayoutConfig::default();
    let positions = compute_positions(&TournamentData::new(), &cfg);
    assert!(positions.is_empty());
    assert!(compute_connectors(&positions, &cfg).is_empty());
    assert!(compute_highlight_path(0, &positions).is_empty());
}
