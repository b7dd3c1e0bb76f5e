use log::debug;
use serde::Serialize;

use crate::{
    BoundingBox, CardPosition, ConnectionLine, HighlightState, LayoutConfig, PathHighlight, Point,
    RoundHeader, TournamentData, Viewport, card_at, compute_connectors, compute_positions, content_bounds,
    round_headers,
};

/// Everything one open bracket view needs between events: the data it was
/// laid out from, the cached layout, the hover highlight and the viewport.
///
/// Layout is recomputed only when [`BracketSession::load`] sees data that
/// differs from the cached copy. Card indices handed out before a
/// recomputation are stale afterwards, so the highlight is dropped with them.
#[derive(Debug, Default)]
pub struct BracketSession {
    config: LayoutConfig,
    data: Option<TournamentData>,
    positions: Vec<CardPosition>,
    connectors: Vec<ConnectionLine>,
    headers: Vec<RoundHeader>,
    highlight: HighlightState,
    viewport: Viewport,
}

/// Full-resolution description of the current layout for the export side,
/// independent of where the viewport is looking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub config: LayoutConfig,
    pub headers: Vec<RoundHeader>,
    pub positions: Vec<CardPosition>,
    pub connectors: Vec<ConnectionLine>,
    pub bounds: Option<BoundingBox>,
    pub highlight: Option<PathHighlight>,
    pub viewport: Viewport,
}

impl BracketSession {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Take new data. Returns `true` if the layout had to be recomputed.
    pub fn load(&mut self, data: TournamentData) -> bool {
        if self.data.as_ref() == Some(&data) {
            debug!("tournament data unchanged, keeping cached layout");
            return false;
        }
        self.positions = compute_positions(&data, &self.config);
        self.connectors = compute_connectors(&self.positions, &self.config);
        self.headers = round_headers(&data, &self.config);
        self.highlight.clear_highlight();
        self.data = Some(data);
        true
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn data(&self) -> Option<&TournamentData> {
        self.data.as_ref()
    }

    pub fn positions(&self) -> &[CardPosition] {
        &self.positions
    }

    pub fn connectors(&self) -> &[ConnectionLine] {
        &self.connectors
    }

    pub fn headers(&self) -> &[RoundHeader] {
        &self.headers
    }

    pub fn highlight(&self) -> Option<&PathHighlight> {
        self.highlight.current()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.highlight.hovered()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn bounds(&self, padding: f64) -> Option<BoundingBox> {
        content_bounds(&self.positions, &self.config, padding)
    }

    /// Card under a screen-space point, through the current viewport.
    pub fn card_at_screen(&self, screen: Point) -> Option<usize> {
        let tree = self.viewport.screen_to_tree(screen);
        card_at(&self.positions, &self.config, tree)
    }

    /// Pointer moved to `screen`. Returns `true` if the highlight changed.
    pub fn hover_at(&mut self, screen: Point) -> bool {
        let hit = self.card_at_screen(screen);
        self.highlight.hover(hit, &self.positions)
    }

    pub fn highlight_card(&mut self, card_index: usize) {
        self.highlight.highlight_path(card_index, &self.positions);
    }

    pub fn clear_highlight(&mut self) {
        self.highlight.clear_highlight();
    }

    pub fn wheel_at(&mut self, screen: Point, delta_y: f64) {
        self.viewport.wheel(screen, delta_y);
    }

    /// Fit the whole tree into a `width` x `height` screen.
    pub fn fit(&mut self, width: f64, height: f64, padding: f64) {
        if let Some(bounds) = self.bounds(0.0) {
            self.viewport.fit_content(width, height, &bounds, padding);
        }
    }

    pub fn snapshot(&self, padding: f64) -> LayoutSnapshot {
        LayoutSnapshot {
            config: self.config,
            headers: self.headers.clone(),
            positions: self.positions.clone(),
            connectors: self.connectors.clone(),
            bounds: self.bounds(padding),
            highlight: self.highlight.current().cloned(),
            viewport: self.viewport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Match;

    fn game(seed: &str) -> Match {
        Match {
            seed: seed.into(),
            player1: "A".into(),
            player2: Some("B".into()),
            ..Default::default()
        }
    }

    fn scenario() -> TournamentData {
        [
            ("Round-01", vec![game("A"), game("B")]),
            ("Round-02", vec![game("Final")]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_load_computes_layout() {
        let mut session = BracketSession::new(LayoutConfig::default());
        assert!(session.load(scenario()));
        assert_eq!(session.positions().len(), 3);
        assert_eq!(session.connectors().len(), 2);
        assert_eq!(session.headers().len(), 2);
    }

    #[test]
    fn test_identical_data_is_not_recomputed() {
        let mut session = BracketSession::new(LayoutConfig::default());
        assert!(session.load(scenario()));
        session.highlight_card(0);
        assert!(!session.load(scenario()));
        assert_eq!(session.highlight().unwrap().card_indices, vec![0, 2]);
    }

    #[test]
    fn test_changed_data_drops_stale_highlight() {
        let mut session = BracketSession::new(LayoutConfig::default());
        session.load(scenario());
        session.highlight_card(0);

        let mut changed = scenario();
        changed.push_round("Round-03", vec![game("Extra")]);
        assert!(session.load(changed));
        assert_eq!(session.highlight(), None);
        assert_eq!(session.positions().len(), 4);
    }

    #[test]
    fn test_hover_goes_through_viewport() {
        let mut session = BracketSession::new(LayoutConfig::default());
        session.load(scenario());
        // Default viewport shifts the tree down by 50, so tree (50, 50) is screen (50, 100).
        assert!(session.hover_at(Point::new(50.0, 100.0)));
        assert_eq!(session.hovered(), Some(0));
        assert_eq!(session.highlight().unwrap().card_indices, vec![0, 2]);

        assert!(session.hover_at(Point::new(5.0, 5.0)));
        assert_eq!(session.highlight(), None);
    }

    #[test]
    fn test_fit_centers_tree() {
        let mut session = BracketSession::new(LayoutConfig::default());
        session.load(scenario());
        session.fit(800.0, 600.0, 50.0);
        let bounds = session.bounds(0.0).unwrap();
        let center = session.viewport().tree_to_screen(bounds.center());
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_without_data_leaves_viewport() {
        let mut session = BracketSession::default();
        session.fit(800.0, 600.0, 50.0);
        assert_eq!(*session.viewport(), Viewport::default());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = BracketSession::new(LayoutConfig::default());
        session.load(scenario());
        session.highlight_card(1);
        let snapshot = session.snapshot(50.0);
        assert_eq!(snapshot.bounds.unwrap().width, 800.0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["positions"][2]["match"]["seed"], "Final");
        assert_eq!(json["connectors"][0]["sourceIndex"], 0);
        assert_eq!(json["highlight"]["cardIndices"][1], 2);
        assert_eq!(json["viewport"]["scale"], 1.0);
    }
}
