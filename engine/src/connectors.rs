use crate::{CardPosition, ConnectionLine, LayoutConfig};

/// Route the connector lines between adjacent rounds.
///
/// Each child feeds its parent through a three-segment elbow that turns on
/// the vertical midline between the two columns:
///
/// ```text
///  child_top ──┐
///              │
///              ├── parent
///              │
///  child_bot ──┘
/// ```
///
/// A parent with a single feeder (bye) gets one elbow; a parent with none gets
/// nothing. Lines come out in round order, then parent order, then child order.
pub fn compute_connectors(positions: &[CardPosition], config: &LayoutConfig) -> Vec<ConnectionLine> {
    let rounds = group_by_round(positions);
    let mut lines = Vec::new();

    for pair in rounds.windows(2) {
        let (children, parents) = (&pair[0], &pair[1]);
        for (i, &parent) in parents.iter().enumerate() {
            // A second child without a first one cannot exist in a dense Vec.
            let Some(&first) = children.get(2 * i) else {
                continue;
            };
            lines.push(elbow(positions, first, parent, config));
            if let Some(&second) = children.get(2 * i + 1) {
                lines.push(elbow(positions, second, parent, config));
            }
        }
    }

    lines
}

/// Stable grouping of absolute card indices by round, preserving array order.
fn group_by_round(positions: &[CardPosition]) -> Vec<Vec<usize>> {
    let mut rounds: Vec<Vec<usize>> = Vec::new();
    for (index, card) in positions.iter().enumerate() {
        if rounds.len() <= card.round_index {
            rounds.resize_with(card.round_index + 1, Vec::new);
        }
        rounds[card.round_index].push(index);
    }
    rounds
}

fn elbow(
    positions: &[CardPosition],
    child_index: usize,
    parent_index: usize,
    config: &LayoutConfig,
) -> ConnectionLine {
    let child = &positions[child_index];
    let parent = &positions[parent_index];

    let x1 = child.right(config);
    let x_mid = x1 + (parent.x - x1) / 2.0;
    let y_child = child.mid_y(config);
    let y_parent = parent.mid_y(config);

    ConnectionLine {
        points: vec![
            x1, y_child, x_mid, y_child, x_mid, y_parent, parent.x, y_parent,
        ],
        source_index: child_index,
        target_index: parent_index,
    }
}
