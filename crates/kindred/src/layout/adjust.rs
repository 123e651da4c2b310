//! Post-passes over a computed layout: centering, collision checks and spacing repair.

use std::collections::BTreeMap;

use log::debug;

use kindred_core::geometry::{Bounds, Insets, Point};

use super::node::LayoutNode;

/// Pushes smaller than this are float noise, not crowding.
const PUSH_TOLERANCE: f32 = 1e-3;

/// Bounding box of every node footprint, `None` for an empty layout.
pub fn layout_bounds(nodes: &[LayoutNode]) -> Option<Bounds> {
    let (first, rest) = nodes.split_first()?;
    Some(
        rest.iter()
            .map(LayoutNode::bounds)
            .fold(first.bounds(), |acc, bounds| acc.merge(&bounds)),
    )
}

/// Translates every node so the layout's top-left corner sits at `(padding, padding)`.
pub(super) fn center(nodes: &[LayoutNode], padding: f32) -> Vec<LayoutNode> {
    let Some(bounds) = layout_bounds(nodes) else {
        return Vec::new();
    };

    let offset = Point::new(padding, padding).sub_point(bounds.min_point());
    nodes
        .iter()
        .cloned()
        .map(|mut node| {
            node.translate(offset);
            node
        })
        .collect()
}

/// Pairwise overlap test between footprints grown by `buffer` on every side.
pub(super) fn has_collisions(nodes: &[LayoutNode], buffer: f32) -> bool {
    let padded: Vec<Bounds> = nodes
        .iter()
        .map(|node| node.bounds().add_padding(Insets::uniform(buffer)))
        .collect();

    for (i, a) in padded.iter().enumerate() {
        for (j, b) in padded.iter().enumerate().skip(i + 1) {
            if a.intersects(b) {
                debug!(
                    first = nodes[i].person().id().to_string(),
                    second = nodes[j].person().id().to_string();
                    "Layout nodes collide"
                );
                return true;
            }
        }
    }

    false
}

/// Greedy per-level repair of horizontal crowding.
///
/// Within each level nodes are visited left to right; a node whose left edge
/// is closer than `min_spacing` to the rightmost edge seen so far is pushed
/// right, and the push carries over to every node after it on that level.
pub(super) fn spread_levels(nodes: &[LayoutNode], min_spacing: f32) -> Vec<LayoutNode> {
    let mut spaced = nodes.to_vec();

    let mut levels: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, node) in spaced.iter().enumerate() {
        levels.entry(node.level()).or_default().push(index);
    }

    let mut pushes = 0usize;
    for indices in levels.values_mut() {
        indices.sort_by(|&a, &b| spaced[a].x().total_cmp(&spaced[b].x()));

        let mut shift = 0.0;
        let mut right_edge: Option<f32> = None;
        for &index in indices.iter() {
            let node = &mut spaced[index];
            node.translate(Point::new(shift, 0.0));

            if let Some(right_edge) = right_edge {
                let deficit = right_edge + min_spacing - node.bounds().min_x();
                if deficit > PUSH_TOLERANCE {
                    node.translate(Point::new(deficit, 0.0));
                    shift += deficit;
                    pushes += 1;
                }
            }

            let node_right = node.bounds().max_x();
            right_edge = Some(right_edge.map_or(node_right, |edge: f32| edge.max(node_right)));
        }
    }

    debug!(pushes, levels = levels.len(); "Auto-spacing finished");
    spaced
}
