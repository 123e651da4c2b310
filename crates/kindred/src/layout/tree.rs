//! Hierarchical placement of rooted family trees.
//!
//! Each root is handled in two passes. The measuring pass walks the tree in
//! post-order and records how wide every subtree needs to be. The placing
//! pass walks it again top-down, centering every group of children under
//! their parent and writing nodes into a flat arena.

use std::collections::HashSet;

use log::{trace, warn};

use kindred_core::{
    family::TreeNode,
    geometry::{Point, Size},
    identifier::PersonId,
};

use super::node::LayoutNode;
use crate::config::LayoutConfig;

/// A tree node annotated with the width of its subtree.
struct Measured<'a> {
    node: &'a TreeNode,
    width: f32,
    children_width: f32,
    children: Vec<Measured<'a>>,
}

/// Lays out a sequence of roots, stacking each below the previous one.
pub(super) struct TreePlacer<'c> {
    config: &'c LayoutConfig,
    nodes: Vec<LayoutNode>,
    /// People laid out as tree nodes, used to skip repeated occurrences.
    laid_out: HashSet<PersonId>,
    /// Tree nodes plus the spouses drawn alongside them.
    placed: HashSet<PersonId>,
    next_level: usize,
}

impl<'c> TreePlacer<'c> {
    pub(super) fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            laid_out: HashSet::new(),
            placed: HashSet::new(),
            next_level: 0,
        }
    }

    /// Lays out one root in the next free level band, centered at `x = 0`.
    pub(super) fn add_root(&mut self, root: &TreeNode) {
        let Some(measured) = self.measure(root) else {
            return;
        };

        let first_level = self.next_level;
        let deepest = self.place(&measured, 0.0, first_level, None);
        trace!(
            root = root.person().id().to_string(),
            first_level,
            deepest,
            width = measured.width;
            "Placed family tree"
        );
        self.next_level = deepest + 1;
    }

    /// Returns the arena, the set of people already drawn and the first free level.
    pub(super) fn finish(self) -> (Vec<LayoutNode>, HashSet<PersonId>, usize) {
        (self.nodes, self.placed, self.next_level)
    }

    /// Post-order pass computing subtree widths.
    ///
    /// Returns `None` when the person was already laid out; that occurrence
    /// and everything below it is dropped.
    fn measure<'a>(&mut self, node: &'a TreeNode) -> Option<Measured<'a>> {
        let id = node.person().id();
        if !self.laid_out.insert(id) {
            warn!(person = id.to_string(); "Person appears more than once in the family tree, skipping repeat");
            return None;
        }

        let children: Vec<Measured<'a>> = node
            .children()
            .iter()
            .filter_map(|child| self.measure(child))
            .collect();

        let children_width = self.children_width(&children);
        let width = self.config.node_width().max(children_width);

        Some(Measured {
            node,
            width,
            children_width,
            children,
        })
    }

    /// Summed width of sibling subtrees, including the gaps between them.
    fn children_width(&self, children: &[Measured<'_>]) -> f32 {
        if children.is_empty() {
            return 0.0;
        }
        let gaps = (children.len() - 1) as f32 * self.config.horizontal_spacing();
        children.iter().map(|child| child.width).sum::<f32>() + gaps
    }

    /// Top-down pass writing nodes into the arena. Returns the deepest level reached.
    fn place(
        &mut self,
        measured: &Measured<'_>,
        center_x: f32,
        level: usize,
        parent: Option<usize>,
    ) -> usize {
        let index = self.nodes.len();
        let position = Point::new(center_x, level as f32 * self.config.level_height());
        let size = Size::new(measured.width, self.config.node_height());

        self.placed.insert(measured.node.person().id());
        self.placed
            .extend(measured.node.spouses().iter().map(|spouse| spouse.id()));
        self.nodes
            .push(LayoutNode::tree(measured.node, parent, position, level, size));

        let mut deepest = level;
        let mut cursor = center_x - measured.children_width / 2.0;
        for child in &measured.children {
            let child_center = cursor + child.width / 2.0;
            let child_index = self.nodes.len();
            let child_deepest = self.place(child, child_center, level + 1, Some(index));
            self.nodes[index].push_child(child_index);
            deepest = deepest.max(child_deepest);
            cursor += child.width + self.config.horizontal_spacing();
        }

        deepest
    }
}
