//! Tree Layout Engine.
//!
//! Converts a forest of [`TreeNode`] roots plus the full list of people into
//! absolute coordinates ready for rendering:
//!
//! 1. every root is laid out depth-first, children centered under their
//!    parent and generations banded by `level × level_height`;
//! 2. roots are stacked vertically, each starting one level below the
//!    deepest generation of the previous root;
//! 3. people reached by no root are packed into a grid below the trees;
//! 4. optional post-passes repair horizontal crowding per level and move
//!    the result onto a padded canvas.
//!
//! All functions are pure: inputs are never mutated and identical inputs
//! always produce identical output.

mod adjust;
mod grid;
mod node;
mod tree;

pub use adjust::layout_bounds;
pub use node::{LayoutNode, Placement};

use log::{debug, info, warn};

use kindred_core::{
    family::{Person, Relationship, TreeNode},
    geometry::{Bounds, Size},
};

use crate::config::{DEFAULT_CANVAS_PADDING, DEFAULT_COLLISION_BUFFER, LayoutConfig};

/// Lays out a family forest with the given (or default) configuration.
///
/// `relationships` are already folded into `tree_nodes` by the tree builder;
/// they are accepted so callers can pass the full family record set.
///
/// # Examples
///
/// ```
/// use kindred::layout::calculate_family_tree_layout;
///
/// assert!(calculate_family_tree_layout(&[], &[], &[], None).is_empty());
/// ```
pub fn calculate_family_tree_layout(
    tree_nodes: &[TreeNode],
    people: &[Person],
    relationships: &[Relationship],
    config: Option<&LayoutConfig>,
) -> Vec<LayoutNode> {
    debug!(relationships = relationships.len(); "Relationships folded into tree nodes");
    TreeLayoutEngine::new(config.copied().unwrap_or_default()).calculate(tree_nodes, people)
}

/// Moves the layout onto a positive canvas with the default padding.
pub fn center_layout(nodes: &[LayoutNode]) -> Vec<LayoutNode> {
    adjust::center(nodes, DEFAULT_CANVAS_PADDING)
}

/// Returns true if any two node footprints, padded by the default buffer, overlap.
pub fn detect_collisions(nodes: &[LayoutNode]) -> bool {
    adjust::has_collisions(nodes, DEFAULT_COLLISION_BUFFER)
}

/// Pushes crowded nodes apart level by level using `config.horizontal_spacing()`.
pub fn auto_space(nodes: &[LayoutNode], config: &LayoutConfig) -> Vec<LayoutNode> {
    adjust::spread_levels(nodes, config.horizontal_spacing())
}

/// Layout engine bound to one [`LayoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct TreeLayoutEngine {
    config: LayoutConfig,
}

impl TreeLayoutEngine {
    /// Create a new engine with the given geometry.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Computes raw coordinates: rooted trees first, then the unconnected grid.
    pub fn calculate(&self, tree_nodes: &[TreeNode], people: &[Person]) -> Vec<LayoutNode> {
        let mut placer = tree::TreePlacer::new(&self.config);
        for root in tree_nodes {
            placer.add_root(root);
        }
        let (mut nodes, mut placed, next_level) = placer.finish();
        let tree_count = nodes.len();

        // `insert` also drops repeated entries in `people`.
        let unconnected: Vec<&Person> = people
            .iter()
            .filter(|person| placed.insert(person.id()))
            .collect();
        nodes.extend(grid::layout_unconnected(
            unconnected,
            next_level,
            &self.config,
        ));

        debug!(
            roots = tree_nodes.len(),
            tree_nodes = tree_count,
            unconnected = nodes.len() - tree_count;
            "Family tree layout calculated"
        );
        nodes
    }

    /// Translates the layout so its top-left corner sits at the canvas padding.
    pub fn center(&self, nodes: &[LayoutNode]) -> Vec<LayoutNode> {
        adjust::center(nodes, self.config.canvas_padding())
    }

    /// Pairwise collision check using the configured buffer.
    pub fn detect_collisions(&self, nodes: &[LayoutNode]) -> bool {
        adjust::has_collisions(nodes, self.config.collision_buffer())
    }

    /// Per-level spacing repair using the configured horizontal spacing.
    pub fn auto_space(&self, nodes: &[LayoutNode]) -> Vec<LayoutNode> {
        adjust::spread_levels(nodes, self.config.horizontal_spacing())
    }

    /// Full pipeline: calculate, auto-space (if enabled), center, verify.
    pub fn arrange(&self, tree_nodes: &[TreeNode], people: &[Person]) -> FamilyLayout {
        info!(roots = tree_nodes.len(), people = people.len(); "Arranging family tree");

        let mut nodes = self.calculate(tree_nodes, people);
        if self.config.auto_space() {
            nodes = self.auto_space(&nodes);
        }
        let nodes = self.center(&nodes);

        if self.detect_collisions(&nodes) {
            warn!("Family tree layout still has overlapping nodes");
        }

        FamilyLayout::new(nodes, self.config)
    }
}

/// A finished layout ready for export.
#[derive(Debug, Clone)]
pub struct FamilyLayout {
    nodes: Vec<LayoutNode>,
    bounds: Bounds,
    config: LayoutConfig,
}

impl FamilyLayout {
    pub fn new(nodes: Vec<LayoutNode>, config: LayoutConfig) -> Self {
        let bounds = layout_bounds(&nodes).unwrap_or_default();
        Self {
            nodes,
            bounds,
            config,
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box of all node footprints.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The geometry the layout was computed with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Canvas size: the layout bounds plus the canvas padding on every side.
    pub fn canvas_size(&self) -> Size {
        let padding = self.config.canvas_padding();
        Size::new(
            self.bounds.width() + 2.0 * padding,
            self.bounds.height() + 2.0 * padding,
        )
    }
}
