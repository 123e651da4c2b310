//! Positioned people produced by the layout engine.

use serde::Serialize;

use kindred_core::{
    family::{Person, TreeNode},
    geometry::{Bounds, Point, Size},
};

/// How a node came to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Part of a rooted family tree.
    Tree,
    /// Not reachable from any root, packed into the grid below the trees.
    Unconnected,
}

/// A person with absolute coordinates.
///
/// Nodes live in a flat arena (`Vec<LayoutNode>`); `parent` and `children`
/// are indices into that same vector. `x` is the horizontal center of the
/// node's slot and `y` its top edge. `width` is the footprint of the whole
/// subtree rooted here, never less than the configured node width.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    person: Person,
    spouses: Vec<Person>,
    parent: Option<usize>,
    children: Vec<usize>,
    placement: Placement,
    biological: bool,
    position: Point,
    level: usize,
    size: Size,
}

impl LayoutNode {
    pub(crate) fn tree(
        node: &TreeNode,
        parent: Option<usize>,
        position: Point,
        level: usize,
        size: Size,
    ) -> Self {
        Self {
            person: node.person().clone(),
            spouses: node.spouses().to_vec(),
            parent,
            children: Vec::new(),
            placement: Placement::Tree,
            biological: node.is_biological(),
            position,
            level,
            size,
        }
    }

    pub(crate) fn unconnected(person: &Person, position: Point, level: usize, size: Size) -> Self {
        Self {
            person: person.clone(),
            spouses: Vec::new(),
            parent: None,
            children: Vec::new(),
            placement: Placement::Unconnected,
            biological: true,
            position,
            level,
            size,
        }
    }

    pub(crate) fn push_child(&mut self, child: usize) {
        self.children.push(child);
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        self.position = self.position.add_point(offset);
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn spouses(&self) -> &[Person] {
        &self.spouses
    }

    /// Arena index of the parent node, if any.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Arena indices of the child nodes, left to right.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// False when the link from the parent node is adoptive or a step link.
    pub fn is_biological(&self) -> bool {
        self.biological
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    /// Generational band index; nodes sharing a level share a row.
    ///
    /// Tree nodes sit at exactly `level × level_height`. Grid rows take one
    /// level each but are spaced by `node_height + vertical_spacing`, so their
    /// `y` only matches the band formula when the two spacings agree.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    /// Footprint of this node: `width` wide, centered on `x`, hanging down from `y`.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_center(self.position, self.size)
    }

    /// The box actually drawn for this person, `node_size` centered in the footprint.
    pub fn card_bounds(&self, node_size: Size) -> Bounds {
        Bounds::new_from_top_center(self.position, node_size)
    }
}
