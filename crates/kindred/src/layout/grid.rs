//! Grid packing for people outside every family tree.

use kindred_core::{
    family::Person,
    geometry::{Point, Size},
};

use super::node::LayoutNode;
use crate::config::LayoutConfig;

/// Packs `people` row-major into a grid whose top row sits on `first_level`.
///
/// Column count comes from [`LayoutConfig::grid_columns`]. Each row takes
/// its own level so rows never share a band with each other or with trees,
/// but rows are spaced by `node_height + vertical_spacing` rather than
/// `level_height`; only the top row is guaranteed to sit on its band.
pub(super) fn layout_unconnected<'p>(
    people: impl IntoIterator<Item = &'p Person>,
    first_level: usize,
    config: &LayoutConfig,
) -> Vec<LayoutNode> {
    let columns = config.grid_columns();
    let column_step = config.node_width() + config.horizontal_spacing();
    let row_step = config.node_height() + config.vertical_spacing();
    let top = first_level as f32 * config.level_height();
    let size = Size::new(config.node_width(), config.node_height());

    people
        .into_iter()
        .enumerate()
        .map(|(index, person)| {
            let row = index / columns;
            let column = index % columns;
            let position = Point::new(column as f32 * column_step, top + row as f32 * row_step);
            LayoutNode::unconnected(person, position, first_level + row, size)
        })
        .collect()
}
