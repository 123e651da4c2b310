//! Static SVG preview of a family-tree layout.
//!
//! Every person becomes a rounded card of the configured node size, centered
//! in its slot. Parents and children are joined by elbow connectors running
//! from the bottom of the parent card to the top of each child card.

use log::debug;
use svg::{Document, node::element as svg_element, node::Text as SvgText};

use kindred_core::{
    color::Color,
    geometry::{Point, Size},
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    layout::{FamilyLayout, LayoutNode, Placement},
};

const FONT_FAMILY: &str = "Arial";
const NAME_FONT_SIZE: f32 = 16.0;
const DETAIL_FONT_SIZE: f32 = 12.0;
const CARD_RADIUS: f32 = 8.0;

/// Builder for an [`Svg`] exporter.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use colors from the given style configuration.
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Validates the style and creates the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color does not parse.
    pub fn build(self) -> Result<Svg, Error> {
        let mut svg = Svg::default();
        let Some(style) = self.style else {
            return Ok(svg);
        };

        svg.background = style.background_color().map_err(Error::Render)?;
        if let Some(fill) = style.node_fill().map_err(Error::Render)? {
            svg.node_fill = fill;
        }
        if let Some(stroke) = style.node_stroke().map_err(Error::Render)? {
            svg.node_stroke = stroke;
        }
        if let Some(connector) = style.connector_color().map_err(Error::Render)? {
            svg.connector = connector;
        }
        Ok(svg)
    }
}

/// SVG exporter.
#[derive(Debug)]
pub struct Svg {
    background: Option<Color>,
    node_fill: Color,
    node_stroke: Color,
    connector: Color,
}

impl Default for Svg {
    fn default() -> Self {
        Self {
            background: None,
            node_fill: Color::new("white").expect("'white' is a valid CSS color"),
            node_stroke: Color::new("#4a4a4a").expect("'#4a4a4a' is a valid CSS color"),
            connector: Color::new("#8c8c8c").expect("'#8c8c8c' is a valid CSS color"),
        }
    }
}

impl Svg {
    /// Builds the SVG document for a layout.
    pub fn render_document(&self, layout: &FamilyLayout) -> Document {
        let canvas = layout.canvas_size();
        let card_size = layout.config().node_size();

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", canvas.width(), canvas.height()))
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background.to_string()),
            );
        }

        let mut connectors = svg_element::Group::new().set("class", "connectors");
        for parent in layout.nodes() {
            for &child in parent.children() {
                connectors = connectors.add(self.render_connector(
                    parent,
                    &layout.nodes()[child],
                    card_size,
                ));
            }
        }

        let mut people = svg_element::Group::new().set("class", "people");
        for node in layout.nodes() {
            people = people.add(self.render_card(node, card_size));
        }

        doc.add(connectors).add(people)
    }

    fn render_connector(
        &self,
        parent: &LayoutNode,
        child: &LayoutNode,
        card_size: Size,
    ) -> svg_element::Path {
        let start = Point::new(parent.x(), parent.y() + card_size.height());
        let end = child.position();
        let mid_y = start.midpoint(end).y();

        let path = svg_element::Path::new()
            .set(
                "d",
                format!(
                    "M {} {} V {} H {} V {}",
                    start.x(),
                    start.y(),
                    mid_y,
                    end.x(),
                    end.y()
                ),
            )
            .set("fill", "none")
            .set("stroke", self.connector.to_string())
            .set("stroke-width", 2);
        if child.is_biological() {
            path
        } else {
            path.set("stroke-dasharray", "4 3")
        }
    }

    fn render_card(&self, node: &LayoutNode, card_size: Size) -> svg_element::Group {
        let bounds = node.card_bounds(card_size);
        let person = node.person();

        let mut card = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CARD_RADIUS)
            .set("fill", self.node_fill.to_string())
            .set("fill-opacity", self.node_fill.alpha())
            .set("stroke", self.node_stroke.to_string())
            .set("stroke-width", 1.5);
        if node.placement() == Placement::Unconnected {
            card = card.set("stroke-dasharray", "6 4");
        }

        let mut lines = vec![(person.display_name(), NAME_FONT_SIZE, "bold")];
        if !node.spouses().is_empty() {
            let spouses: Vec<String> = node.spouses().iter().map(|s| s.display_name()).collect();
            lines.push((format!("& {}", spouses.join(", ")), DETAIL_FONT_SIZE, "normal"));
        }
        if let Some(lifespan) = person.lifespan() {
            lines.push((lifespan, DETAIL_FONT_SIZE, "normal"));
        }

        let line_step = bounds.height() / (lines.len() + 1) as f32;
        let mut group = svg_element::Group::new()
            .set("data-person-id", person.id().to_string())
            .add(card);
        for (i, (text, font_size, weight)) in lines.into_iter().enumerate() {
            group = group.add(
                svg_element::Text::new("")
                    .set("x", node.x())
                    .set("y", bounds.min_y() + line_step * (i + 1) as f32)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "central")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", font_size)
                    .set("font-weight", weight)
                    .add(SvgText::new(text)),
            );
        }

        group
    }
}

impl Exporter for Svg {
    fn export(&self, layout: &FamilyLayout) -> Result<String, Error> {
        let doc = self.render_document(layout);
        let output = doc.to_string();
        debug!(nodes = layout.len(), bytes = output.len(); "SVG document rendered");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use kindred_core::family::{Person, TreeNode};

    use super::*;
    use crate::layout::TreeLayoutEngine;

    fn sample_layout() -> FamilyLayout {
        let root = TreeNode::new(Person::new("s-root", "Edith", "Moss"))
            .with_spouse(Person::new("s-spouse", "Karl", "Moss"))
            .with_child(TreeNode::new(Person::new("s-a", "Ann", "Moss")))
            .with_child(TreeNode::new(
                Person::new("s-b", "Ben", "Moss").with_birth_date("1960-05-05"),
            ));
        TreeLayoutEngine::default().arrange(&[root], &[Person::new("s-loner", "Lou", "Nash")])
    }

    #[test]
    fn test_svg_contains_every_person() {
        let output = Svg::default().export(&sample_layout()).unwrap();

        assert!(output.contains("<svg"));
        assert!(output.contains("</svg>"));
        for name in ["Edith Moss", "Karl Moss", "Ann Moss", "Ben Moss", "b. 1960", "Lou Nash"] {
            assert!(output.contains(name), "missing {name}");
        }
        assert_eq!(output.matches("<path").count(), 2);
        assert_eq!(output.matches("stroke-dasharray").count(), 1);
    }

    #[test]
    fn test_adoptive_link_is_dashed() {
        let root = TreeNode::new(Person::new("d-root", "Vera", "Lund"))
            .with_child(TreeNode::new(Person::new("d-own", "Ola", "Lund")))
            .with_child(TreeNode::new(Person::new("d-adopted", "Kai", "Lund")).non_biological());
        let layout = TreeLayoutEngine::default().arrange(&[root], &[]);

        let output = Svg::default().export(&layout).unwrap();

        assert_eq!(output.matches("<path").count(), 2);
        assert_eq!(output.matches("stroke-dasharray=\"4 3\"").count(), 1);
    }

    #[test]
    fn test_style_colors_applied() {
        let style: StyleConfig = toml::from_str(
            r#"
            background_color = "ivory"
            connector_color = "red"
            "#,
        )
        .unwrap();
        let output = SvgBuilder::new()
            .with_style(&style)
            .build()
            .unwrap()
            .export(&sample_layout())
            .unwrap();

        assert!(output.contains("width=\"100%\""));
        assert!(output.contains("fill=\"ivory\""));
        assert!(output.contains("stroke=\"red\""));
    }

    #[test]
    fn test_translucent_fill_sets_opacity() {
        let style: StyleConfig = toml::from_str(r#"node_fill = "rgba(255, 255, 255, 0.5)""#).unwrap();
        let output = SvgBuilder::new()
            .with_style(&style)
            .build()
            .unwrap()
            .export(&sample_layout())
            .unwrap();

        assert!(output.contains("fill-opacity=\"0.5\""));
    }

    #[test]
    fn test_invalid_style_rejected() {
        let style: StyleConfig = toml::from_str(r#"node_fill = "glitter""#).unwrap();
        let err = SvgBuilder::new().with_style(&style).build().unwrap_err();
        assert!(matches!(err, Error::Render(ref msg) if msg.contains("node_fill")));
    }
}
