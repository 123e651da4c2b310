//! Configuration types for Kindred family-tree layout and rendering.
//!
//! This module provides configuration structures that control how family
//! trees are laid out and styled. All types implement [`serde::Deserialize`]
//! so they can be loaded from TOML or any other serde format; every field is
//! optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Node geometry and spacing used by the layout engine.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use kindred::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 200.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use kindred_core::{color::Color, geometry::Size};

/// Default width of a person box.
pub const DEFAULT_NODE_WIDTH: f32 = 200.0;
/// Default height of a person box.
pub const DEFAULT_NODE_HEIGHT: f32 = 120.0;
/// Default gap between sibling subtrees and grid columns.
pub const DEFAULT_HORIZONTAL_SPACING: f32 = 50.0;
/// Default gap between grid rows.
pub const DEFAULT_VERTICAL_SPACING: f32 = 80.0;
/// Default distance between generations.
pub const DEFAULT_LEVEL_HEIGHT: f32 = 200.0;
/// Default viewport width assumed when packing unconnected people.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1200.0;
/// Default padding between the layout and the canvas edge.
pub const DEFAULT_CANVAS_PADDING: f32 = 50.0;
/// Default margin added around every box when checking for collisions.
pub const DEFAULT_COLLISION_BUFFER: f32 = 10.0;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks that every value can actually be used.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value: a non-positive node
    /// dimension, a negative spacing, or a color string that does not parse.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()?;
        self.style.validate()
    }
}

/// Fixed geometry used by the layout engine.
///
/// All distances are in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    level_height: f32,
    viewport_width: f32,
    canvas_padding: f32,
    collision_buffer: f32,
    auto_space: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            level_height: DEFAULT_LEVEL_HEIGHT,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            canvas_padding: DEFAULT_CANVAS_PADDING,
            collision_buffer: DEFAULT_COLLISION_BUFFER,
            auto_space: true,
        }
    }
}

impl LayoutConfig {
    /// Sets the person box size.
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_width = size.width();
        self.node_height = size.height();
        self
    }

    /// Sets the horizontal and vertical spacing.
    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    /// Sets the distance between generations.
    pub fn with_level_height(mut self, level_height: f32) -> Self {
        self.level_height = level_height;
        self
    }

    /// Sets the viewport width assumed by the unconnected grid.
    pub fn with_viewport_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    /// Enables or disables the auto-spacing pass of the layout pipeline.
    pub fn with_auto_space(mut self, enabled: bool) -> Self {
        self.auto_space = enabled;
        self
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Returns the person box size.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn level_height(&self) -> f32 {
        self.level_height
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn canvas_padding(&self) -> f32 {
        self.canvas_padding
    }

    pub fn collision_buffer(&self) -> f32 {
        self.collision_buffer
    }

    pub fn auto_space(&self) -> bool {
        self.auto_space
    }

    /// Number of columns in the unconnected-people grid, never less than one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kindred::config::LayoutConfig;
    /// assert_eq!(LayoutConfig::default().grid_columns(), 4);
    /// assert_eq!(LayoutConfig::default().with_viewport_width(10.0).grid_columns(), 1);
    /// ```
    pub fn grid_columns(&self) -> usize {
        let slot = self.node_width + self.horizontal_spacing;
        if slot <= 0.0 {
            return 1;
        }
        let columns = (self.viewport_width / slot).floor();
        if columns.is_finite() && columns >= 1.0 {
            columns as usize
        } else {
            1
        }
    }

    fn validate(&self) -> Result<(), String> {
        let positive = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("level_height", self.level_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("layout.{name} must be positive, got {value}"));
            }
        }

        let non_negative = [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("viewport_width", self.viewport_width),
            ("canvas_padding", self.canvas_padding),
            ("collision_buffer", self.collision_buffer),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("layout.{name} must not be negative, got {value}"));
            }
        }

        Ok(())
    }
}

/// Visual styling configuration for rendered family trees.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    node_fill: Option<String>,
    #[serde(default)]
    node_stroke: Option<String>,
    #[serde(default)]
    connector_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background_color", self.background_color.as_deref())
    }

    /// Returns the parsed person box fill color, if configured.
    pub fn node_fill(&self) -> Result<Option<Color>, String> {
        parse_color("node_fill", self.node_fill.as_deref())
    }

    /// Returns the parsed person box outline color, if configured.
    pub fn node_stroke(&self) -> Result<Option<Color>, String> {
        parse_color("node_stroke", self.node_stroke.as_deref())
    }

    /// Returns the parsed parent/child connector color, if configured.
    pub fn connector_color(&self) -> Result<Option<Color>, String> {
        parse_color("connector_color", self.connector_color.as_deref())
    }

    fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.node_fill()?;
        self.node_stroke()?;
        self.connector_color()?;
        Ok(())
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid style.{field} in config: {err}"))
}
