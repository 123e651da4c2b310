//! Kindred - hierarchical layout for family trees.
//!
//! Loads a family (people plus relationships), derives the nested family
//! forest, lays it out generation by generation, and exports the result as
//! JSON coordinates or a static SVG preview.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use kindred_core::{color, family, geometry, identifier};

pub use error::KindredError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use family::FamilyDocument;
use layout::{FamilyLayout, TreeLayoutEngine};
use structure::FamilyGraph;

/// Builder for loading, laying out and rendering family trees.
///
/// # Examples
///
/// ```rust
/// use kindred::{FamilyTreeBuilder, config::AppConfig};
///
/// let source = r#"{
///     "people": [
///         {"id": "gran", "first_name": "Edna"},
///         {"id": "mum", "first_name": "Joan"}
///     ],
///     "relationships": [
///         {"person_id": "gran", "related_person_id": "mum", "relationship_type": "parent"}
///     ]
/// }"#;
///
/// let builder = FamilyTreeBuilder::new(AppConfig::default());
/// let family = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&family).expect("Failed to lay out");
/// assert_eq!(layout.len(), 2);
///
/// let svg = builder.render_svg(&layout).expect("Failed to render");
/// assert!(svg.contains("Edna"));
/// ```
#[derive(Default)]
pub struct FamilyTreeBuilder {
    config: AppConfig,
}

impl FamilyTreeBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON family document.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Parse`] if the source is not a valid family document.
    pub fn parse(&self, source: &str) -> Result<FamilyDocument, KindredError> {
        info!("Parsing family document");

        let family: FamilyDocument = serde_json::from_str(source)
            .map_err(|err| KindredError::new_parse_error(err, source))?;

        debug!(
            people = family.people.len(),
            relationships = family.relationships.len();
            "Family document parsed"
        );
        Ok(family)
    }

    /// Build the family forest and lay it out.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Config`] for unusable layout settings and
    /// [`KindredError::Graph`] when the family contains duplicate ids.
    pub fn layout(&self, family: &FamilyDocument) -> Result<FamilyLayout, KindredError> {
        self.config.validate().map_err(KindredError::Config)?;

        info!("Building family structure");
        let graph = FamilyGraph::new(&family.people, &family.relationships)?;
        let forest = graph.forest();
        trace!(forest:?; "Family forest");

        let engine = TreeLayoutEngine::new(*self.config.layout());
        let layout = engine.arrange(&forest, &family.people);
        info!(nodes = layout.len(); "Layout calculated");

        Ok(layout)
    }

    /// Render a layout to an SVG string using the configured style.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Export`] if the style is invalid.
    pub fn render_svg(&self, layout: &FamilyLayout) -> Result<String, KindredError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let svg = exporter.export(layout)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a layout to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`KindredError::Export`] if serialization fails.
    pub fn render_json(&self, layout: &FamilyLayout) -> Result<String, KindredError> {
        let json = export::json::Json::new().export(layout)?;
        info!("JSON rendered successfully");
        Ok(json)
    }
}
