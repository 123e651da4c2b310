//! CLI logic for the Kindred family-tree tool.
//!
//! Reads a JSON family document, lays it out and writes either an SVG
//! preview or the JSON node coordinates.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::fs;

use log::info;

use kindred::{FamilyTreeBuilder, KindredError};

/// Run the Kindred CLI application
///
/// # Errors
///
/// Returns `KindredError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Duplicate person ids
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), KindredError> {
    let format = args.output_format();
    info!(
        input_path = args.input,
        output_path = args.output,
        format:?;
        "Processing family tree"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = FamilyTreeBuilder::new(app_config);
    let family = builder.parse(&source)?;
    let layout = builder.layout(&family)?;
    let output = match format {
        Format::Svg => builder.render_svg(&layout)?,
        Format::Json => builder.render_json(&layout)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Family tree exported successfully");

    Ok(())
}
