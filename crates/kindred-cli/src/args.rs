//! Command-line argument definitions for the Kindred CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Static SVG preview
    Svg,
    /// Node coordinates for an external renderer
    Json,
}

impl Format {
    /// Picks the format from the output file extension; `.json` selects JSON,
    /// anything else falls back to SVG.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Svg,
        }
    }
}

/// Command-line arguments for the Kindred family-tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input family document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The requested format, or the one implied by the output path.
    pub fn output_format(&self) -> Format {
        self.format
            .unwrap_or_else(|| Format::from_path(&self.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path("tree.json"), Format::Json);
        assert_eq!(Format::from_path("tree.JSON"), Format::Json);
        assert_eq!(Format::from_path("tree.svg"), Format::Svg);
        assert_eq!(Format::from_path("tree"), Format::Svg);
    }

    #[test]
    fn test_explicit_format_wins() {
        let args = Args::parse_from(["kindred", "in.json", "-o", "out.json", "-f", "svg"]);
        assert_eq!(args.output_format(), Format::Svg);

        let args = Args::parse_from(["kindred", "in.json", "-o", "out.json"]);
        assert_eq!(args.output_format(), Format::Json);
        assert_eq!(args.log_level, "info");
    }
}
