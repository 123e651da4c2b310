//! Exporters turning a [`FamilyLayout`] into a document.

pub mod json;
pub mod svg;

use std::fmt;

use crate::layout::FamilyLayout;

/// A single exporter interface shared by every output format.
pub trait Exporter {
    /// Renders the layout into the exporter's textual format.
    fn export(&self, layout: &FamilyLayout) -> Result<String, Error>;
}

#[derive(Debug)]
pub enum Error {
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
