//! Error types for Kindred operations.
//!
//! This module provides the main error type [`KindredError`] which wraps
//! the error conditions that can occur while loading, structuring and
//! exporting a family tree. The layout functions themselves are total and
//! never fail.

use std::io;

use thiserror::Error;

/// The main error type for Kindred operations.
///
/// The `Parse` variant keeps the source text next to the JSON error so the
/// CLI can point at the offending line.
#[derive(Debug, Error)]
pub enum KindredError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for KindredError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl KindredError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
