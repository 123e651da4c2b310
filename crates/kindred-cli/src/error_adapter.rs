//! Error adapter for converting KindredError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. JSON parse errors
//! carry a line and column, which are turned into a labelled source span.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use kindred::KindredError;

/// Adapter for a JSON parse error together with the document it came from.
pub struct ParseAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> ParseAdapter<'a> {
    /// Create a new parse adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the offending character, clamped to the source.
    fn span(&self) -> SourceSpan {
        let offset = line_column_to_offset(self.src, self.err.line(), self.err.column());
        let len = self.src[offset..].chars().next().map_or(0, char::len_utf8);
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid family document")
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("kindred::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "expected {\"people\": [...], \"relationships\": [...]} with snake_case fields",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(self.err.to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-parse [`KindredError`] variants.
///
/// This adapter handles errors that don't have source information,
/// such as I/O errors, graph errors, configuration errors, and export errors.
pub struct ErrorAdapter<'a>(pub &'a KindredError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            KindredError::Io(_) => "kindred::io",
            KindredError::Parse { .. } => "kindred::parse",
            KindredError::Graph(_) => "kindred::graph",
            KindredError::Config(_) => "kindred::config",
            KindredError::Export(_) => "kindred::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error pointing into the input document.
    Parse(ParseAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Converts serde_json's 1-based line and column into a byte offset.
///
/// Column 0 (reported at end of input) maps to the start of the line.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let line_text = src[line_start..].split('\n').next().unwrap_or_default();

    let column_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(line_text.len(), |(idx, _)| idx);
    line_start + column_offset
}

/// Convert a [`KindredError`] into a list of reportable errors.
pub fn to_reportables(err: &KindredError) -> Vec<Reportable<'_>> {
    match err {
        KindredError::Parse { err: parse_err, src } => {
            vec![Reportable::Parse(ParseAdapter::new(parse_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use kindred::FamilyTreeBuilder;

    use super::*;

    #[test]
    fn test_parse_error_is_labelled() {
        let src = "{\n  \"people\": [\n    {\"id\": 42}\n  ]\n}";
        let err = FamilyTreeBuilder::default().parse(src).unwrap_err();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Parse(p) => {
                assert_eq!(p.to_string(), "Invalid family document");
                let labels: Vec<_> = p.labels().unwrap().collect();
                assert_eq!(labels.len(), 1);
                assert!(labels[0].primary());
                // The label lands on the third line, inside the bad object.
                let offset = labels[0].offset();
                assert!(offset > src.find("{\"id\"").unwrap());
                assert!(offset < src.rfind(']').unwrap());
            }
            Reportable::Error(_) => panic!("Expected Parse"),
        }
    }

    #[test]
    fn test_non_parse_error() {
        let err = KindredError::Graph("duplicate person id 'a'".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Graph error: duplicate person id 'a'");
                assert_eq!(e.code().unwrap().to_string(), "kindred::graph");
            }
            Reportable::Parse(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_line_column_to_offset() {
        let src = "ab\ncdé\nf";
        assert_eq!(line_column_to_offset(src, 1, 1), 0);
        assert_eq!(line_column_to_offset(src, 2, 2), 4);
        assert_eq!(line_column_to_offset(src, 2, 3), 5);
        assert_eq!(line_column_to_offset(src, 3, 0), 8);
        assert_eq!(line_column_to_offset(src, 9, 9), src.len());
    }
}
