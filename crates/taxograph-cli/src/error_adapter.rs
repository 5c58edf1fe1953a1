//! Error adapter for converting TaxographError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`taxograph_parser::error::ParseError`] contains multiple
//! diagnostics, each diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use taxograph::TaxographError;
use taxograph_parser::error::{Diagnostic, Severity};

/// Adapter for a single taxonomy diagnostic.
///
/// The JSON path of the offending node, when known, is appended to the
/// message so that shape errors without a source span still point somewhere.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source text for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())?;
        if let Some(path) = self.diag.path() {
            write!(f, " at {path}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`TaxographError`] variants.
///
/// Handles errors without source locations: missing input, I/O,
/// configuration, graph, layout and export errors.
pub struct ErrorAdapter<'a>(pub &'a TaxographError);

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
            TaxographError::InputNotFound(_) => "taxograph::input",
            TaxographError::Io(_) => "taxograph::io",
            TaxographError::Parse { .. } => return None,
            TaxographError::Config(_) => "taxograph::config",
            TaxographError::Graph(_) => "taxograph::graph",
            TaxographError::Layout(_) => "taxograph::layout",
            TaxographError::Export(_) => "taxograph::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            TaxographError::InputNotFound(_) => "pass the taxonomy file with -i/--input",
            TaxographError::Export(_) => {
                "supported output extensions are svg, png, pdf, jpg/jpeg and dot/gv"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a taxonomy [`Span`](taxograph_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: taxograph_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`TaxographError`] into a list of reportable errors.
///
/// For [`TaxographError::Parse`], this returns one [`Reportable`] for each
/// diagnostic in the error. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &TaxographError) -> Vec<Reportable<'_>> {
    match err {
        TaxographError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use taxograph_parser::{
        Span,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("invalid JSON")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..5), "here")
            .with_help("check for a missing comma");
        let parse_err = ParseError::from(diag);
        let err = TaxographError::new_parse_error(parse_err, "hello");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "invalid JSON");
                assert_eq!(d.code().unwrap().to_string(), "E001");
                assert_eq!(d.help().unwrap().to_string(), "check for a missing comma");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_path_is_part_of_message() {
        let diag = Diagnostic::error("node has no `name`")
            .with_code(ErrorCode::E101)
            .with_path("$.children[2]");
        let err = TaxographError::new_parse_error(ParseError::from(diag), "{}");

        let reportables = to_reportables(&err);
        assert_eq!(
            reportables[0].to_string(),
            "node has no `name` at $.children[2]"
        );
        assert!(reportables[0].labels().is_none());
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("first error")
                .with_code(ErrorCode::E101)
                .with_path("$.children[0]"),
            Diagnostic::error("second error")
                .with_code(ErrorCode::E103)
                .with_path("$.children[1]")
                .with_help("help for second"),
            Diagnostic::error("third error").with_label(Span::new(20..25), "third"),
        ];
        let parse_err = ParseError::from(diags);
        let err = TaxographError::new_parse_error(parse_err, "source text here...");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 3);
        assert_eq!(reportables[0].to_string(), "first error at $.children[0]");
        assert_eq!(reportables[1].to_string(), "second error at $.children[1]");
        assert_eq!(reportables[2].to_string(), "third error");
    }

    #[test]
    fn test_non_parse_error() {
        let err = TaxographError::InputNotFound(PathBuf::from("taxonomy.json"));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "input file not found: taxonomy.json");
                assert_eq!(e.code().unwrap().to_string(), "taxograph::input");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_error_codes_per_kind() {
        let err = TaxographError::Layout("diagram has no nodes".to_string());
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.code().unwrap().to_string(), "taxograph::layout");
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_primary_flag_on_labels() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");

        let adapter = DiagnosticAdapter::new(&diag, "some source text");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }
}
