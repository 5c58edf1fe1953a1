//! Collector for accumulating diagnostics while walking a document.

use crate::error::{Diagnostic, ParseError};

/// Accumulates errors and warnings so that a single load reports every
/// problem in the document instead of only the first.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// - If there are errors, returns `Err(ParseError)` with the error
    ///   diagnostics only.
    /// - Otherwise returns the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            let errors = self
                .diagnostics
                .into_iter()
                .filter(|diag| diag.severity().is_error())
                .collect();
            Err(ParseError::new(errors))
        } else {
            Ok(self.diagnostics)
        }
    }
}
