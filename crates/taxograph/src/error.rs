//! Error types for Taxograph operations.
//!
//! [`TaxographError`] wraps every failure of the load, build, layout, and
//! export pipeline.

use std::{io, path::PathBuf};

use thiserror::Error;

use taxograph_core::semantic::DiagramError;
use taxograph_parser::error::ParseError;

/// The main error type for Taxograph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the collected
/// diagnostics so that reporters can show source snippets for syntax errors.
#[derive(Debug, Error)]
pub enum TaxographError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(#[from] DiagramError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TaxographError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TaxographError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
