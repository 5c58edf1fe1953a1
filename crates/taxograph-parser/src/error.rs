//! Error and diagnostic system for the taxonomy loader.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled source spans for syntax errors
//! - JSON paths locating structural errors in the document
//! - Severity levels
//! - A collector that accumulates every problem in one pass
//!
//! # Overview
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, source labels, JSON path, and help text. Failed loads return a
//! [`ParseError`] holding every error diagnostic that was collected.
//!
//! # Example
//!
//! ```
//! # use taxograph_parser::error::{Diagnostic, ErrorCode};
//! # use taxograph_parser::Span;
//!
//! let diag = Diagnostic::error("node has no `name`")
//!     .with_code(ErrorCode::E101)
//!     .with_path("$.children[2]")
//!     .with_help("add a `name` string to every node");
//!
//! assert_eq!(diag.to_string(), "error[E101]: node has no `name` at $.children[2]");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
