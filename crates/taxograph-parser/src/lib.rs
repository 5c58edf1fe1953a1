//! # Taxograph Parser
//!
//! Loads a taxonomy document and validates it into a
//! [`TaxonomyNode`] tree.
//!
//! A document is a JSON object with a `name` string and at most one of
//! `children` (an array of nodes) or `papers` (an array of titles):
//!
//! ```
//! # use taxograph_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "name": "Root",
//!         "children": [{"name": "A", "papers": ["P1", "P2"]}]
//!     }"#;
//!
//!     let tree = parse(source)?;
//!     assert_eq!(tree.node_count(), 2);
//!     Ok(())
//! }
//! ```
//!
//! Loading runs in two steps:
//!
//! 1. **Syntax** - `serde_json` reads the text into a value tree
//! 2. **Elaborate** - the value tree is checked node by node and turned into
//!    [`TaxonomyNode`]s, collecting every problem along the way

mod elaborate;
pub mod error;
mod span;

pub use span::Span;

use log::{debug, warn};
use serde_json::Value;

use taxograph_core::taxonomy::TaxonomyNode;

use elaborate::Elaborator;
use error::{Diagnostic, ErrorCode, ParseError};

/// JSON path of the document root.
const ROOT_PATH: &str = "$";

/// Parse a taxonomy document.
///
/// Warnings are logged and otherwise dropped. Use [`parse_with_warnings`] to
/// inspect them.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying every error diagnostic if the document
/// is not valid JSON or does not describe a valid taxonomy.
pub fn parse(source: &str) -> Result<TaxonomyNode, ParseError> {
    let (tree, warnings) = parse_with_warnings(source)?;
    for warning in &warnings {
        warn!(code:? = warning.code(), path:? = warning.path(); "{}", warning.message());
    }
    Ok(tree)
}

/// Parse a taxonomy document, returning the tree with any warnings.
///
/// # Errors
///
/// See [`parse`].
///
/// # Example
///
/// ```
/// # use taxograph_parser::{parse_with_warnings, error::ErrorCode};
/// let source = r#"{"name": "A", "children": [{"name": "B"}], "papers": ["P1"]}"#;
/// let (tree, warnings) = parse_with_warnings(source).unwrap();
///
/// assert!(tree.papers().is_some());
/// assert_eq!(warnings[0].code(), Some(ErrorCode::E200));
/// ```
pub fn parse_with_warnings(source: &str) -> Result<(TaxonomyNode, Vec<Diagnostic>), ParseError> {
    let value: Value = serde_json::from_str(source).map_err(|err| syntax_error(source, &err))?;
    debug!("Document parsed as JSON");

    let mut elaborator = Elaborator::new();
    let tree = elaborator.node(&value, ROOT_PATH);
    let warnings = elaborator.into_collector().finish()?;

    match tree {
        Some(tree) => {
            debug!(
                nodes = tree.node_count(),
                depth = tree.depth(),
                warnings = warnings.len();
                "Taxonomy elaborated"
            );
            Ok((tree, warnings))
        }
        // The collector only succeeds without a tree if elaboration bailed
        // without reporting, which would be a bug in the walker.
        None => Err(Diagnostic::error("taxonomy could not be loaded")
            .with_path(ROOT_PATH)
            .into()),
    }
}

fn syntax_error(source: &str, err: &serde_json::Error) -> ParseError {
    let span = Span::from_line_column(source, err.line(), err.column());
    let message = match err.classify() {
        serde_json::error::Category::Eof => "unexpected end of input",
        serde_json::error::Category::Data => "JSON value has the wrong type",
        serde_json::error::Category::Io | serde_json::error::Category::Syntax => "invalid JSON",
    };
    Diagnostic::error(message)
        .with_code(ErrorCode::E001)
        .with_label(span, err.to_string())
        .with_help("the taxonomy must be a single JSON object")
        .into()
}
