//! Error codes for taxonomy diagnostics.
//!
//! Codes are organized by phase:
//! - `E0xx` - JSON syntax errors
//! - `E1xx` - Structural errors in a taxonomy node
//! - `E2xx` - Warnings about ambiguous input

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E0xx)
    // =========================================================================
    /// Invalid JSON.
    ///
    /// The document could not be parsed as JSON at all.
    E001,

    // =========================================================================
    // Structural Errors (E1xx)
    // =========================================================================
    /// Node is not an object.
    ///
    /// Every taxonomy node, including each entry of `children`, must be a
    /// JSON object.
    E100,

    /// Missing name.
    ///
    /// A taxonomy node has no `name` key.
    E101,

    /// Name is not a string.
    E102,

    /// Empty name.
    ///
    /// The `name` is empty or contains only whitespace.
    E103,

    /// `children` is not an array.
    E104,

    /// `papers` is not an array.
    E105,

    /// Paper entry is not a string.
    E106,

    // =========================================================================
    // Warnings (E2xx)
    // =========================================================================
    /// Both children and papers present.
    ///
    /// A node lists sub-categories and papers at the same time. Only the
    /// papers are rendered.
    E200,
}

impl ErrorCode {
    /// Returns the string representation of the code (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON",
            ErrorCode::E100 => "node is not an object",
            ErrorCode::E101 => "missing name",
            ErrorCode::E102 => "name is not a string",
            ErrorCode::E103 => "empty name",
            ErrorCode::E104 => "children is not an array",
            ErrorCode::E105 => "papers is not an array",
            ErrorCode::E106 => "paper entry is not a string",
            ErrorCode::E200 => "both children and papers present",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
