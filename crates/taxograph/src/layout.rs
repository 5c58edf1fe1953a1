//! Layout for the native SVG backend.
//!
//! Assigns every diagram node a rectangle on the canvas. The Graphviz
//! backend does its own layout and never calls into this module.
//!
//! # Pipeline Position
//!
//! ```text
//! TaxonomyNode
//!     ↓ structure
//! Diagram
//!     ↓ layout (this module)
//! TreeLayout
//!     ↓ export
//! Output bytes
//! ```

mod tree;

pub use tree::{LayoutEngine, TreeLayout};
