//! Visual definitions for diagram nodes.
//!
//! - [`NodeStyle`] / [`NodeShape`] - per-node appearance
//! - [`StrokeDefinition`] - border color, width and dash pattern
//! - [`TextDefinition`] / [`Text`] - label style, measurement and rendering
//! - [`NodeBox`] - a styled node with its label, ready to draw
//! - [`LayeredOutput`] - z-ordered collection of SVG elements

mod layer;
mod node_box;
mod stroke;
mod style;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use node_box::NodeBox;
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use style::{NodeShape, NodeStyle};
pub use text::{FontEmphasis, Text, TextAlign, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that can measure itself and render to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders the drawable centered at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the outer size of the drawable.
    fn size(&self) -> Size;
}
