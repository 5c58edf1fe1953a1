//! Node style records.
//!
//! A [`NodeStyle`] is everything a rendering backend needs to know about how
//! one diagram node looks: its [`NodeShape`], fill, border stroke, and label
//! text style. Styles are plain values; the policy that picks them per node
//! role lives in the `taxograph` crate.

use crate::{
    color::Color,
    draw::{StrokeDefinition, StrokeStyle, TextDefinition},
};

/// Outline of a diagram node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// Sharp-cornered rectangle
    Box,
    /// Rectangle with rounded corners
    #[default]
    RoundedBox,
    Ellipse,
    /// Rectangle with a folded top-right corner
    Note,
}

impl NodeShape {
    /// Returns the Graphviz shape keyword.
    pub fn to_dot_value(self) -> &'static str {
        match self {
            Self::Box | Self::RoundedBox => "box",
            Self::Ellipse => "ellipse",
            Self::Note => "note",
        }
    }

    /// Corner radius used by the SVG renderer.
    pub fn corner_radius(self) -> f32 {
        match self {
            Self::RoundedBox => 8.0,
            _ => 0.0,
        }
    }
}

/// Complete visual description of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    shape: NodeShape,
    fill: Option<Color>,
    stroke: StrokeDefinition,
    text: TextDefinition,
}

impl NodeStyle {
    pub fn new(shape: NodeShape, stroke: StrokeDefinition, text: TextDefinition) -> Self {
        Self {
            shape,
            fill: None,
            stroke,
            text,
        }
    }

    /// Sets the fill color (builder style).
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn text(&self) -> &TextDefinition {
        &self.text
    }

    /// Returns true if the border is drawn with a dash pattern.
    pub fn is_dashed(&self) -> bool {
        self.stroke.style() != StrokeStyle::Solid
    }
}
