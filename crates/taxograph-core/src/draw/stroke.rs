//! Node border strokes.
//!
//! A category whose name has no explicit color mapping is outlined with a
//! [`StrokeStyle::Dashed`] border. Every other node border is solid.
//!
//! ```
//! use taxograph_core::draw::{StrokeDefinition, StrokeStyle};
//! use taxograph_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let border = StrokeDefinition::dashed(Color::new("black").unwrap(), 1.5);
//! assert_eq!(border.style(), StrokeStyle::Dashed);
//!
//! let rect = taxograph_core::apply_stroke!(svg_element::Rectangle::new(), &border);
//! assert!(rect.to_string().contains("stroke-dasharray=\"5,5\""));
//! ```

use crate::color::Color;

/// Border pattern of a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// SVG `stroke-dasharray` value; solid borders carry none.
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// Border color, width and pattern of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            ..Self::solid(color, width)
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-opacity`, `stroke-width` and, for dashed borders,
/// `stroke-dasharray` on an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let element = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width());
        match stroke.style().dasharray() {
            Some(pattern) => element.set("stroke-dasharray", pattern),
            None => element,
        }
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element::Ellipse;

    use super::*;

    #[test]
    fn test_default_border_is_thin_black_solid() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_dashed_keeps_color_and_width() {
        let red = Color::new("red").unwrap();
        let dashed = StrokeDefinition::dashed(red, 1.5);
        assert_eq!(dashed.color(), red);
        assert_eq!(dashed.width(), 1.5);
        assert_eq!(dashed.style(), StrokeStyle::Dashed);
        assert_eq!(dashed.style().dasharray(), Some("5,5"));
        assert_eq!(StrokeStyle::Solid.dasharray(), None);
    }

    #[test]
    fn test_apply_stroke_attributes() {
        let red = Color::new("red").unwrap();

        let solid = apply_stroke!(Ellipse::new(), &StrokeDefinition::solid(red, 2.0)).to_string();
        assert!(solid.contains("stroke=\"red\""));
        assert!(solid.contains("stroke-width=\"2\""));
        assert!(!solid.contains("stroke-dasharray"));

        let dashed = apply_stroke!(Ellipse::new(), &StrokeDefinition::dashed(red, 2.0)).to_string();
        assert!(dashed.contains("stroke-dasharray=\"5,5\""));
    }
}
