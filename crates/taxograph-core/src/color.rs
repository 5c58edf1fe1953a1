//! CSS colors for node fills, borders and label text.
//!
//! [`Color`] wraps the `DynamicColor` of the color crate. The native SVG
//! backend writes it in its CSS form; Graphviz gets [`Color::to_hex`].

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parses any CSS color: a name, `#rgb`/`#rrggbb`, `rgb(...)` and so on.
    ///
    /// ```
    /// use taxograph_core::color::Color;
    ///
    /// assert!(Color::new("#8ecae6").is_ok());
    /// assert!(Color::new("tomato").is_ok());
    /// assert!(Color::new("nope").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// `#rrggbb`, or `#rrggbbaa` for a translucent color.
    ///
    /// ```
    /// use taxograph_core::color::Color;
    ///
    /// assert_eq!(Color::new("#8ecae6").unwrap().to_hex(), "#8ecae6");
    /// assert_eq!(Color::new("white").unwrap().to_hex(), "#ffffff");
    /// ```
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        let hex = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
        if rgba.a == u8::MAX {
            hex
        } else {
            format!("{hex}{:02x}", rgba.a)
        }
    }

    /// Opacity between 0.0 and 1.0, written as `fill-opacity` and
    /// `stroke-opacity` in SVG.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_invalid_color_names_input() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(Color::default().to_string(), "black");
        assert_eq!(Color::default().alpha(), 1.0);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::new("#ffb703").unwrap().to_hex(), "#ffb703");
        assert_eq!(Color::new("black").unwrap().to_hex(), "#000000");
        assert_eq!(Color::new("rgb(255, 0, 0)").unwrap().to_hex(), "#ff0000");
    }

    #[test]
    fn test_translucent_color() {
        let color = Color::new("rgba(255, 0, 0, 0)").unwrap();
        assert_eq!(color.to_hex(), "#ff000000");
        assert_eq!(color.alpha(), 0.0);
    }

    #[test]
    fn test_palette_colors_dedupe_in_sets() {
        let colors: HashSet<Color> = ["red", "red", "blue"]
            .into_iter()
            .map(|name| Color::new(name).unwrap())
            .collect();
        assert_eq!(colors.len(), 2);
    }
}
