//! Text definitions, measurement, and rendering for node labels.
//!
//! - [`TextDefinition`] - Reusable text style (font, size, color, emphasis, alignment)
//! - [`Text`] - A renderable label combining content with a [`TextDefinition`]
//!
//! Labels are measured with `cosmic-text` so that node boxes fit their text.
//! Multi-line labels (paper lists) are split on `\n` and rendered as one
//! `<tspan>` per line.
//!
//! ```
//! # use taxograph_core::draw::{TextDefinition, Text, FontEmphasis};
//! let mut style = TextDefinition::new();
//! style.set_font_size(14);
//! style.set_emphasis(FontEmphasis::Italic);
//!
//! let text = Text::new(&style, "Retrieval");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Arc, Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};
use log::{info, warn};
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Insets, Point, Size},
};

/// Font weight/slant used for a label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontEmphasis {
    #[default]
    Normal,
    Bold,
    Italic,
}

impl FontEmphasis {
    /// Returns the SVG `font-weight` value, if not the default.
    pub fn svg_font_weight(self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("bold"),
            _ => None,
        }
    }

    /// Returns the SVG `font-style` value, if not the default.
    pub fn svg_font_style(self) -> Option<&'static str> {
        match self {
            Self::Italic => Some("italic"),
            _ => None,
        }
    }
}

/// Horizontal alignment of label lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    #[default]
    Center,
    Left,
}

/// Text style configuration shared by labels of the same role.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    emphasis: FontEmphasis,
    align: TextAlign,
    padding: Insets,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_emphasis(&mut self, emphasis: FontEmphasis) {
        self.emphasis = emphasis;
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn emphasis(&self) -> FontEmphasis {
        self.emphasis
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 14,
            color: None,
            emphasis: FontEmphasis::Normal,
            align: TextAlign::Center,
            padding: Insets::default(),
        }
    }
}

/// A label ready to be measured and rendered.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Returns the label size including the definition's padding.
    pub fn calculate_size(&self) -> Size {
        let padding = self.definition.padding();
        self.calculate_size_without_padding().add_padding(padding)
    }

    fn calculate_size_without_padding(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let lines: Vec<&str> = self.content.lines().collect();
        if lines.is_empty() {
            return output;
        }

        let text_size = self.calculate_size_without_padding();
        let line_height = text_size.height() / lines.len() as f32;
        let y_offset = -(text_size.height() + line_height) / 2.0;

        let (anchor, x) = match self.definition.align() {
            TextAlign::Center => ("middle", position.x()),
            TextAlign::Left => ("start", position.x() - text_size.width() / 2.0),
        };

        let mut rendered_text = svg_element::Text::new("")
            .set("x", x)
            .set("y", position.y() + y_offset)
            .set("text-anchor", anchor)
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if let Some(weight) = self.definition.emphasis().svg_font_weight() {
            rendered_text = rendered_text.set("font-weight", weight);
        }
        if let Some(style) = self.definition.emphasis().svg_font_style() {
            rendered_text = rendered_text.set("font-style", style);
        }
        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", x)
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Shared font system used for label measurement.
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        // Points to pixels at standard DPI
        let font_size_px = text_def.font_size() as f32 * 1.33;
        let line_height = font_size_px * 1.15;
        let line_count = text.lines().count().max(1);

        // cosmic-text rejects a zero line height
        if line_height <= 0.0 {
            return estimate_text_size(text, font_size_px, line_height);
        }

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, estimating text size");
            return estimate_text_size(text, font_size_px, line_height);
        };

        let metrics = Metrics::new(font_size_px, line_height);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = attrs_for(text_def);
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let max_width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0_f32, f32::max);

        if max_width <= 0.0 {
            // No usable fonts on this system
            return estimate_text_size(text, font_size_px, line_height);
        }

        Size::new(max_width, line_count as f32 * line_height)
    }
}

fn attrs_for(text_def: &TextDefinition) -> Attrs<'_> {
    let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
    match text_def.emphasis() {
        FontEmphasis::Normal => attrs,
        FontEmphasis::Bold => attrs.weight(Weight::BOLD),
        FontEmphasis::Italic => attrs.style(Style::Italic),
    }
}

/// Character-count based size estimate.
fn estimate_text_size(text: &str, font_size_px: f32, line_height: f32) -> Size {
    let longest = text
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let line_count = text.lines().count().max(1);
    Size::new(
        longest as f32 * font_size_px * 0.55,
        line_count as f32 * line_height,
    )
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
