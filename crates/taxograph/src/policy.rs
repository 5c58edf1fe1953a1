//! Presentation policy: which color and style each node gets.
//!
//! [`StylePolicy`] is resolved once from the [`StyleConfig`] when the builder
//! is created, so invalid colors are reported before any rendering starts.
//! After that every lookup is infallible.

use indexmap::IndexMap;
use log::debug;

use taxograph_core::{
    color::Color,
    draw::{
        FontEmphasis, NodeShape, NodeStyle, StrokeDefinition, TextAlign, TextDefinition,
    },
    geometry::Insets,
};

use crate::{TaxographError, config::StyleConfig};

const ROOT_STROKE_WIDTH: f32 = 2.5;
const NODE_STROKE_WIDTH: f32 = 1.0;

/// Where a node's color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// The color table has an entry for this node's name.
    Mapped,
    /// Palette slot of a root child without a table entry.
    Palette,
    /// Passed down unchanged from an ancestor.
    Inherited,
}

/// A resolved color together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeColor {
    color: Color,
    source: ColorSource,
}

impl NodeColor {
    pub fn new(color: Color, source: ColorSource) -> Self {
        Self { color, source }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn source(&self) -> ColorSource {
        self.source
    }

    /// The same color as seen by a descendant.
    pub fn inherited(self) -> Self {
        Self {
            source: ColorSource::Inherited,
            ..self
        }
    }
}

/// Parsed style settings with per-role style constructors.
#[derive(Debug, Clone)]
pub struct StylePolicy {
    palette: Vec<Color>,
    colors: IndexMap<String, Color>,
    background: Option<Color>,
    root_fill: Color,
    root_text: Color,
    leaf_text: Color,
    content_fill: Color,
    edge_color: Color,
    font_family: String,
    font_size: u16,
}

impl StylePolicy {
    /// Parses every color of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxographError::Config`] for an unparsable color, an empty
    /// palette or a zero font size.
    pub fn from_config(config: &StyleConfig) -> Result<Self, TaxographError> {
        if config.font_size() == 0 {
            return Err(TaxographError::Config(
                "style.font_size must be at least 1".to_string(),
            ));
        }

        if config.palette().is_empty() {
            return Err(TaxographError::Config(
                "style.palette must contain at least one color".to_string(),
            ));
        }

        let palette = config
            .palette()
            .iter()
            .map(|color| parse_color("style.palette", color))
            .collect::<Result<Vec<_>, _>>()?;

        let colors = config
            .colors()
            .iter()
            .map(|(name, color)| {
                parse_color(&format!("style.colors.{name}"), color).map(|c| (name.clone(), c))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        let background = config
            .background_color()
            .map(|color| parse_color("style.background_color", color))
            .transpose()?;

        debug!(
            palette_len = palette.len(),
            color_table_len = colors.len();
            "Style policy resolved"
        );

        Ok(Self {
            palette,
            colors,
            background,
            root_fill: parse_color("style.root_fill", config.root_fill())?,
            root_text: parse_color("style.root_text_color", config.root_text_color())?,
            leaf_text: parse_color("style.leaf_text_color", config.leaf_text_color())?,
            content_fill: parse_color("style.content_fill", config.content_fill())?,
            edge_color: parse_color("style.edge_color", config.edge_color())?,
            font_family: config.font_family().to_string(),
            font_size: config.font_size(),
        })
    }

    /// Color of the `index`-th child of the root.
    pub fn top_level_color(&self, name: &str, index: usize) -> NodeColor {
        match self.colors.get(name) {
            Some(&color) => NodeColor::new(color, ColorSource::Mapped),
            None => NodeColor::new(
                self.palette[index % self.palette.len()],
                ColorSource::Palette,
            ),
        }
    }

    /// Color of a node below the root's children: the table entry for
    /// `name`, or `inherited` passed through.
    pub fn resolve_color(&self, name: &str, inherited: NodeColor) -> NodeColor {
        match self.colors.get(name) {
            Some(&color) => NodeColor::new(color, ColorSource::Mapped),
            None => inherited.inherited(),
        }
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn edge_color(&self) -> Color {
        self.edge_color
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Bold box with the dark root fill and light text.
    pub fn root_style(&self) -> NodeStyle {
        let mut text = self.text_definition();
        text.set_emphasis(FontEmphasis::Bold);
        text.set_color(Some(self.root_text));
        NodeStyle::new(
            NodeShape::Box,
            StrokeDefinition::solid(Color::default(), ROOT_STROKE_WIDTH),
            text,
        )
        .with_fill(self.root_fill)
    }

    /// Rounded box filled with the node color, for a category with children.
    ///
    /// Solid when the color table maps the node's name, dashed with an
    /// italic label otherwise.
    pub fn category_style(&self, color: NodeColor) -> NodeStyle {
        let mut text = self.text_definition();
        let stroke = match color.source() {
            ColorSource::Mapped => StrokeDefinition::solid(color.color(), NODE_STROKE_WIDTH),
            ColorSource::Palette | ColorSource::Inherited => {
                text.set_emphasis(FontEmphasis::Italic);
                StrokeDefinition::dashed(self.edge_color, NODE_STROKE_WIDTH)
            }
        };
        NodeStyle::new(NodeShape::RoundedBox, stroke, text).with_fill(color.color())
    }

    /// Solid rounded box filled with the node color, for a category that
    /// lists papers.
    pub fn listing_style(&self, color: NodeColor) -> NodeStyle {
        NodeStyle::new(
            NodeShape::RoundedBox,
            StrokeDefinition::solid(color.color(), NODE_STROKE_WIDTH),
            self.text_definition(),
        )
        .with_fill(color.color())
    }

    /// Italic ellipse filled with the node color.
    pub fn leaf_style(&self, color: NodeColor) -> NodeStyle {
        let mut text = self.text_definition();
        text.set_emphasis(FontEmphasis::Italic);
        text.set_color(Some(self.leaf_text));
        NodeStyle::new(
            NodeShape::Ellipse,
            StrokeDefinition::solid(color.color(), NODE_STROKE_WIDTH),
            text,
        )
        .with_fill(color.color())
    }

    /// Left-aligned note on a neutral background.
    pub fn content_style(&self) -> NodeStyle {
        let mut text = self.text_definition();
        text.set_align(TextAlign::Left);
        text.set_font_size(self.font_size.saturating_sub(2).max(1));
        NodeStyle::new(
            NodeShape::Note,
            StrokeDefinition::solid(self.edge_color, NODE_STROKE_WIDTH),
            text,
        )
        .with_fill(self.content_fill)
    }

    fn text_definition(&self) -> TextDefinition {
        let mut text = TextDefinition::new();
        text.set_font_family(&self.font_family);
        text.set_font_size(self.font_size);
        text.set_padding(Insets::new(8.0, 12.0, 8.0, 12.0));
        text
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color, TaxographError> {
    Color::new(value).map_err(|err| TaxographError::Config(format!("{key}: {err}")))
}
