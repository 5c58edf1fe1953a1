//! Configuration types for Taxograph rendering.
//!
//! All types implement [`serde::Deserialize`] and default every field, so a
//! config file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`StyleConfig`] - Colors, fonts, and the name-keyed color table.
//! - [`LabelConfig`] - Label truncation limits.
//! - [`LayoutConfig`] - Spacing used by the native tree layout.
//! - [`ExportConfig`] - Backend selection for SVG output.
//!
//! # Example
//!
//! ```
//! # use taxograph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().palette().len(), 4);
//! assert_eq!(config.labels().max_item_length(), Some(80));
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    labels: LabelConfig,

    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        style: StyleConfig,
        labels: LabelConfig,
        layout: LayoutConfig,
        export: ExportConfig,
    ) -> Self {
        Self {
            style,
            labels,
            layout,
            export,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn labels(&self) -> &LabelConfig {
        &self.labels
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Visual styling configuration.
///
/// Colors are kept as strings here and parsed once when the
/// [`DiagramBuilder`](crate::DiagramBuilder) is created.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background fill of the whole image. Transparent when unset.
    background_color: Option<String>,
    font_family: String,
    font_size: u16,
    /// Colors handed to the root's children by position.
    palette: Vec<String>,
    root_fill: String,
    root_text_color: String,
    leaf_text_color: String,
    content_fill: String,
    edge_color: String,
    /// Category name to color. Overrides the inherited color for the named
    /// node and its subtree.
    colors: IndexMap<String, String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            font_family: "Arial".to_string(),
            font_size: 14,
            palette: ["#8ecae6", "#ffb703", "#a9c9b4", "#f28482"]
                .into_iter()
                .map(String::from)
                .collect(),
            root_fill: "#219ebc".to_string(),
            root_text_color: "white".to_string(),
            leaf_text_color: "#01080f".to_string(),
            content_fill: "#f8f9fa".to_string(),
            edge_color: "#555555".to_string(),
            colors: IndexMap::new(),
        }
    }
}

impl StyleConfig {
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn root_fill(&self) -> &str {
        &self.root_fill
    }

    pub fn root_text_color(&self) -> &str {
        &self.root_text_color
    }

    pub fn leaf_text_color(&self) -> &str {
        &self.leaf_text_color
    }

    pub fn content_fill(&self) -> &str {
        &self.content_fill
    }

    pub fn edge_color(&self) -> &str {
        &self.edge_color
    }

    /// Returns the name-keyed color table in file order.
    pub fn colors(&self) -> &IndexMap<String, String> {
        &self.colors
    }

    /// Sets the background color (builder style).
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Replaces the palette (builder style).
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a color table entry (builder style).
    pub fn with_color(mut self, name: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(name.into(), color.into());
        self
    }
}

/// Label truncation limits, counted in characters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    max_category_length: Option<usize>,
    max_item_length: Option<usize>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            max_category_length: None,
            max_item_length: Some(80),
        }
    }
}

impl LabelConfig {
    pub fn new(max_category_length: Option<usize>, max_item_length: Option<usize>) -> Self {
        Self {
            max_category_length,
            max_item_length,
        }
    }

    /// Limit for category and leaf labels. Unlimited when `None`.
    pub fn max_category_length(&self) -> Option<usize> {
        self.max_category_length
    }

    /// Limit for each paper line of a content node. Unlimited when `None`.
    pub fn max_item_length(&self) -> Option<usize> {
        self.max_item_length
    }
}

/// Spacing used by the native tree layout, in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 30.0,
            vertical_spacing: 60.0,
            padding: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(horizontal_spacing: f32, vertical_spacing: f32, padding: f32) -> Self {
        Self {
            horizontal_spacing,
            vertical_spacing,
            padding,
        }
    }

    /// Gap between neighbouring subtrees on the same row.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Gap between rows.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Margin around the whole diagram.
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

/// Backend used for `.svg` output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgEngine {
    /// In-crate tree layout and SVG writer.
    #[default]
    Native,
    /// The Graphviz `dot` binary. Needs the `graphviz` feature.
    Graphviz,
}

/// Export configuration section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    svg_engine: SvgEngine,
}

impl ExportConfig {
    pub fn new(svg_engine: SvgEngine) -> Self {
        Self { svg_engine }
    }

    pub fn svg_engine(&self) -> SvgEngine {
        self.svg_engine
    }
}
