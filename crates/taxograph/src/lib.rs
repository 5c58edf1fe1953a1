//! Taxograph - render taxonomy trees as top-down hierarchy diagrams.
//!
//! A taxonomy is a JSON tree of named categories whose leaves may list
//! papers. Taxograph validates the document, turns it into a styled diagram,
//! and writes it as SVG with the built-in tree layout, or as DOT, PNG, PDF or
//! JPEG through Graphviz when the `graphviz` feature is enabled.

pub mod config;
pub mod export;
pub mod label;
pub mod layout;
pub mod policy;

mod error;
mod structure;

pub use taxograph_core::{color, draw, geometry, identifier, semantic, taxonomy};

pub use error::TaxographError;
pub use export::OutputFormat;

use std::{fs, path::Path};

use log::{debug, info, trace};

use config::{AppConfig, SvgEngine};
use export::Exporter;
use policy::StylePolicy;
use semantic::Diagram;
use taxonomy::TaxonomyNode;

/// Builder for loading and rendering taxonomy diagrams.
///
/// This provides an API for processing taxonomies through the load, build,
/// layout and export stages.
///
/// # Examples
///
/// ```rust
/// use taxograph::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{"name": "Root", "children": [{"name": "A", "papers": ["P1", "P2"]}]}"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default())
///     .expect("Invalid configuration");
///
/// // Load and validate the taxonomy
/// let tree = builder.parse(source).expect("Failed to parse");
///
/// // Turn it into a styled diagram
/// let diagram = builder.build(&tree).expect("Failed to build");
/// assert_eq!(diagram.nodes_count(), 3);
///
/// // Render the diagram to SVG
/// let svg = builder.render_svg(&diagram).expect("Failed to render");
/// assert!(svg.contains("• P1"));
/// ```
#[derive(Debug)]
pub struct DiagramBuilder {
    config: AppConfig,
    policy: StylePolicy,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including style, label, layout
    ///   and export settings
    ///
    /// # Errors
    ///
    /// Returns [`TaxographError::Config`] if a configured color cannot be
    /// parsed, the palette is empty, or the Graphviz SVG engine is selected
    /// without the `graphviz` feature.
    pub fn new(config: AppConfig) -> Result<Self, TaxographError> {
        let policy = StylePolicy::from_config(config.style())?;

        if config.export().svg_engine() == SvgEngine::Graphviz && !cfg!(feature = "graphviz") {
            return Err(TaxographError::Config(
                "export.svg_engine = \"graphviz\" requires the `graphviz` feature".to_string(),
            ));
        }

        debug!(svg_engine:? = config.export().svg_engine(); "Diagram builder created");
        Ok(Self { config, policy })
    }

    /// Parse a JSON taxonomy document.
    ///
    /// Warnings such as a node carrying both `children` and `papers` are
    /// logged and do not fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`TaxographError::Parse`] with every collected diagnostic for
    /// malformed JSON or an invalid taxonomy shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taxograph::{DiagramBuilder, config::AppConfig};
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    /// let tree = builder.parse(r#"{"name": "Root"}"#).unwrap();
    /// assert_eq!(tree.name(), "Root");
    ///
    /// assert!(builder.parse(r#"{"children": []}"#).is_err());
    /// ```
    pub fn parse(&self, source: &str) -> Result<TaxonomyNode, TaxographError> {
        info!("Parsing taxonomy");

        let tree = taxograph_parser::parse(source)
            .map_err(|err| TaxographError::new_parse_error(err, source))?;

        debug!(nodes = tree.node_count(); "Taxonomy parsed successfully");
        trace!(tree:?; "Parsed taxonomy");
        Ok(tree)
    }

    /// Turn a taxonomy tree into a styled diagram.
    ///
    /// # Errors
    ///
    /// Returns [`TaxographError::Graph`] if the diagram arena rejects an
    /// edge.
    pub fn build(&self, tree: &TaxonomyNode) -> Result<Diagram, TaxographError> {
        info!(root = tree.name(); "Building diagram");
        let diagram = structure::DiagramAssembler::new(&self.policy, self.config.labels())
            .assemble(tree)?;

        info!(
            nodes_count = diagram.nodes_count(),
            edges_count = diagram.edges_count();
            "Diagram built"
        );
        Ok(diagram)
    }

    /// Render a diagram into the bytes of an output file.
    ///
    /// # Errors
    ///
    /// Returns [`TaxographError::Layout`] if the native layout fails and
    /// [`TaxographError::Export`] if the format is unavailable or the
    /// backend fails.
    pub fn render(&self, diagram: &Diagram, format: OutputFormat) -> Result<Vec<u8>, TaxographError> {
        info!(format:% = format; "Rendering diagram");

        let use_native =
            format == OutputFormat::Svg && self.config.export().svg_engine() == SvgEngine::Native;
        if use_native {
            return self.render_native(diagram);
        }
        self.render_graphviz(diagram, format)
    }

    /// Render a diagram to an SVG string.
    ///
    /// Uses the configured SVG engine.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::render`].
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, TaxographError> {
        let bytes = self.render(diagram, OutputFormat::Svg)?;
        String::from_utf8(bytes).map_err(|err| TaxographError::Export(Box::new(err)))
    }

    /// Load `input`, render it, and write the result to `output`.
    ///
    /// The output format follows the extension of `output`. Nothing is
    /// written unless every stage succeeds, and the file is replaced
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaxographError::InputNotFound`] if `input` does not exist,
    /// [`TaxographError::Export`] for an unsupported output extension, and
    /// any error of the individual stages.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use taxograph::{DiagramBuilder, config::AppConfig};
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default()).unwrap();
    /// builder
    ///     .render_file(Path::new("taxonomy.json"), Path::new("taxonomy.svg"))
    ///     .expect("Failed to render taxonomy");
    /// ```
    pub fn render_file(&self, input: &Path, output: &Path) -> Result<(), TaxographError> {
        if !input.exists() {
            return Err(TaxographError::InputNotFound(input.to_path_buf()));
        }
        let format = OutputFormat::from_path(output)?;

        info!(input:? = input, output:? = output; "Rendering taxonomy file");
        let source = fs::read_to_string(input)?;

        let tree = self.parse(&source)?;
        let diagram = self.build(&tree)?;
        let bytes = self.render(&diagram, format)?;

        export::write_atomic(output, &bytes)?;
        info!(output:? = output; "Taxonomy graph saved");
        Ok(())
    }

    fn render_native(&self, diagram: &Diagram) -> Result<Vec<u8>, TaxographError> {
        let engine = layout::LayoutEngine::from_config(self.config.layout());
        let tree_layout = engine.calculate(diagram)?;
        debug!(
            width = tree_layout.bounds().width(),
            height = tree_layout.bounds().height();
            "Layout calculated"
        );

        let bytes = export::svg::SvgExporter::new(&self.policy, &tree_layout)
            .export_diagram(diagram)?;
        info!("SVG rendered successfully");
        Ok(bytes)
    }

    #[cfg(feature = "graphviz")]
    fn render_graphviz(
        &self,
        diagram: &Diagram,
        format: OutputFormat,
    ) -> Result<Vec<u8>, TaxographError> {
        let bytes = export::graphviz::GraphvizExporter::new(&self.policy, format)
            .export_diagram(diagram)?;
        info!(bytes = bytes.len(); "Graphviz output rendered");
        Ok(bytes)
    }

    #[cfg(not(feature = "graphviz"))]
    fn render_graphviz(
        &self,
        _diagram: &Diagram,
        format: OutputFormat,
    ) -> Result<Vec<u8>, TaxographError> {
        Err(export::Error::UnsupportedFormat(format!(
            "`{format}` output requires the `graphviz` feature"
        ))
        .into())
    }
}
