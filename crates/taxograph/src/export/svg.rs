//! Native SVG backend.
//!
//! Draws a [`Diagram`] positioned by a [`TreeLayout`]. Nothing outside the
//! process is involved: shapes come from [`NodeBox`] and connectors are
//! cubic curves from each parent's bottom edge to its child's top edge.

mod edge;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use taxograph_core::{
    draw::{Drawable, LayeredOutput, NodeBox, RenderLayer},
    geometry::{Bounds, Size},
    identifier::NodeId,
    semantic::Diagram,
};

use crate::{
    export::{self, Exporter},
    layout::TreeLayout,
    policy::StylePolicy,
};

/// Renders a laid-out diagram to an SVG document.
#[derive(Debug)]
pub struct SvgExporter<'a> {
    policy: &'a StylePolicy,
    layout: &'a TreeLayout,
}

impl<'a> SvgExporter<'a> {
    pub fn new(policy: &'a StylePolicy, layout: &'a TreeLayout) -> Self {
        Self { policy, layout }
    }

    /// Builds the complete SVG document for `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the layout has no position for a
    /// diagram node.
    pub fn render_document(&self, diagram: &Diagram) -> Result<Document, export::Error> {
        let size = self.layout.bounds().to_size();
        let mut output = LayeredOutput::new();

        if let Some(background) = self.add_background(size) {
            output.add_to_layer(RenderLayer::Background, Box::new(background));
        }

        for edge in diagram.edges() {
            let parent = self.node_bounds(edge.parent())?;
            let child = self.node_bounds(edge.child())?;
            output.merge(self.render_edge(parent, child));
        }

        for node in diagram.nodes() {
            let bounds = self.node_bounds(node.id())?;
            let drawable = NodeBox::new(node.style(), node.label()).with_id(node.id());
            output.merge(drawable.render_to_layers(bounds.center()));
        }

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height())
            .add(self.marker_definitions());

        for layer in output.render() {
            doc = doc.add(layer);
        }

        debug!(
            nodes_count = diagram.nodes_count(),
            edges_count = diagram.edges_count();
            "SVG document rendered"
        );
        Ok(doc)
    }

    fn add_background(&self, size: Size) -> Option<svg_element::Rectangle> {
        self.policy.background().map(|color| {
            svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", size.width())
                .set("height", size.height())
                .set("fill", color.to_string())
        })
    }

    fn node_bounds(&self, id: NodeId) -> Result<Bounds, export::Error> {
        self.layout
            .node_bounds(id)
            .ok_or_else(|| export::Error::Render(format!("node `{id}` has no layout position")))
    }
}

impl Exporter for SvgExporter<'_> {
    fn export_diagram(&self, diagram: &Diagram) -> Result<Vec<u8>, export::Error> {
        info!("Rendering native SVG");
        let doc = self.render_document(diagram)?;
        Ok(doc.to_string().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use taxograph_core::taxonomy::TaxonomyNode;

    use super::*;
    use crate::{
        config::{LabelConfig, StyleConfig},
        layout::LayoutEngine,
        structure::DiagramAssembler,
    };

    fn render(tree: &TaxonomyNode, style: StyleConfig) -> String {
        let policy = StylePolicy::from_config(&style).unwrap();
        let labels = LabelConfig::default();
        let diagram = DiagramAssembler::new(&policy, &labels)
            .assemble(tree)
            .unwrap();
        let layout = LayoutEngine::new().calculate(&diagram).unwrap();
        let bytes = SvgExporter::new(&policy, &layout)
            .export_diagram(&diagram)
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    fn sample() -> TaxonomyNode {
        TaxonomyNode::with_children(
            "Root",
            vec![
                TaxonomyNode::with_papers("A", vec!["P1".to_string(), "P2".to_string()]),
                TaxonomyNode::leaf("B"),
            ],
        )
    }

    #[test]
    fn test_one_group_per_node_and_path_per_edge() {
        let svg = render(&sample(), StyleConfig::default());

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("class=\"node\"").count(), 4);
        assert_eq!(svg.matches("class=\"edge\"").count(), 3);
        assert!(svg.contains("data-node-id=\"n3\""));
        assert!(svg.contains("<marker"));
    }

    #[test]
    fn test_layers_in_order() {
        let svg = render(&sample(), StyleConfig::default().with_background_color("white"));

        let background = svg.find("data-layer=\"background\"").unwrap();
        let edge = svg.find("data-layer=\"edge\"").unwrap();
        let node = svg.find("data-layer=\"node\"").unwrap();
        let text = svg.find("data-layer=\"text\"").unwrap();
        assert!(background < edge && edge < node && node < text);
    }

    #[test]
    fn test_no_background_by_default() {
        let svg = render(&sample(), StyleConfig::default());
        assert!(!svg.contains("data-layer=\"background\""));
    }

    #[test]
    fn test_labels_and_styles() {
        let svg = render(&sample(), StyleConfig::default());
        assert!(svg.contains("• P1"));
        assert!(svg.contains("• P2"));
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_root_only() {
        let svg = render(&TaxonomyNode::leaf("Alone"), StyleConfig::default());
        assert_eq!(svg.matches("class=\"node\"").count(), 1);
        assert_eq!(svg.matches("class=\"edge\"").count(), 0);
    }
}
