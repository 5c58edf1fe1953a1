//! Graphviz backend.
//!
//! Translates a [`Diagram`] into a `dot_structures` graph. DOT output is the
//! printed graph itself; every other format is produced by running the
//! Graphviz `dot` binary through `graphviz-rust`.

use dot_generator::{attr, id};
use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId as DotNodeId, Stmt, Vertex,
};
use graphviz_rust::{
    cmd::{CommandArg, Format},
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, error, info};

use taxograph_core::{
    draw::{FontEmphasis, NodeShape, NodeStyle},
    semantic::{Diagram, DiagramNode, NodeRole},
};

use crate::{
    export::{self, Exporter, OutputFormat},
    policy::StylePolicy,
};

/// Border width from which a node is drawn `bold`.
const BOLD_STROKE_WIDTH: f32 = 2.0;

/// Renders diagrams through Graphviz.
#[derive(Debug)]
pub struct GraphvizExporter<'a> {
    policy: &'a StylePolicy,
    format: OutputFormat,
}

impl<'a> GraphvizExporter<'a> {
    pub fn new(policy: &'a StylePolicy, format: OutputFormat) -> Self {
        Self { policy, format }
    }

    /// Builds the directed graph for `diagram`.
    pub fn to_graph(&self, diagram: &Diagram) -> Graph {
        let mut stmts = vec![
            Stmt::Attribute(attr!("rankdir", "TB")),
            Stmt::GAttribute(GraphAttributes::Node(vec![
                attr!("shape", "box"),
                quoted_attr("style", "rounded,filled"),
                quoted_attr("fontname", self.policy.font_family()),
            ])),
            Stmt::GAttribute(GraphAttributes::Edge(vec![quoted_attr(
                "color",
                self.policy.edge_color().to_hex(),
            )])),
        ];
        if let Some(background) = self.policy.background() {
            stmts.push(Stmt::Attribute(quoted_attr("bgcolor", background.to_hex())));
        }

        stmts.extend(
            diagram
                .nodes()
                .iter()
                .map(|node| Stmt::Node(self.node(node))),
        );
        stmts.extend(diagram.edges().iter().map(|edge| {
            Stmt::Edge(Edge {
                ty: EdgeTy::Pair(
                    Vertex::N(node_id(edge.parent())),
                    Vertex::N(node_id(edge.child())),
                ),
                attributes: Vec::new(),
            })
        }));

        Graph::DiGraph {
            id: id!(esc "taxonomy"),
            strict: false,
            stmts,
        }
    }

    /// Prints `diagram` as DOT source.
    pub fn to_dot(&self, diagram: &Diagram) -> String {
        self.to_graph(diagram).print(&mut PrinterContext::default())
    }

    fn node(&self, node: &DiagramNode) -> Node {
        let style = node.style();
        let mut attributes = vec![
            Attribute(id!("label"), label_id(node)),
            attr!("shape", style.shape().to_dot_value()),
            quoted_attr("style", style_list(style).join(",")),
            quoted_attr("color", style.stroke().color().to_hex()),
            quoted_attr("fontname", font_name(style)),
            attr!("fontsize", style.text().font_size()),
        ];
        if let Some(fill) = style.fill() {
            attributes.push(quoted_attr("fillcolor", fill.to_hex()));
        }
        if let Some(text_color) = style.text().color() {
            attributes.push(quoted_attr("fontcolor", text_color.to_hex()));
        }
        if style.stroke().width() >= BOLD_STROKE_WIDTH {
            attributes.push(attr!("penwidth", style.stroke().width()));
        }

        Node {
            id: node_id(node.id()),
            attributes,
        }
    }
}

impl Exporter for GraphvizExporter<'_> {
    fn export_diagram(&self, diagram: &Diagram) -> Result<Vec<u8>, export::Error> {
        let format = match self.format {
            OutputFormat::Dot => {
                debug!("Printing DOT source");
                return Ok(self.to_dot(diagram).into_bytes());
            }
            OutputFormat::Svg => Format::Svg,
            OutputFormat::Png => Format::Png,
            OutputFormat::Pdf => Format::Pdf,
            OutputFormat::Jpeg => Format::Jpeg,
        };

        info!(format:% = self.format; "Running Graphviz");
        graphviz_rust::exec(
            self.to_graph(diagram),
            &mut PrinterContext::default(),
            vec![CommandArg::Format(format)],
        )
        .map_err(|err| {
            error!(err:err; "Graphviz failed");
            export::Error::Render(format!("graphviz `dot` failed: {err}"))
        })
    }
}

fn node_id(id: taxograph_core::identifier::NodeId) -> DotNodeId {
    DotNodeId(id!(esc id), None)
}

fn quoted_attr(key: &str, value: impl AsRef<str>) -> Attribute {
    Attribute(id!(key), id!(esc escape(value.as_ref())))
}

/// Node label. Content lines end in `\l` so Graphviz left-justifies them.
fn label_id(node: &DiagramNode) -> Id {
    let label = match node.role() {
        NodeRole::Content => node
            .lines()
            .map(|line| format!("{}\\l", escape(line)))
            .collect::<String>(),
        _ => escape(node.label()),
    };
    id!(esc label)
}

fn style_list(style: &NodeStyle) -> Vec<&'static str> {
    let mut list = Vec::new();
    if style.fill().is_some() {
        list.push("filled");
    }
    if style.shape() == NodeShape::RoundedBox {
        list.push("rounded");
    }
    if style.is_dashed() {
        list.push("dashed");
    }
    if style.stroke().width() >= BOLD_STROKE_WIDTH {
        list.push("bold");
    }
    list
}

fn font_name(style: &NodeStyle) -> String {
    let family = style.text().font_family();
    match style.text().emphasis() {
        FontEmphasis::Normal => family.to_string(),
        FontEmphasis::Bold => format!("{family} Bold"),
        FontEmphasis::Italic => format!("{family} Italic"),
    }
}

/// Escapes backslashes and double quotes for a quoted DOT string.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
