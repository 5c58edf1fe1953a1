//! Paint order for the native SVG backend.
//!
//! Every drawable files its elements under a [`RenderLayer`]. When the
//! document is assembled each layer becomes one `<g data-layer="...">`
//! group, so edges run underneath node shapes and labels stay on top no
//! matter in which order nodes were drawn.
//!
//! ```
//! # use taxograph_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));
//!
//! let groups = output.render();
//! assert!(groups[0].to_string().starts_with("<g data-layer=\"edge\""));
//! ```

use std::collections::BTreeMap;

use svg::node::element::Group;

pub type SvgNode = Box<dyn svg::Node>;

/// Bottom-most first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    Background,
    Edge,
    Node,
    Text,
}

impl RenderLayer {
    /// Value of the group's `data-layer` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Edge => "edge",
            Self::Node => "node",
            Self::Text => "text",
        }
    }
}

/// SVG elements bucketed by layer, in insertion order within each bucket.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    layers: BTreeMap<RenderLayer, Vec<SvgNode>>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.layers.entry(layer).or_default().push(node);
    }

    /// Moves everything from `other` behind the elements already held.
    pub fn merge(&mut self, other: LayeredOutput) {
        for (layer, nodes) in other.layers {
            self.layers.entry(layer).or_default().extend(nodes);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// One group per non-empty layer, bottom-most first.
    pub fn render(self) -> Vec<SvgNode> {
        self.layers
            .into_iter()
            .map(|(layer, nodes)| {
                let group = nodes
                    .into_iter()
                    .fold(Group::new().set("data-layer", layer.name()), |group, node| {
                        group.add(node)
                    });
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
