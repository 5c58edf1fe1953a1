//! A node shape with its label.
//!
//! [`NodeBox`] pairs a [`NodeStyle`] with label text and implements
//! [`Drawable`]: it knows how big it has to be to fit the label and how to
//! emit its outline and text on the right render layers.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, NodeShape, NodeStyle, RenderLayer, Text},
    geometry::{Point, Size},
    identifier::NodeId,
};

/// Smallest width any node is drawn with.
const MIN_WIDTH: f32 = 40.0;

/// Size of the folded corner of [`NodeShape::Note`].
const NOTE_FOLD: f32 = 10.0;

/// A styled, labelled node ready for layout and rendering.
#[derive(Debug, Clone)]
pub struct NodeBox<'a> {
    id: Option<NodeId>,
    style: &'a NodeStyle,
    label: &'a str,
}

impl<'a> NodeBox<'a> {
    pub fn new(style: &'a NodeStyle, label: &'a str) -> Self {
        Self {
            id: None,
            style,
            label,
        }
    }

    /// Tags the rendered shape with the diagram node id (builder style).
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    fn text(&self) -> Text<'a> {
        Text::new(self.style.text(), self.label)
    }

    fn render_shape(&self, position: Point, size: Size) -> Box<dyn svg::Node> {
        let bounds = position.to_bounds(size);
        let min = bounds.min_point();
        let fill = self
            .style
            .fill()
            .map_or_else(|| "none".to_string(), |color| color.to_string());

        match self.style.shape() {
            NodeShape::Box | NodeShape::RoundedBox => {
                let radius = self.style.shape().corner_radius();
                let rect = svg_element::Rectangle::new()
                    .set("x", min.x())
                    .set("y", min.y())
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("rx", radius)
                    .set("fill", fill);
                Box::new(apply_stroke!(rect, self.style.stroke()))
            }
            NodeShape::Ellipse => {
                let ellipse = svg_element::Ellipse::new()
                    .set("cx", position.x())
                    .set("cy", position.y())
                    .set("rx", size.width() / 2.0)
                    .set("ry", size.height() / 2.0)
                    .set("fill", fill);
                Box::new(apply_stroke!(ellipse, self.style.stroke()))
            }
            NodeShape::Note => {
                let (x0, y0) = (min.x(), min.y());
                let (x1, y1) = (bounds.max_x(), bounds.max_y());
                let fold = NOTE_FOLD.min(size.width() / 2.0).min(size.height() / 2.0);
                let outline = format!(
                    "M {x0} {y0} L {} {y0} L {x1} {} L {x1} {y1} L {x0} {y1} Z M {} {y0} L {} {} L {x1} {}",
                    x1 - fold,
                    y0 + fold,
                    x1 - fold,
                    x1 - fold,
                    y0 + fold,
                    y0 + fold,
                );
                let path = svg_element::Path::new()
                    .set("d", outline)
                    .set("fill", fill);
                Box::new(apply_stroke!(path, self.style.stroke()))
            }
        }
    }

    /// Wraps the outline in a `<g class="node">` carrying the node id.
    fn tag(&self, shape: Box<dyn svg::Node>) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "node");
        if let Some(id) = self.id {
            group = group.set("data-node-id", id.to_string());
        }
        group.add(shape)
    }
}

impl Drawable for NodeBox<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let size = self.size();

        let shape = self.tag(self.render_shape(position, size));
        output.add_to_layer(RenderLayer::Node, Box::new(shape));
        output.merge(self.text().render_to_layers(position));

        output
    }

    fn size(&self) -> Size {
        let text_size = self.text().calculate_size();
        let shape_size = match self.style.shape() {
            // An ellipse circumscribing a w x h box has axes sqrt(2)*w, sqrt(2)*h
            NodeShape::Ellipse => text_size.scale(std::f32::consts::SQRT_2),
            _ => text_size,
        };
        let stroke_width = self.style.stroke().width();
        Size::new(
            (shape_size.width() + stroke_width).max(MIN_WIDTH),
            shape_size.height() + stroke_width,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        draw::{StrokeDefinition, TextDefinition},
        geometry::Insets,
    };

    fn style(shape: NodeShape) -> NodeStyle {
        let mut text = TextDefinition::new();
        text.set_padding(Insets::uniform(8.0));
        NodeStyle::new(shape, StrokeDefinition::default(), text)
            .with_fill(Color::new("#8ecae6").unwrap())
    }

    fn render(node: &NodeBox<'_>) -> String {
        node.render_to_layers(Point::new(100.0, 100.0))
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_ellipse_is_larger_than_box() {
        let box_style = style(NodeShape::Box);
        let ellipse_style = style(NodeShape::Ellipse);
        let label = "Some leaf category";

        let box_size = NodeBox::new(&box_style, label).size();
        let ellipse_size = NodeBox::new(&ellipse_style, label).size();

        assert!(ellipse_size.width() > box_size.width());
        assert!(ellipse_size.height() > box_size.height());
    }

    #[test]
    fn test_min_width_applies_to_short_labels() {
        let box_style = style(NodeShape::Box);
        assert!(NodeBox::new(&box_style, "A").size().width() >= MIN_WIDTH);
    }

    #[test]
    fn test_render_tags_node_id() {
        let box_style = style(NodeShape::RoundedBox);
        let node = NodeBox::new(&box_style, "Root").with_id(NodeId::new(4));
        let svg = render(&node);

        assert!(svg.contains("class=\"node\""));
        assert!(svg.contains("data-node-id=\"n4\""));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("Root"));
    }

    #[test]
    fn test_render_shapes() {
        let ellipse_style = style(NodeShape::Ellipse);
        assert!(render(&NodeBox::new(&ellipse_style, "leaf")).contains("<ellipse"));

        let note_style = style(NodeShape::Note);
        assert!(render(&NodeBox::new(&note_style, "• P1\n• P2")).contains("<path"));
    }
}
