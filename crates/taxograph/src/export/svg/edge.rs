//! Parent to child connectors.

use svg::node::element::{Definitions, Marker, Path};

use taxograph_core::{
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Point},
};

use super::SvgExporter;

const ARROW_MARKER_ID: &str = "arrowhead";

impl SvgExporter<'_> {
    /// Arrowhead marker shared by every edge.
    pub(super) fn marker_definitions(&self) -> Definitions {
        let marker = Marker::new()
            .set("id", ARROW_MARKER_ID)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", self.policy.edge_color().to_string()),
            );

        Definitions::new().add(marker)
    }

    pub(super) fn render_edge(&self, parent: Bounds, child: Bounds) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let path = Path::new()
            .set("class", "edge")
            .set("d", curve_path_data(parent.bottom_center(), child.top_center()))
            .set("fill", "none")
            .set("stroke", self.policy.edge_color().to_string())
            .set("stroke-width", 1.2)
            .set("marker-end", format!("url(#{ARROW_MARKER_ID})"));
        output.add_to_layer(RenderLayer::Edge, Box::new(path));
        output
    }
}

/// Vertical S-curve from `start` to `end` with both control points on the
/// row midline.
fn curve_path_data(start: Point, end: Point) -> String {
    let mid_y = (start.y() + end.y()) / 2.0;
    format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x(),
        start.y(),
        start.x(),
        mid_y,
        end.x(),
        mid_y,
        end.x(),
        end.y()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_path_data() {
        let data = curve_path_data(Point::new(10.0, 20.0), Point::new(50.0, 100.0));
        assert_eq!(data, "M 10 20 C 10 60, 50 60, 50 100");
    }
}
