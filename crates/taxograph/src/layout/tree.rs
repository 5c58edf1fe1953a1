//! Top-down tidy tree layout.
//!
//! Every depth level is one row whose height is its tallest node. Leaf
//! subtrees are packed left to right in child order and each parent is
//! centered over the span of its children. A subtree is never narrower than
//! its own node, so wide parents push their neighbours apart instead of
//! overlapping them.

use log::{debug, trace};

use taxograph_core::{
    draw::{Drawable, NodeBox},
    geometry::{Bounds, Point, Size},
    identifier::NodeId,
    semantic::Diagram,
};

use crate::{TaxographError, config::LayoutConfig};

/// Positioned nodes of one diagram.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    node_bounds: Vec<Bounds>,
    bounds: Bounds,
}

impl TreeLayout {
    /// Returns the rectangle of `id`.
    pub fn node_bounds(&self, id: NodeId) -> Option<Bounds> {
        self.node_bounds.get(id.index()).copied()
    }

    /// Returns every node rectangle in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Bounds)> + '_ {
        self.node_bounds
            .iter()
            .enumerate()
            .map(|(idx, bounds)| (NodeId::new(idx), *bounds))
    }

    /// Canvas bounds including the outer padding. Always starts at the
    /// origin.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Computes [`TreeLayout`]s with fixed spacing settings.
///
/// # Examples
///
/// ```
/// # use taxograph::layout::LayoutEngine;
/// let engine = LayoutEngine::new()
///     .with_horizontal_spacing(40.0)
///     .with_vertical_spacing(80.0)
///     .with_padding(10.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    padding: f32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
            padding: config.padding(),
        }
    }

    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Lays out `diagram` using the measured size of every node label.
    ///
    /// # Errors
    ///
    /// Returns [`TaxographError::Layout`] if the diagram is empty or is not
    /// a single connected tree.
    pub fn calculate(&self, diagram: &Diagram) -> Result<TreeLayout, TaxographError> {
        let sizes: Vec<Size> = diagram
            .nodes()
            .iter()
            .map(|node| NodeBox::new(node.style(), node.label()).size())
            .collect();
        self.calculate_with_sizes(diagram, &sizes)
    }

    /// Lays out `diagram` with the given node sizes, indexed by [`NodeId`].
    ///
    /// # Errors
    ///
    /// See [`LayoutEngine::calculate`]. A `sizes` slice of the wrong length
    /// is also a layout error.
    pub fn calculate_with_sizes(
        &self,
        diagram: &Diagram,
        sizes: &[Size],
    ) -> Result<TreeLayout, TaxographError> {
        if diagram.root().is_none() {
            return Err(TaxographError::Layout("diagram has no nodes".to_string()));
        }
        if !diagram.is_connected_tree() {
            return Err(TaxographError::Layout(
                "diagram is not a single connected tree".to_string(),
            ));
        }
        if sizes.len() != diagram.nodes_count() {
            return Err(TaxographError::Layout(format!(
                "expected {} node sizes, got {}",
                diagram.nodes_count(),
                sizes.len()
            )));
        }

        let depths: Vec<usize> = (0..diagram.nodes_count())
            .map(|idx| diagram.depth(NodeId::new(idx)))
            .collect();
        let row_count = depths.iter().max().map_or(0, |max| max + 1);

        let mut row_heights = vec![0.0_f32; row_count];
        for (size, &depth) in sizes.iter().zip(&depths) {
            row_heights[depth] = row_heights[depth].max(size.height());
        }

        let mut row_tops = Vec::with_capacity(row_count);
        let mut top = self.padding;
        for height in &row_heights {
            row_tops.push(top);
            top += height + self.vertical_spacing;
        }
        debug!(rows = row_count; "Tree rows measured");

        let mut placer = Placer {
            engine: self,
            diagram,
            sizes,
            subtree_widths: vec![0.0; sizes.len()],
            node_bounds: vec![Bounds::default(); sizes.len()],
            depths: &depths,
            row_tops: &row_tops,
            row_heights: &row_heights,
        };
        placer.measure(NodeId::ROOT);
        placer.place(NodeId::ROOT, self.padding);

        let node_bounds = placer.node_bounds;
        let content = node_bounds
            .iter()
            .copied()
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();
        let bounds = Bounds::new_from_top_left(
            Point::default(),
            Size::new(
                content.max_x() + self.padding,
                content.max_y() + self.padding,
            ),
        );

        debug!(width = bounds.width(), height = bounds.height(); "Tree layout calculated");
        Ok(TreeLayout {
            node_bounds,
            bounds,
        })
    }
}

/// Recursive state of one layout pass.
struct Placer<'a> {
    engine: &'a LayoutEngine,
    diagram: &'a Diagram,
    sizes: &'a [Size],
    subtree_widths: Vec<f32>,
    node_bounds: Vec<Bounds>,
    depths: &'a [usize],
    row_tops: &'a [f32],
    row_heights: &'a [f32],
}

impl Placer<'_> {
    /// Fills `subtree_widths` for `id` and everything below it.
    fn measure(&mut self, id: NodeId) -> f32 {
        let children: Vec<NodeId> = self.diagram.children(id).collect();
        let children_width = self.children_width(&children);
        let width = self.sizes[id.index()].width().max(children_width);
        self.subtree_widths[id.index()] = width;
        width
    }

    fn children_width(&mut self, children: &[NodeId]) -> f32 {
        if children.is_empty() {
            return 0.0;
        }
        let total: f32 = children.iter().map(|&child| self.measure(child)).sum();
        total + self.engine.horizontal_spacing * (children.len() - 1) as f32
    }

    /// Places the subtree of `id` in the column starting at `left`.
    fn place(&mut self, id: NodeId, left: f32) {
        let subtree_width = self.subtree_widths[id.index()];
        let depth = self.depths[id.index()];
        let center = Point::new(
            left + subtree_width / 2.0,
            self.row_tops[depth] + self.row_heights[depth] / 2.0,
        );
        self.node_bounds[id.index()] = center.to_bounds(self.sizes[id.index()]);
        trace!(id:% = id, x = center.x(), y = center.y(); "Placed node");

        let children: Vec<NodeId> = self.diagram.children(id).collect();
        if children.is_empty() {
            return;
        }
        let children_width = children
            .iter()
            .map(|child| self.subtree_widths[child.index()])
            .sum::<f32>()
            + self.engine.horizontal_spacing * (children.len() - 1) as f32;

        let mut child_left = left + (subtree_width - children_width) / 2.0;
        for child in children {
            self.place(child, child_left);
            child_left += self.subtree_widths[child.index()] + self.engine.horizontal_spacing;
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use taxograph_core::{
        draw::{NodeShape, NodeStyle, StrokeDefinition, TextDefinition},
        semantic::NodeRole,
    };

    use super::*;

    fn style() -> NodeStyle {
        NodeStyle::new(
            NodeShape::Box,
            StrokeDefinition::default(),
            TextDefinition::default(),
        )
    }

    /// Builds a diagram from `(parent index, label)` pairs; entry 0 is the
    /// root and its parent is ignored.
    fn diagram(shape: &[(usize, &str)]) -> Diagram {
        let mut diagram = Diagram::new();
        for (idx, (parent, label)) in shape.iter().enumerate() {
            let role = if idx == 0 { NodeRole::Root } else { NodeRole::Category };
            let id = diagram.add_node(*label, role, style());
            if idx > 0 {
                diagram.add_edge(NodeId::new(*parent), id).unwrap();
            }
        }
        diagram
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::new()
            .with_horizontal_spacing(10.0)
            .with_vertical_spacing(20.0)
            .with_padding(5.0)
    }

    fn bounds(layout: &TreeLayout, idx: usize) -> Bounds {
        layout.node_bounds(NodeId::new(idx)).unwrap()
    }

    #[test]
    fn test_single_node() {
        let diagram = diagram(&[(0, "Root")]);
        let layout = engine()
            .calculate_with_sizes(&diagram, &[Size::new(100.0, 40.0)])
            .unwrap();

        let root = bounds(&layout, 0);
        assert_approx_eq!(f32, root.min_x(), 5.0);
        assert_approx_eq!(f32, root.min_y(), 5.0);
        assert_approx_eq!(f32, layout.bounds().width(), 110.0);
        assert_approx_eq!(f32, layout.bounds().height(), 50.0);
    }

    #[test]
    fn test_parent_centered_over_children() {
        let diagram = diagram(&[(0, "Root"), (0, "A"), (0, "B")]);
        let sizes = [
            Size::new(20.0, 30.0),
            Size::new(50.0, 30.0),
            Size::new(70.0, 40.0),
        ];
        let layout = engine().calculate_with_sizes(&diagram, &sizes).unwrap();

        let (root, a, b) = (bounds(&layout, 0), bounds(&layout, 1), bounds(&layout, 2));
        // Children span [5, 135]; root centered at 70
        assert_approx_eq!(f32, a.min_x(), 5.0);
        assert_approx_eq!(f32, b.min_x(), 65.0);
        assert_approx_eq!(f32, root.center().x(), 70.0);

        // Second row starts after the first row plus spacing and is 40 high
        assert_approx_eq!(f32, a.center().y(), 5.0 + 30.0 + 20.0 + 20.0);
        assert_approx_eq!(f32, b.min_y(), 55.0);
    }

    #[test]
    fn test_wide_parent_widens_subtree() {
        let diagram = diagram(&[(0, "Root"), (0, "Wide"), (1, "x"), (0, "Next")]);
        let sizes = [
            Size::new(10.0, 10.0),
            Size::new(200.0, 10.0),
            Size::new(10.0, 10.0),
            Size::new(10.0, 10.0),
        ];
        let layout = engine().calculate_with_sizes(&diagram, &sizes).unwrap();

        assert!(!bounds(&layout, 1).intersects(&bounds(&layout, 3)));
        assert_approx_eq!(f32, bounds(&layout, 2).center().x(), bounds(&layout, 1).center().x());
        assert_approx_eq!(f32, bounds(&layout, 3).min_x(), 5.0 + 200.0 + 10.0);
    }

    #[test]
    fn test_measured_sizes() {
        let diagram = diagram(&[(0, "Root"), (0, "A longer label")]);
        let layout = LayoutEngine::new().calculate(&diagram).unwrap();
        assert!(bounds(&layout, 1).width() > bounds(&layout, 0).width());
    }

    #[test]
    fn test_errors() {
        let empty = Diagram::new();
        assert!(matches!(
            engine().calculate_with_sizes(&empty, &[]),
            Err(TaxographError::Layout(_))
        ));

        let mut orphaned = diagram(&[(0, "Root")]);
        orphaned.add_node("orphan", NodeRole::Leaf, style());
        assert!(matches!(
            engine().calculate_with_sizes(&orphaned, &[Size::default(); 2]),
            Err(TaxographError::Layout(_))
        ));

        let single = diagram(&[(0, "Root")]);
        assert!(matches!(
            engine().calculate_with_sizes(&single, &[]),
            Err(TaxographError::Layout(_))
        ));
    }

    fn arb_tree() -> impl Strategy<Value = Vec<(usize, Size)>> {
        // Each entry picks a parent among the nodes before it
        prop::collection::vec((any::<prop::sample::Index>(), 5.0f32..120.0, 5.0f32..60.0), 1..40)
            .prop_map(|entries| {
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(idx, (parent, w, h))| {
                        let parent = if idx == 0 { 0 } else { parent.index(idx) };
                        (parent, Size::new(w, h))
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn prop_rows_do_not_overlap_and_children_below(entries in arb_tree()) {
            let shape: Vec<(usize, &str)> = entries.iter().map(|(p, _)| (*p, "n")).collect();
            let diagram = diagram(&shape);
            let sizes: Vec<Size> = entries.iter().map(|(_, s)| *s).collect();
            let layout = engine().calculate_with_sizes(&diagram, &sizes).unwrap();

            for (id, node) in layout.iter() {
                if let Some(parent) = diagram.parent(id) {
                    prop_assert!(node.min_y() > layout.node_bounds(parent).unwrap().max_y());
                }
                for (other_id, other) in layout.iter() {
                    if other_id != id && diagram.depth(other_id) == diagram.depth(id) {
                        prop_assert!(!node.intersects(&other));
                    }
                }
            }
        }

        #[test]
        fn prop_siblings_keep_order(entries in arb_tree()) {
            let shape: Vec<(usize, &str)> = entries.iter().map(|(p, _)| (*p, "n")).collect();
            let diagram = diagram(&shape);
            let sizes: Vec<Size> = entries.iter().map(|(_, s)| *s).collect();
            let layout = engine().calculate_with_sizes(&diagram, &sizes).unwrap();

            for (id, _) in layout.iter() {
                let children: Vec<NodeId> = diagram.children(id).collect();
                for pair in children.windows(2) {
                    let left = layout.node_bounds(pair[0]).unwrap();
                    let right = layout.node_bounds(pair[1]).unwrap();
                    prop_assert!(left.max_x() <= right.min_x());
                }
            }
        }
    }
}
