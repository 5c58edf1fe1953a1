//! Tree-to-diagram conversion.
//!
//! [`DiagramAssembler`] walks a [`TaxonomyNode`] tree once, depth first and in
//! source order, and appends one diagram node per taxonomy node plus one
//! content node per paper list. Ids are therefore assigned in traversal
//! order, and every node is connected to its parent right after it is
//! created.
//!
//! The color of a subtree is an explicit parameter of the walk: the root's
//! children pick theirs from the color table or the palette, and every node
//! below either overrides it from the table or passes it on.

use log::trace;

use taxograph_core::{
    draw::NodeStyle,
    identifier::NodeId,
    semantic::{Diagram, NodeRole},
    taxonomy::{NodeContent, TaxonomyNode},
};

use crate::{
    TaxographError,
    config::LabelConfig,
    label,
    policy::{NodeColor, StylePolicy},
};

/// Single-use walker holding the diagram under construction.
pub(crate) struct DiagramAssembler<'a> {
    policy: &'a StylePolicy,
    labels: &'a LabelConfig,
    diagram: Diagram,
}

impl<'a> DiagramAssembler<'a> {
    pub(crate) fn new(policy: &'a StylePolicy, labels: &'a LabelConfig) -> Self {
        Self {
            policy,
            labels,
            diagram: Diagram::new(),
        }
    }

    /// Converts `tree` into a diagram, consuming the assembler.
    pub(crate) fn assemble(mut self, tree: &TaxonomyNode) -> Result<Diagram, TaxographError> {
        let label = self.category_label(tree.name());
        let root = self
            .diagram
            .add_node(label, NodeRole::Root, self.policy.root_style());

        match tree.content() {
            NodeContent::Children(children) => {
                for (index, child) in children.iter().enumerate() {
                    let color = self.policy.top_level_color(child.name(), index);
                    self.visit(child, root, color)?;
                }
            }
            NodeContent::Papers(papers) => self.add_content(root, papers)?,
            NodeContent::Empty => {}
        }

        Ok(self.diagram)
    }

    /// Adds `node` below `parent` with the already resolved `color`, then
    /// recurses with the color its children inherit.
    fn visit(
        &mut self,
        node: &TaxonomyNode,
        parent: NodeId,
        color: NodeColor,
    ) -> Result<(), TaxographError> {
        trace!(name = node.name(), parent:% = parent, color:% = color.color(); "Visiting node");

        match node.content() {
            NodeContent::Papers(papers) => {
                let style = self.policy.listing_style(color);
                let id = self.add_child(parent, node, NodeRole::Category, style)?;
                self.add_content(id, papers)?;
            }
            NodeContent::Children(children) => {
                let style = self.policy.category_style(color);
                let id = self.add_child(parent, node, NodeRole::Category, style)?;
                for child in children {
                    let child_color = self.policy.resolve_color(child.name(), color);
                    self.visit(child, id, child_color)?;
                }
            }
            NodeContent::Empty => {
                let style = self.policy.leaf_style(color);
                self.add_child(parent, node, NodeRole::Leaf, style)?;
            }
        }

        Ok(())
    }

    fn add_child(
        &mut self,
        parent: NodeId,
        node: &TaxonomyNode,
        role: NodeRole,
        style: NodeStyle,
    ) -> Result<NodeId, TaxographError> {
        let label = self.category_label(node.name());
        let id = self.diagram.add_node(label, role, style);
        self.diagram.add_edge(parent, id)?;
        Ok(id)
    }

    fn add_content(&mut self, parent: NodeId, papers: &[String]) -> Result<(), TaxographError> {
        let label = label::content_label(papers, self.labels.max_item_length());
        let id = self
            .diagram
            .add_node(label, NodeRole::Content, self.policy.content_style());
        self.diagram.add_edge(parent, id)?;
        Ok(())
    }

    fn category_label(&self, name: &str) -> String {
        label::truncate_opt(name, self.labels.max_category_length()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use taxograph_core::{draw::FontEmphasis, draw::NodeShape, semantic::DiagramNode};

    use super::*;
    use crate::config::StyleConfig;

    fn assemble_with(tree: &TaxonomyNode, style: StyleConfig, labels: LabelConfig) -> Diagram {
        let policy = StylePolicy::from_config(&style).unwrap();
        DiagramAssembler::new(&policy, &labels)
            .assemble(tree)
            .unwrap()
    }

    fn assemble(tree: &TaxonomyNode) -> Diagram {
        assemble_with(tree, StyleConfig::default(), LabelConfig::default())
    }

    fn fill_hex(node: &DiagramNode) -> String {
        node.style().fill().unwrap().to_hex()
    }

    fn by_label<'d>(diagram: &'d Diagram, label: &str) -> &'d DiagramNode {
        diagram
            .nodes()
            .iter()
            .find(|node| node.label() == label)
            .unwrap()
    }

    fn papers(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_example_document() {
        let tree = TaxonomyNode::with_children(
            "Root",
            vec![TaxonomyNode::with_papers("A", papers(&["P1", "P2"]))],
        );
        let diagram = assemble(&tree);

        assert_eq!(diagram.nodes_count(), 3);
        assert_eq!(diagram.edges_count(), 2);

        let labels: Vec<&str> = diagram.nodes().iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["Root", "A", "• P1\n• P2"]);

        let roles: Vec<NodeRole> = diagram.nodes().iter().map(|n| n.role()).collect();
        assert_eq!(
            roles,
            vec![NodeRole::Root, NodeRole::Category, NodeRole::Content]
        );

        let edges: Vec<(usize, usize)> = diagram
            .edges()
            .iter()
            .map(|e| (e.parent().index(), e.child().index()))
            .collect();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_root_only() {
        let diagram = assemble(&TaxonomyNode::leaf("Root"));
        assert_eq!(diagram.nodes_count(), 1);
        assert_eq!(diagram.edges_count(), 0);
        assert_eq!(diagram.root().unwrap().role(), NodeRole::Root);
    }

    #[test]
    fn test_root_with_papers_gets_content_node() {
        let diagram = assemble(&TaxonomyNode::with_papers("Root", papers(&["P1"])));
        assert_eq!(diagram.nodes_count(), 2);
        assert_eq!(diagram.nodes()[1].role(), NodeRole::Content);
        assert_eq!(diagram.parent(NodeId::new(1)), Some(NodeId::ROOT));
    }

    #[test]
    fn test_root_style_ignores_palette() {
        let tree = TaxonomyNode::with_children("Root", vec![TaxonomyNode::leaf("A")]);
        let style = StyleConfig::default().with_color("Root", "#000000");
        let diagram = assemble_with(&tree, style, LabelConfig::default());
        assert_eq!(fill_hex(diagram.root().unwrap()), "#219ebc");
    }

    #[test]
    fn test_palette_by_position_and_inheritance() {
        let tree = TaxonomyNode::with_children(
            "Root",
            vec![
                TaxonomyNode::with_children("A", vec![TaxonomyNode::leaf("A1")]),
                TaxonomyNode::leaf("B"),
                TaxonomyNode::leaf("C"),
                TaxonomyNode::leaf("D"),
                TaxonomyNode::with_children(
                    "E",
                    vec![TaxonomyNode::with_children("E1", vec![TaxonomyNode::leaf("E2")])],
                ),
            ],
        );
        let diagram = assemble(&tree);

        assert_eq!(fill_hex(by_label(&diagram, "A")), "#8ecae6");
        assert_eq!(fill_hex(by_label(&diagram, "A1")), "#8ecae6");
        assert_eq!(fill_hex(by_label(&diagram, "B")), "#ffb703");
        assert_eq!(fill_hex(by_label(&diagram, "D")), "#f28482");
        // Fifth child wraps around the palette
        assert_eq!(fill_hex(by_label(&diagram, "E")), "#8ecae6");
        assert_eq!(fill_hex(by_label(&diagram, "E2")), "#8ecae6");
    }

    #[test]
    fn test_color_table_overrides_and_propagates() {
        let tree = TaxonomyNode::with_children(
            "Root",
            vec![TaxonomyNode::with_children(
                "A",
                vec![TaxonomyNode::with_children(
                    "Special",
                    vec![
                        TaxonomyNode::leaf("Inside"),
                        TaxonomyNode::with_papers("Listed", papers(&["P"])),
                    ],
                )],
            )],
        );
        let style = StyleConfig::default().with_color("Special", "#123456");
        let diagram = assemble_with(&tree, style, LabelConfig::default());

        assert_eq!(fill_hex(by_label(&diagram, "A")), "#8ecae6");
        assert_eq!(fill_hex(by_label(&diagram, "Special")), "#123456");
        assert_eq!(fill_hex(by_label(&diagram, "Inside")), "#123456");
        assert_eq!(fill_hex(by_label(&diagram, "Listed")), "#123456");
        // Content nodes keep the neutral fill
        assert_eq!(fill_hex(by_label(&diagram, "• P")), "#f8f9fa");
    }

    #[test]
    fn test_mapped_categories_solid_others_dashed() {
        let tree = TaxonomyNode::with_children(
            "Root",
            vec![
                TaxonomyNode::with_children(
                    "A",
                    vec![
                        TaxonomyNode::with_children("Sub", vec![TaxonomyNode::leaf("Leaf")]),
                        TaxonomyNode::with_children("Mapped", vec![TaxonomyNode::leaf("M1")]),
                    ],
                ),
                TaxonomyNode::with_children("Vision", vec![TaxonomyNode::leaf("V1")]),
            ],
        );
        let style = StyleConfig::default()
            .with_color("Mapped", "red")
            .with_color("Vision", "#00ff00");
        let diagram = assemble_with(&tree, style, LabelConfig::default());

        // Palette color without a table entry
        assert!(by_label(&diagram, "A").style().is_dashed());
        assert_eq!(
            by_label(&diagram, "A").style().text().emphasis(),
            FontEmphasis::Italic
        );
        assert!(by_label(&diagram, "Sub").style().is_dashed());

        assert!(!by_label(&diagram, "Mapped").style().is_dashed());
        assert!(!by_label(&diagram, "Vision").style().is_dashed());
        assert_eq!(
            by_label(&diagram, "Vision").style().text().emphasis(),
            FontEmphasis::Normal
        );

        let leaf = by_label(&diagram, "Leaf");
        assert_eq!(leaf.role(), NodeRole::Leaf);
        assert_eq!(leaf.style().shape(), NodeShape::Ellipse);
    }

    #[test]
    fn test_paper_categories_are_solid() {
        let tree = TaxonomyNode::with_children(
            "Root",
            vec![
                TaxonomyNode::with_children(
                    "A",
                    vec![TaxonomyNode::with_papers("Listed", papers(&["P"]))],
                ),
                TaxonomyNode::with_papers("Direct", papers(&["Q"])),
            ],
        );
        let diagram = assemble(&tree);

        for label in ["Listed", "Direct"] {
            let node = by_label(&diagram, label);
            assert_eq!(node.role(), NodeRole::Category);
            assert!(!node.style().is_dashed(), "{label} should be solid");
            assert_eq!(node.style().text().emphasis(), FontEmphasis::Normal);
        }
        assert_eq!(fill_hex(by_label(&diagram, "Listed")), "#8ecae6");
        assert_eq!(fill_hex(by_label(&diagram, "Direct")), "#ffb703");
    }

    #[test]
    fn test_category_labels_truncated_when_configured() {
        let tree = TaxonomyNode::with_children(
            "Root",
            vec![TaxonomyNode::leaf("A very long category name")],
        );
        let diagram = assemble_with(
            &tree,
            StyleConfig::default(),
            LabelConfig::new(Some(10), Some(80)),
        );
        assert_eq!(diagram.nodes()[1].label(), "A very ...");

        let untouched = assemble(&tree);
        assert_eq!(untouched.nodes()[1].label(), "A very long category name");
    }

    fn arb_tree() -> impl Strategy<Value = TaxonomyNode> {
        let leaf = prop_oneof![
            "[A-Z][a-z]{0,8}".prop_map(TaxonomyNode::leaf),
            ("[A-Z][a-z]{0,8}", prop::collection::vec("[a-z ]{1,12}", 1..4))
                .prop_map(|(name, papers)| TaxonomyNode::with_papers(name, papers)),
        ];
        leaf.prop_recursive(5, 64, 5, |inner| {
            ("[A-Z][a-z]{0,8}", prop::collection::vec(inner, 1..5))
                .prop_map(|(name, children)| TaxonomyNode::with_children(name, children))
        })
    }

    proptest! {
        #[test]
        fn prop_node_and_edge_counts(tree in arb_tree()) {
            let diagram = assemble(&tree);
            prop_assert_eq!(
                diagram.nodes_count(),
                tree.node_count() + tree.papers_node_count()
            );
            prop_assert_eq!(diagram.edges_count(), diagram.nodes_count() - 1);
            prop_assert!(diagram.is_connected_tree());
        }

        #[test]
        fn prop_children_follow_source_order(tree in arb_tree()) {
            let diagram = assemble(&tree);
            let mut stack = vec![(&tree, NodeId::ROOT)];
            while let Some((node, id)) = stack.pop() {
                let ids: Vec<NodeId> = diagram.children(id).collect();
                match node.content() {
                    NodeContent::Children(children) => {
                        prop_assert_eq!(ids.len(), children.len());
                        for (child, child_id) in children.iter().zip(&ids) {
                            prop_assert_eq!(diagram.node(*child_id).unwrap().label(), child.name());
                            stack.push((child, *child_id));
                        }
                        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
                    }
                    NodeContent::Papers(_) => {
                        prop_assert_eq!(ids.len(), 1);
                        prop_assert_eq!(diagram.node(ids[0]).unwrap().role(), NodeRole::Content);
                    }
                    NodeContent::Empty => prop_assert!(ids.is_empty()),
                }
            }
        }
    }
}
