//! The diagram model handed to rendering backends.
//!
//! A [`Diagram`] is an arena of [`DiagramNode`]s addressed by [`NodeId`] plus
//! the ordered list of [`DiagramEdge`]s between them. It is what the
//! tree-to-diagram renderer produces and what every exporter consumes.
//!
//! # Architecture
//!
//! - Nodes live in a `Vec`, so a [`NodeId`] is simply the insertion index.
//! - Edges live in a `Vec` in insertion order.
//! - Each node keeps the indices of its outgoing edges (in insertion order)
//!   and its single parent.
//!
//! The arena only grows; nothing is ever removed, so ids never dangle. The
//! structure enforces the tree shape: an edge may only target a node that
//! has no parent yet.

use thiserror::Error;

use crate::{draw::NodeStyle, identifier::NodeId};

/// Errors raised when an edge would break the tree shape of a [`Diagram`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiagramError {
    #[error("unknown node `{0}`")]
    UnknownNode(NodeId),

    #[error("node `{child}` already has parent `{parent}`")]
    DuplicateParent { child: NodeId, parent: NodeId },

    #[error("node `{0}` cannot be its own child")]
    SelfLoop(NodeId),

    #[error("the root node cannot have a parent")]
    RootAsChild,
}

/// The part a node plays in the taxonomy diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// The single top node.
    Root,
    /// A grouping level: has children or a paper list.
    Category,
    /// A category with neither children nor papers.
    Leaf,
    /// The list of papers of one category.
    Content,
}

/// One node of the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    id: NodeId,
    label: String,
    role: NodeRole,
    style: NodeStyle,
}

impl DiagramNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The display label. Content nodes hold one line per paper.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    /// Returns the label split into display lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.label.lines()
    }
}

/// A directed parent to child connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagramEdge {
    parent: NodeId,
    child: NodeId,
}

impl DiagramEdge {
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn child(&self) -> NodeId {
        self.child
    }
}

/// Arena of diagram nodes and edges forming a single rooted tree.
///
/// # Examples
///
/// ```
/// # use taxograph_core::{draw::{NodeShape, NodeStyle, StrokeDefinition, TextDefinition},
/// #     semantic::{Diagram, NodeRole}};
/// let style = NodeStyle::new(NodeShape::Box, StrokeDefinition::default(), TextDefinition::default());
///
/// let mut diagram = Diagram::new();
/// let root = diagram.add_node("Root", NodeRole::Root, style.clone());
/// let child = diagram.add_node("A", NodeRole::Leaf, style);
/// diagram.add_edge(root, child).unwrap();
///
/// assert_eq!(diagram.nodes_count(), 2);
/// assert_eq!(diagram.parent(child), Some(root));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
    outgoing_edges: Vec<Vec<usize>>,
    parents: Vec<Option<NodeId>>,
}

impl Diagram {
    /// Creates a new empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its id.
    ///
    /// The first node added is the root and receives [`NodeId::ROOT`].
    pub fn add_node(&mut self, label: impl Into<String>, role: NodeRole, style: NodeStyle) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(DiagramNode {
            id,
            label: label.into(),
            role,
            style,
        });
        self.outgoing_edges.push(Vec::new());
        self.parents.push(None);
        id
    }

    /// Connects `parent` to `child`.
    ///
    /// # Errors
    ///
    /// Returns a [`DiagramError`] if either node is unknown, if `child` is
    /// the root or already has a parent, or if the edge would be a self-loop.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<(), DiagramError> {
        self.check_node(parent)?;
        self.check_node(child)?;
        if parent == child {
            return Err(DiagramError::SelfLoop(child));
        }
        if child == NodeId::ROOT {
            return Err(DiagramError::RootAsChild);
        }
        if let Some(existing) = self.parents[child.index()] {
            return Err(DiagramError::DuplicateParent {
                child,
                parent: existing,
            });
        }

        self.outgoing_edges[parent.index()].push(self.edges.len());
        self.parents[child.index()] = Some(parent);
        self.edges.push(DiagramEdge { parent, child });
        Ok(())
    }

    fn check_node(&self, id: NodeId) -> Result<(), DiagramError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(DiagramError::UnknownNode(id))
        }
    }

    /// Returns the root node, or `None` for an empty diagram.
    pub fn root(&self) -> Option<&DiagramNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.get(id.index())
    }

    /// Returns all nodes in id (traversal) order.
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Returns all edges in insertion order.
    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the children of `id` in the order their edges were added.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing_edges
            .get(id.index())
            .into_iter()
            .flatten()
            .map(|&edge_idx| self.edges[edge_idx].child)
    }

    /// Returns the parent of `id`, or `None` for the root and unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        std::iter::successors(self.parent(id), |&parent| self.parent(parent)).count()
    }

    /// Returns true if every node except the root has exactly one parent.
    pub fn is_connected_tree(&self) -> bool {
        self.parents
            .iter()
            .enumerate()
            .all(|(idx, parent)| (idx == 0) == parent.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{NodeShape, StrokeDefinition, TextDefinition};

    fn style() -> NodeStyle {
        NodeStyle::new(
            NodeShape::Box,
            StrokeDefinition::default(),
            TextDefinition::default(),
        )
    }

    fn small_tree() -> (Diagram, [NodeId; 4]) {
        let mut diagram = Diagram::new();
        let root = diagram.add_node("Root", NodeRole::Root, style());
        let a = diagram.add_node("A", NodeRole::Category, style());
        let b = diagram.add_node("B", NodeRole::Leaf, style());
        let c = diagram.add_node("• P1", NodeRole::Content, style());
        diagram.add_edge(root, a).unwrap();
        diagram.add_edge(root, b).unwrap();
        diagram.add_edge(a, c).unwrap();
        (diagram, [root, a, b, c])
    }

    #[test]
    fn test_ids_are_sequential() {
        let (diagram, ids) = small_tree();
        for (idx, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), idx);
            assert_eq!(diagram.node(*id).unwrap().id(), *id);
        }
        assert_eq!(diagram.root().unwrap().id(), NodeId::ROOT);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let (diagram, [root, a, b, c]) = small_tree();
        assert_eq!(diagram.children(root).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(diagram.children(a).collect::<Vec<_>>(), vec![c]);
        assert_eq!(diagram.children(b).count(), 0);
    }

    #[test]
    fn test_parent_and_depth() {
        let (diagram, [root, a, _, c]) = small_tree();
        assert_eq!(diagram.parent(root), None);
        assert_eq!(diagram.parent(c), Some(a));
        assert_eq!(diagram.depth(root), 0);
        assert_eq!(diagram.depth(a), 1);
        assert_eq!(diagram.depth(c), 2);
    }

    #[test]
    fn test_connected_tree() {
        let (diagram, _) = small_tree();
        assert!(diagram.is_connected_tree());
        assert_eq!(diagram.edges_count(), diagram.nodes_count() - 1);

        let mut orphaned = diagram.clone();
        orphaned.add_node("orphan", NodeRole::Leaf, style());
        assert!(!orphaned.is_connected_tree());
    }

    #[test]
    fn test_add_edge_rejects_second_parent() {
        let (mut diagram, [_, a, b, c]) = small_tree();
        let err = diagram.add_edge(b, c).unwrap_err();
        assert_eq!(
            err,
            DiagramError::DuplicateParent {
                child: c,
                parent: a
            }
        );
    }

    #[test]
    fn test_add_edge_rejects_invalid_targets() {
        let (mut diagram, [root, a, ..]) = small_tree();
        assert_eq!(diagram.add_edge(a, a), Err(DiagramError::SelfLoop(a)));
        assert_eq!(diagram.add_edge(a, root), Err(DiagramError::RootAsChild));
        assert_eq!(
            diagram.add_edge(a, NodeId::new(99)),
            Err(DiagramError::UnknownNode(NodeId::new(99)))
        );
    }

    #[test]
    fn test_lines_split_content_label() {
        let (diagram, [.., c]) = small_tree();
        let mut diagram = diagram;
        let multi = diagram.add_node("• P1\n• P2", NodeRole::Content, style());
        diagram.add_edge(c, multi).unwrap();
        assert_eq!(
            diagram.node(multi).unwrap().lines().collect::<Vec<_>>(),
            vec!["• P1", "• P2"]
        );
    }
}
