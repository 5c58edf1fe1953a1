//! The source taxonomy tree.
//!
//! A [`TaxonomyNode`] is a named category whose [`NodeContent`] is either a
//! list of child categories, a list of paper titles, or nothing at all. The
//! "at most one of children or papers" rule of the input format is encoded in
//! the type: a node carries exactly one [`NodeContent`] variant.
//!
//! Trees are produced by `taxograph-parser` after validation, or built
//! directly with the constructors here:
//!
//! ```
//! # use taxograph_core::taxonomy::TaxonomyNode;
//! let tree = TaxonomyNode::with_children(
//!     "Root",
//!     vec![
//!         TaxonomyNode::with_papers("A", vec!["P1".to_string(), "P2".to_string()]),
//!         TaxonomyNode::leaf("B"),
//!     ],
//! );
//! assert_eq!(tree.node_count(), 3);
//! assert_eq!(tree.papers_node_count(), 1);
//! ```

use serde::{Serialize, Serializer, ser::SerializeMap};

/// What a taxonomy node holds below its name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeContent {
    /// Ordered sub-categories.
    Children(Vec<TaxonomyNode>),
    /// Ordered, non-empty list of paper titles.
    Papers(Vec<String>),
    /// A bare leaf category.
    #[default]
    Empty,
}

/// A named node of the taxonomy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyNode {
    name: String,
    content: NodeContent,
}

impl TaxonomyNode {
    /// Creates a node with explicit content.
    ///
    /// Empty child or paper lists are normalized to [`NodeContent::Empty`].
    pub fn new(name: impl Into<String>, content: NodeContent) -> Self {
        let content = match content {
            NodeContent::Children(children) if children.is_empty() => NodeContent::Empty,
            NodeContent::Papers(papers) if papers.is_empty() => NodeContent::Empty,
            other => other,
        };
        Self {
            name: name.into(),
            content,
        }
    }

    /// Creates a bare leaf category.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, NodeContent::Empty)
    }

    /// Creates a category with ordered children.
    pub fn with_children(name: impl Into<String>, children: Vec<TaxonomyNode>) -> Self {
        Self::new(name, NodeContent::Children(children))
    }

    /// Creates a category holding a list of papers.
    pub fn with_papers(name: impl Into<String>, papers: Vec<String>) -> Self {
        Self::new(name, NodeContent::Papers(papers))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    /// Returns the child categories, or an empty slice for other content.
    pub fn children(&self) -> &[TaxonomyNode] {
        match &self.content {
            NodeContent::Children(children) => children,
            _ => &[],
        }
    }

    /// Returns the paper titles, if this node carries a paper list.
    pub fn papers(&self) -> Option<&[String]> {
        match &self.content {
            NodeContent::Papers(papers) => Some(papers),
            _ => None,
        }
    }

    /// Returns true if the node has neither children nor papers.
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Empty)
    }

    /// Counts every node of the tree rooted here, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TaxonomyNode::node_count)
            .sum::<usize>()
    }

    /// Counts the nodes of the tree rooted here that carry a paper list.
    pub fn papers_node_count(&self) -> usize {
        let own = usize::from(self.papers().is_some());
        own + self
            .children()
            .iter()
            .map(TaxonomyNode::papers_node_count)
            .sum::<usize>()
    }

    /// Returns the number of levels in the tree rooted here.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TaxonomyNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Serializes back into the input document shape:
/// `{"name": ..., "children": [...]}` or `{"name": ..., "papers": [...]}`.
impl Serialize for TaxonomyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.is_leaf() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", &self.name)?;
        match &self.content {
            NodeContent::Children(children) => map.serialize_entry("children", children)?,
            NodeContent::Papers(papers) => map.serialize_entry("papers", papers)?,
            NodeContent::Empty => {}
        }
        map.end()
    }
}
