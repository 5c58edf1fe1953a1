//! Node identifiers for the diagram arena.
//!
//! A [`NodeId`] is an index into a [`Diagram`](crate::semantic::Diagram)'s
//! node storage. Ids are handed out sequentially while the diagram is built,
//! so they are stable for the lifetime of one build and double as the
//! traversal order of the source tree.

use std::fmt;

/// Stable identity of a node within one diagram.
///
/// # Examples
///
/// ```
/// # use taxograph_core::identifier::NodeId;
/// let id = NodeId::new(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.to_string(), "n3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The id always assigned to the root of a diagram.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates an id from a raw arena index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of this id.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Renders as `n<index>`, which is a valid identifier for both DOT and SVG.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}
