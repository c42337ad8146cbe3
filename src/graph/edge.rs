//! Edge triple for the multigraph
//!
//! The store does not keep `Edge` values around; its adjacency maps are the
//! source of truth. `Edge` is the flattened view handed out by
//! [`GraphStore::edges`](super::GraphStore::edges).

use super::types::GraphElement;
use std::fmt;

/// A directed, labeled edge
///
/// Two edges are equal when parent, child and label are all equal. Edges that
/// share (parent, child) but differ in label are parallel edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<K, V> {
    /// Source node
    pub parent: K,

    /// Destination node
    pub child: K,

    /// Data attached to the edge
    pub label: V,
}

impl<K: GraphElement, V: GraphElement> Edge<K, V> {
    pub fn new(parent: K, child: K, label: V) -> Self {
        Edge { parent, child, label }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Edge<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.parent, self.child, self.label)
    }
}
