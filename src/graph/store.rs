//! In-memory multigraph storage
//!
//! The store is parent-keyed: an outer map from every node to an inner map
//! from each of its children to the set of labels on the edges between them.
//!
//! ```text
//! adjacency[parent][child] = { label, label, ... }
//! ```
//!
//! Child lookups and edge insertion/removal are a couple of hash probes.
//! Parent lookups have no reverse index and scan every adjacency entry, which
//! is acceptable because search only ever walks children.

use super::edge::Edge;
use super::types::GraphElement;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
///
/// Offending nodes and labels are rendered with `Display` so the error type
/// stays independent of the store's element types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid argument: {0} must not be absent")]
    InvalidArgument(&'static str),

    #[error("Invalid distance {0}: must be finite and non-negative")]
    InvalidDistance(f64),

    #[error("Node {0} already exists")]
    DuplicateNode(String),

    #[error("Edge <{parent}, {child}, {label}> already exists")]
    DuplicateEdge {
        parent: String,
        child: String,
        label: String,
    },

    #[error("Node {0} not found")]
    UnknownNode(String),

    #[error("{}", describe_unknown_edge(.parent, .child, .label))]
    UnknownEdge {
        parent: String,
        child: String,
        label: Option<String>,
    },

    #[error("Path has no edges")]
    EmptyPath,

    #[error("Path is not continuous at edge {index}")]
    DiscontinuousPath { index: usize },

    #[error("Search aborted after expanding {expanded} nodes")]
    SearchAborted { expanded: usize },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

fn describe_unknown_edge(parent: &str, child: &str, label: &Option<String>) -> String {
    match label {
        Some(label) => format!("Edge <{}, {}, {}> not found", parent, child, label),
        None => format!("Node {} is not a child of {}", child, parent),
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Store behaviour knobs
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreConfig {
    /// Run [`GraphStore::verify`] around every operation and panic on failure.
    ///
    /// Meant for tests and debugging; every check is a full scan.
    pub check_invariants: bool,
}

/// Directed labeled multigraph
///
/// Generic over the node identity `K` and the edge label `V`. Parallel edges
/// between the same ordered pair are allowed as long as their labels differ,
/// and self-loops are allowed.
///
/// Mutators take `&mut self`, so a single writer is enforced by ownership.
/// Sharing a store between threads that mutate it needs one external lock
/// around the whole store: a node removal is several map operations that are
/// not atomic as a unit.
#[derive(Debug, Clone)]
pub struct GraphStore<K, V> {
    /// Node set and outgoing edges: parent -> child -> labels
    adjacency: FxHashMap<K, FxHashMap<K, FxHashSet<V>>>,

    config: StoreConfig,
}

impl<K: GraphElement, V: GraphElement> GraphStore<K, V> {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        GraphStore {
            adjacency: FxHashMap::default(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Add a node with no incident edges
    pub fn insert_node(&mut self, node: K) -> GraphResult<()> {
        self.check_rep();

        if node.is_absent() {
            return Err(GraphError::InvalidArgument("node"));
        }
        if self.adjacency.contains_key(&node) {
            return Err(GraphError::DuplicateNode(node.to_string()));
        }

        debug!("Inserting node {}", node);
        self.adjacency.insert(node, FxHashMap::default());

        self.check_rep();
        Ok(())
    }

    /// Remove a node and every edge where it is the parent or the child
    ///
    /// Returns the number of edges removed along with the node.
    pub fn remove_node(&mut self, node: &K) -> GraphResult<usize> {
        self.check_rep();

        let outgoing = self
            .adjacency
            .remove(node)
            .ok_or_else(|| GraphError::UnknownNode(node.to_string()))?;

        // Outgoing edges (self-loops included) went away with the node's own entry
        let mut removed: usize = outgoing.values().map(FxHashSet::len).sum();

        for children in self.adjacency.values_mut() {
            if let Some(labels) = children.remove(node) {
                removed += labels.len();
            }
        }

        debug!("Removed node {} and {} incident edges", node, removed);
        self.check_rep();
        Ok(removed)
    }

    /// Add the edge `parent -> child` labeled `label`
    ///
    /// Endpoints that are not yet nodes of the store are inserted. A failed
    /// insertion leaves the store unchanged.
    pub fn insert_edge(&mut self, child: K, parent: K, label: V) -> GraphResult<()> {
        self.check_rep();

        if child.is_absent() {
            return Err(GraphError::InvalidArgument("child"));
        }
        if parent.is_absent() {
            return Err(GraphError::InvalidArgument("parent"));
        }
        if label.is_absent() {
            return Err(GraphError::InvalidArgument("label"));
        }
        if self.contains_edge(&child, &parent, &label) {
            return Err(GraphError::DuplicateEdge {
                parent: parent.to_string(),
                child: child.to_string(),
                label: label.to_string(),
            });
        }

        debug!("Inserting edge <{}, {}, {}>", parent, child, label);
        self.adjacency.entry(child.clone()).or_default();
        self.adjacency
            .entry(parent)
            .or_default()
            .entry(child)
            .or_default()
            .insert(label);

        self.check_rep();
        Ok(())
    }

    /// Remove exactly the edge `parent -> child` labeled `label`
    ///
    /// When it was the last label between the two nodes the pair disappears
    /// from the adjacency relation. Both nodes stay in the store.
    pub fn remove_edge(&mut self, child: &K, parent: &K, label: &V) -> GraphResult<()> {
        self.check_rep();

        let children = self
            .adjacency
            .get_mut(parent)
            .ok_or_else(|| GraphError::UnknownNode(parent.to_string()))?;

        let labels = children.get_mut(child).ok_or_else(|| GraphError::UnknownEdge {
            parent: parent.to_string(),
            child: child.to_string(),
            label: None,
        })?;

        if !labels.remove(label) {
            return Err(GraphError::UnknownEdge {
                parent: parent.to_string(),
                child: child.to_string(),
                label: Some(label.to_string()),
            });
        }
        if labels.is_empty() {
            children.remove(child);
        }

        debug!("Removed edge <{}, {}, {}>", parent, child, label);
        self.check_rep();
        Ok(())
    }

    /// All nodes, in no particular order
    pub fn list_nodes(&self) -> FxHashSet<K> {
        self.adjacency.keys().cloned().collect()
    }

    /// Snapshot of the children of `parent` with the labels leading to each
    ///
    /// Every entry has a non-empty label set.
    pub fn list_children(&self, parent: &K) -> GraphResult<FxHashMap<K, FxHashSet<V>>> {
        self.check_rep();

        Ok(self
            .children(parent)?
            .map(|(child, labels)| (child.clone(), labels.clone()))
            .collect())
    }

    /// Borrowing iterator over the children of `parent` and their labels
    ///
    /// Same content as [`list_children`](Self::list_children) without copying
    /// the label sets.
    pub fn children<'a>(
        &'a self,
        parent: &K,
    ) -> GraphResult<impl Iterator<Item = (&'a K, &'a FxHashSet<V>)> + 'a> {
        let children = self
            .adjacency
            .get(parent)
            .ok_or_else(|| GraphError::UnknownNode(parent.to_string()))?;

        Ok(children.iter().filter(|(_, labels)| !labels.is_empty()))
    }

    /// Parents of `child` with the labels on each edge leading to it
    ///
    /// There is no reverse index: this scans the whole adjacency relation.
    pub fn list_parents(&self, child: &K) -> GraphResult<FxHashMap<K, FxHashSet<V>>> {
        self.check_rep();

        if !self.adjacency.contains_key(child) {
            return Err(GraphError::UnknownNode(child.to_string()));
        }

        Ok(self
            .adjacency
            .iter()
            .filter_map(|(parent, children)| {
                children
                    .get(child)
                    .filter(|labels| !labels.is_empty())
                    .map(|labels| (parent.clone(), labels.clone()))
            })
            .collect())
    }

    /// Labels on the edges `parent -> child`
    pub fn edge_labels(&self, child: &K, parent: &K) -> GraphResult<FxHashSet<V>> {
        self.check_rep();

        let children = self
            .adjacency
            .get(parent)
            .ok_or_else(|| GraphError::UnknownNode(parent.to_string()))?;

        children.get(child).cloned().ok_or_else(|| GraphError::UnknownEdge {
            parent: parent.to_string(),
            child: child.to_string(),
            label: None,
        })
    }

    /// Check if a node exists
    pub fn contains_node(&self, node: &K) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Check if the exact edge triple exists
    pub fn contains_edge(&self, child: &K, parent: &K, label: &V) -> bool {
        self.adjacency
            .get(parent)
            .and_then(|children| children.get(child))
            .is_some_and(|labels| labels.contains(label))
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Get total number of edges, parallel edges counted separately
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .values()
            .flat_map(FxHashMap::values)
            .map(FxHashSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Every edge as a triple, in no particular order
    pub fn edges(&self) -> impl Iterator<Item = Edge<K, V>> + '_ {
        self.adjacency.iter().flat_map(|(parent, children)| {
            children.iter().flat_map(move |(child, labels)| {
                labels
                    .iter()
                    .map(move |label| Edge::new(parent.clone(), child.clone(), label.clone()))
            })
        })
    }

    /// Clear all nodes and edges
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Check every representation invariant
    ///
    /// - no absent node or label is stored
    /// - no (parent, child) entry has an empty label set
    /// - every child is itself a node of the store
    pub fn verify(&self) -> GraphResult<()> {
        for (parent, children) in &self.adjacency {
            if parent.is_absent() {
                return Err(GraphError::InvariantViolation(
                    "absent node stored".to_string(),
                ));
            }
            for (child, labels) in children {
                if !self.adjacency.contains_key(child) {
                    return Err(GraphError::InvariantViolation(format!(
                        "child {} of {} is not a node",
                        child, parent
                    )));
                }
                if labels.is_empty() {
                    return Err(GraphError::InvariantViolation(format!(
                        "empty label set between {} and {}",
                        parent, child
                    )));
                }
                if labels.iter().any(GraphElement::is_absent) {
                    return Err(GraphError::InvariantViolation(format!(
                        "absent label between {} and {}",
                        parent, child
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_rep(&self) {
        if self.config.check_invariants {
            if let Err(e) = self.verify() {
                panic!("graph store corrupted: {}", e);
            }
        }
    }
}

impl<K: GraphElement, V: GraphElement> Default for GraphStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
