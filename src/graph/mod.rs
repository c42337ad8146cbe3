//! Core multigraph implementation
//!
//! This module implements the directed labeled multigraph:
//! - A set of unique nodes, possibly with no incident edges
//! - Directed edges carrying a label, self-loops allowed
//! - Parallel edges between the same nodes when their labels differ

pub mod edge;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use store::{GraphError, GraphResult, GraphStore, StoreConfig};
pub use types::GraphElement;
