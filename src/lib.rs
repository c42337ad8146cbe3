//! Shiny Graph
//!
//! A directed labeled multigraph store and a weighted specialization that
//! finds shortest routes between places.
//!
//! # Architecture
//!
//! - [`graph`]: the generic [`GraphStore`], a node set plus a parent-keyed
//!   edge relation. Parallel edges (same ordered pair, different labels) and
//!   self-loops are allowed; every mutation keeps the store's invariants.
//! - [`weighted`]: [`WeightedGraph`], a store whose labels are non-negative
//!   [`Distance`]s, and the [`Path`] type search returns.
//! - [`algo`]: best-first shortest-path search over candidate paths.
//! - [`loader`]: builds a [`WeightedGraph`] from a YAML map file.
//!
//! The store has no internal locking. Mutators take `&mut self`; wrap the
//! graph in a single lock if it must be mutated from several threads.
//! Searches take `&self` and can run concurrently.
//!
//! ## Example Usage
//!
//! ```rust
//! use shiny_graph::{GraphStore, WeightedGraph};
//!
//! // Generic store with string labels
//! let mut store: GraphStore<String, String> = GraphStore::new();
//! store.insert_edge("Bob".to_string(), "Alice".to_string(), "KNOWS".to_string()).unwrap();
//! store.insert_edge("Bob".to_string(), "Alice".to_string(), "WORKS_WITH".to_string()).unwrap();
//! assert_eq!(store.edge_labels(&"Bob".to_string(), &"Alice".to_string()).unwrap().len(), 2);
//!
//! // Weighted graph and shortest path
//! let mut map = WeightedGraph::new();
//! map.add_route("Wishka", "Irmoupolis", 5.0).unwrap();
//! map.add_route("Irmoupolis", "Ziouxuan", 8.0).unwrap();
//! map.add_route("Wishka", "Ziouxuan", 20.0).unwrap();
//!
//! let path = map.shortest_path("Wishka", "Ziouxuan");
//! assert_eq!(path.nodes().unwrap(), vec!["Wishka", "Irmoupolis", "Ziouxuan"]);
//! assert_eq!(path.total_distance().unwrap().value(), 13.0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod loader;
pub mod weighted;

// Re-export main types for convenience
pub use algo::{shortest_path, shortest_path_with, SearchConfig};
pub use graph::{Edge, GraphElement, GraphError, GraphResult, GraphStore, StoreConfig};
pub use loader::{load_weighted_graph, weighted_graph_from_yaml, LoadError, LoadResult, MapLoader};
pub use weighted::{Distance, Path, WeightedEdge, WeightedGraph};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
