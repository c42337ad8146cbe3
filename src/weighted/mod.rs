//! Weighted graph of places and distances
//!
//! [`WeightedGraph`] wraps a [`GraphStore`] whose labels are [`Distance`]s
//! rather than extending it; it only uses the store's public surface.

pub mod distance;
pub mod path;

pub use distance::Distance;
pub use path::{Path, WeightedEdge};

use crate::algo::{shortest_path, shortest_path_with, SearchConfig};
use crate::graph::{GraphResult, GraphStore, StoreConfig};

/// Directed graph of named places joined by non-negative distances
///
/// Build it with [`add_place`](Self::add_place) and
/// [`add_route`](Self::add_route) (or through [`graph_mut`](Self::graph_mut)),
/// then query it with [`shortest_path`](Self::shortest_path). Searches only
/// read the graph, so any number can run at once on a shared reference.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    graph: GraphStore<String, Distance>,
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        WeightedGraph {
            graph: GraphStore::with_config(config),
        }
    }

    pub fn from_store(graph: GraphStore<String, Distance>) -> Self {
        WeightedGraph { graph }
    }

    /// The underlying store
    pub fn graph(&self) -> &GraphStore<String, Distance> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut GraphStore<String, Distance> {
        &mut self.graph
    }

    pub fn into_store(self) -> GraphStore<String, Distance> {
        self.graph
    }

    /// Add an unconnected place
    pub fn add_place(&mut self, name: impl Into<String>) -> GraphResult<()> {
        self.graph.insert_node(name.into())
    }

    /// Add a one-way route `from -> to`
    ///
    /// Fails with `InvalidDistance` when `distance` is negative or not finite.
    pub fn add_route(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
    ) -> GraphResult<()> {
        let distance = Distance::new(distance)?;
        self.graph.insert_edge(to.into(), from.into(), distance)
    }

    /// Shortest route between two places, or the empty path if there is none
    pub fn shortest_path(&self, start: &str, end: &str) -> Path {
        shortest_path(&self.graph, &start.to_string(), &end.to_string())
    }

    /// Shortest route under the limits of `config`
    pub fn shortest_path_with(
        &self,
        start: &str,
        end: &str,
        config: &SearchConfig,
    ) -> GraphResult<Path> {
        shortest_path_with(&self.graph, &start.to_string(), &end.to_string(), config)
    }
}

impl From<GraphStore<String, Distance>> for WeightedGraph {
    fn from(graph: GraphStore<String, Distance>) -> Self {
        WeightedGraph::from_store(graph)
    }
}
