//! Map file loading
//!
//! A map file is a YAML mapping from each place to the places it leads to and
//! the distance of each route:
//!
//! ```yaml
//! Wishka:
//!   Irmoupolis: 5
//!   Tetrov: 30
//! Irmoupolis:
//!   Ziouxuan: 8
//! Larti:        # no outgoing routes
//! ```
//!
//! `Wishka: {Irmoupolis: 5}` becomes the edge `Wishka -> Irmoupolis` with
//! distance 5. A place with an empty (or null) mapping is still added to the
//! graph. Entries are applied in file order.

use crate::graph::{GraphError, StoreConfig};
use crate::weighted::WeightedGraph;
use indexmap::IndexMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading a map file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read map file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed map file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid entry for {node}: {source}")]
    Graph {
        node: String,
        #[source]
        source: GraphError,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// place -> (neighbor -> distance), `None` for a place with no routes
type MapFile = IndexMap<String, Option<IndexMap<String, f64>>>;

/// Builds a [`WeightedGraph`] from map files
#[derive(Debug, Clone, Default)]
pub struct MapLoader {
    store_config: StoreConfig,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for the store backing every graph this loader builds
    pub fn with_store_config(store_config: StoreConfig) -> Self {
        MapLoader { store_config }
    }

    /// Read and load the map file at `path`
    pub fn load_file(&self, path: impl AsRef<Path>) -> LoadResult<WeightedGraph> {
        let path = path.as_ref();
        debug!("Reading map file {:?}", path);

        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&text)
    }

    /// Load a map from YAML text
    pub fn load_str(&self, text: &str) -> LoadResult<WeightedGraph> {
        // An empty document is an empty map
        let file: MapFile = if text.trim().is_empty() {
            MapFile::new()
        } else {
            serde_yaml::from_str::<Option<MapFile>>(text)?.unwrap_or_default()
        };

        let mut graph = WeightedGraph::with_config(self.store_config);
        for (node, neighbors) in file {
            if !graph.graph().contains_node(&node) {
                graph
                    .add_place(node.clone())
                    .map_err(|source| LoadError::Graph {
                        node: node.clone(),
                        source,
                    })?;
            }

            for (neighbor, distance) in neighbors.into_iter().flatten() {
                debug!("Adding route {} -> {} ({})", node, neighbor, distance);
                graph
                    .add_route(node.clone(), neighbor, distance)
                    .map_err(|source| LoadError::Graph {
                        node: node.clone(),
                        source,
                    })?;
            }
        }

        info!(
            "Loaded map with {} places and {} routes",
            graph.graph().node_count(),
            graph.graph().edge_count()
        );
        Ok(graph)
    }
}

/// Load the map file at `path` into a fresh graph
pub fn load_weighted_graph(path: impl AsRef<Path>) -> LoadResult<WeightedGraph> {
    MapLoader::new().load_file(path)
}

/// Load a map from YAML text into a fresh graph
pub fn weighted_graph_from_yaml(text: &str) -> LoadResult<WeightedGraph> {
    MapLoader::new().load_str(text)
}
