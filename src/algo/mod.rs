//! Graph algorithms module
//!
//! Only weighted shortest path is provided; it runs directly on the store's
//! child listing, so no separate algorithm view of the graph is built.

pub mod pathfinding;

pub use pathfinding::{shortest_path, shortest_path_with, SearchConfig};
