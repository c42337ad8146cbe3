//! Weighted shortest path
//!
//! Best-first search over whole paths rather than per-node distances: the
//! frontier holds candidate paths ordered by accumulated distance, so the
//! route falls out of the winning candidate and no predecessor map is kept.
//! Stale candidates are left in the heap and dropped when popped (lazy
//! deletion instead of decrease-key). Requires non-negative weights, which
//! [`Distance`] guarantees.

use crate::graph::{GraphElement, GraphError, GraphResult, GraphStore};
use crate::weighted::{Distance, Path, WeightedEdge};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Limits for a single search
///
/// Checked between iterations of the search loop, before a node is expanded.
/// A search that hits one fails with [`GraphError::SearchAborted`].
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Give up once this instant has passed
    pub deadline: Option<Instant>,
    /// Give up rather than expand more than this many nodes
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Config with a deadline `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        SearchConfig {
            deadline: Some(Instant::now() + timeout),
            ..Default::default()
        }
    }

    fn limit_reached(&self, expanded: usize) -> bool {
        if self.max_expansions.is_some_and(|max| expanded >= max) {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Frontier entry, ordered so that `BinaryHeap` pops the cheapest path first
struct Candidate<K> {
    path: Path<K>,
}

impl<K> PartialEq for Candidate<K>
where
    K: GraphElement,
{
    fn eq(&self, other: &Self) -> bool {
        self.path.cost() == other.path.cost()
    }
}

impl<K: GraphElement> Eq for Candidate<K> {}

impl<K: GraphElement> Ord for Candidate<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap
        other.path.cost().cmp(&self.path.cost())
    }
}

impl<K: GraphElement> PartialOrd for Candidate<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `end`
///
/// Returns the empty path when `end` cannot be reached, including when either
/// endpoint is not in the store. Routes whose total distance exceeds
/// `f64::MAX` count as unreachable. When several routes share the minimal
/// distance any one of them may be returned.
///
/// When `start == end` the result is a single zero-distance hop from `start`
/// to itself. That hop need not be an edge of the store, so
/// [`GraphStore::edge_labels`] may not know it.
pub fn shortest_path<K: GraphElement>(
    store: &GraphStore<K, Distance>,
    start: &K,
    end: &K,
) -> Path<K> {
    // Without limits the search cannot abort
    shortest_path_with(store, start, end, &SearchConfig::default()).unwrap_or_default()
}

/// [`shortest_path`] under the limits of `config`
pub fn shortest_path_with<K: GraphElement>(
    store: &GraphStore<K, Distance>,
    start: &K,
    end: &K,
    config: &SearchConfig,
) -> GraphResult<Path<K>> {
    if !store.contains_node(start) || !store.contains_node(end) {
        debug!("No route from {} to {}: endpoint not in graph", start, end);
        return Ok(Path::empty());
    }

    let mut visited: FxHashSet<K> = FxHashSet::default();
    let mut frontier = BinaryHeap::new();
    frontier.push(Candidate {
        path: Path::bootstrap(start.clone()),
    });
    let mut expanded = 0usize;

    while let Some(Candidate { path }) = frontier.pop() {
        let node = path.end_node()?;
        trace!("Popped {} at cost {} ({} queued)", node, path.cost(), frontier.len());

        if node == end {
            debug!("Route from {} to {} found at cost {} after {} expansions", start, end, path.cost(), expanded);
            // start == end: the bootstrap hop is the whole route
            if path.len() == 1 {
                return Ok(path);
            }
            return Ok(path.without_bootstrap());
        }

        if visited.contains(node) {
            continue;
        }

        if config.limit_reached(expanded) {
            warn!("Shortest path search from {} to {} aborted after {} expansions", start, end, expanded);
            return Err(GraphError::SearchAborted { expanded });
        }

        for (child, labels) in store.children(node)? {
            if visited.contains(child) {
                continue;
            }
            // Parallel edges collapse to the cheapest one
            let Some(&distance) = labels.iter().min() else {
                continue;
            };
            // A route whose total no longer fits in an f64 is treated as unreachable
            let Some(next) = path.extended(WeightedEdge::new(node.clone(), child.clone(), distance))
            else {
                trace!("Dropping route {} -> {}: total distance overflows", node, child);
                continue;
            };
            frontier.push(Candidate { path: next });
        }

        visited.insert(node.clone());
        expanded += 1;
    }

    debug!("No route from {} to {} after {} expansions", start, end, expanded);
    Ok(Path::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StoreConfig;

    fn store(edges: &[(&str, &str, f64)]) -> GraphStore<String, Distance> {
        let mut store = GraphStore::with_config(StoreConfig {
            check_invariants: true,
        });
        for &(from, to, weight) in edges {
            store
                .insert_edge(to.to_string(), from.to_string(), Distance::new(weight).unwrap())
                .unwrap();
        }
        store
    }

    fn route(store: &GraphStore<String, Distance>, start: &str, end: &str) -> Path {
        shortest_path(store, &start.to_string(), &end.to_string())
    }

    #[test]
    fn test_prefers_cheaper_longer_route() {
        // 1->2 (10.0), 2->3 (5.0), 1->3 (50.0)
        let store = store(&[("1", "2", 10.0), ("1", "3", 50.0), ("2", "3", 5.0)]);

        let path = route(&store, "1", "3");
        assert_eq!(path.nodes().unwrap(), vec!["1", "2", "3"]);
        assert_eq!(path.total_distance().unwrap().value(), 15.0);
    }

    #[test]
    fn test_parallel_edges_use_minimum() {
        let store = store(&[("P", "C", 50.0), ("P", "C", 30.0), ("C", "T", 1.0)]);

        let path = route(&store, "P", "T");
        assert_eq!(path.len(), 2);
        assert_eq!(path.edges()[0].distance.value(), 30.0);
        assert_eq!(path.total_distance().unwrap().value(), 31.0);
    }

    #[test]
    fn test_unreachable_returns_empty() {
        let store = store(&[("A", "B", 1.0), ("C", "A", 1.0)]);

        let path = route(&store, "A", "C");
        assert!(path.is_empty());
        assert_eq!(path.total_distance(), Err(GraphError::EmptyPath));
    }

    #[test]
    fn test_absent_endpoints_return_empty() {
        let store = store(&[("A", "B", 1.0)]);

        assert!(route(&store, "ghost", "B").is_empty());
        assert!(route(&store, "A", "ghost").is_empty());
        assert!(route(&store, "ghost", "ghost").is_empty());
    }

    #[test]
    fn test_start_equals_end() {
        let store = store(&[("A", "B", 1.0), ("B", "A", 1.0)]);

        let path = route(&store, "A", "A");
        assert_eq!(path.nodes().unwrap(), vec!["A", "A"]);
        assert_eq!(path.total_distance().unwrap(), Distance::ZERO);

        // The zero-distance hop is not an edge of the store
        let a = "A".to_string();
        assert!(matches!(
            store.edge_labels(&a, &a),
            Err(GraphError::UnknownEdge { label: None, .. })
        ));
    }

    #[test]
    fn test_edges_are_directed() {
        let store = store(&[("A", "B", 1.0)]);

        assert_eq!(route(&store, "A", "B").len(), 1);
        assert!(route(&store, "B", "A").is_empty());
    }

    #[test]
    fn test_cycles_terminate() {
        let store = store(&[
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("C", "A", 1.0),
            ("C", "C", 0.0),
        ]);

        assert!(route(&store, "A", "Z").is_empty());
        assert_eq!(route(&store, "A", "C").total_distance().unwrap().value(), 2.0);
    }

    #[test]
    fn test_zero_weight_edges() {
        let store = store(&[("A", "B", 0.0), ("B", "C", 0.0), ("A", "C", 1.0)]);

        let path = route(&store, "A", "C");
        assert_eq!(path.nodes().unwrap(), vec!["A", "B", "C"]);
        assert_eq!(path.total_distance().unwrap(), Distance::ZERO);
    }

    #[test]
    fn test_expansion_budget_aborts() {
        let store = store(&[("A", "B", 1.0), ("B", "C", 1.0), ("C", "D", 1.0)]);
        let config = SearchConfig {
            max_expansions: Some(2),
            ..Default::default()
        };

        let result = shortest_path_with(&store, &"A".to_string(), &"D".to_string(), &config);
        assert_eq!(result, Err(GraphError::SearchAborted { expanded: 2 }));

        let config = SearchConfig {
            max_expansions: Some(3),
            ..Default::default()
        };
        let path = shortest_path_with(&store, &"A".to_string(), &"D".to_string(), &config).unwrap();
        assert_eq!(path.total_distance().unwrap().value(), 3.0);
    }

    #[test]
    fn test_expired_deadline_aborts() {
        let store = store(&[("A", "B", 1.0)]);
        let config = SearchConfig {
            deadline: Some(Instant::now()),
            ..Default::default()
        };

        let result = shortest_path_with(&store, &"A".to_string(), &"B".to_string(), &config);
        assert_eq!(result, Err(GraphError::SearchAborted { expanded: 0 }));
    }

    #[test]
    fn test_overflowing_routes_are_unreachable() {
        let max = f64::MAX;
        let store = store(&[
            ("S", "A", max),
            ("A", "T", max),
            ("S", "B", max),
            ("B", "T", max / 2.0),
        ]);

        assert!(route(&store, "S", "T").is_empty());
        assert_eq!(route(&store, "S", "B").total_distance().unwrap().value(), max);
    }

    #[test]
    fn test_finite_route_beats_overflowing_one() {
        let max = f64::MAX;
        let store = store(&[
            ("S", "A", max),
            ("A", "T", max),
            ("S", "B", max / 2.0),
            ("B", "T", max / 4.0),
        ]);

        let path = route(&store, "S", "T");
        assert_eq!(path.nodes().unwrap(), vec!["S", "B", "T"]);
        let total = path.total_distance().unwrap();
        assert!(total.value().is_finite());
        assert!(Distance::new(total.value()).is_ok());
    }

    #[test]
    fn test_integer_nodes() {
        let mut store: GraphStore<u64, Distance> = GraphStore::new();
        store.insert_edge(2, 1, Distance::new(2.0).unwrap()).unwrap();
        store.insert_edge(3, 2, Distance::new(2.0).unwrap()).unwrap();
        store.insert_edge(3, 1, Distance::new(5.0).unwrap()).unwrap();

        let path = shortest_path(&store, &1, &3);
        assert_eq!(path.nodes().unwrap(), vec![1, 2, 3]);
    }
}
