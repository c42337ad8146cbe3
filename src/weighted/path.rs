//! Routes through a weighted graph

use super::distance::Distance;
use crate::graph::{GraphElement, GraphError, GraphResult};
use serde::Serialize;
use std::fmt;

/// A single hop between two places and the distance it covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WeightedEdge<K = String> {
    pub start: K,
    pub end: K,
    pub distance: Distance,
}

impl<K: GraphElement> WeightedEdge<K> {
    pub fn new(start: K, end: K, distance: Distance) -> Self {
        WeightedEdge {
            start,
            end,
            distance,
        }
    }
}

/// A continuous sequence of weighted edges
///
/// Each edge ends where the next one starts. The path with no edges is what
/// search returns when the destination cannot be reached; every accessor
/// fails on it with [`GraphError::EmptyPath`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path<K = String> {
    edges: Vec<WeightedEdge<K>>,
    total: Distance,
}

impl<K: GraphElement> Path<K> {
    /// The "no route" path
    pub fn empty() -> Self {
        Path {
            edges: Vec::new(),
            total: Distance::ZERO,
        }
    }

    /// Build a path from edges, checking continuity
    pub fn from_edges(edges: Vec<WeightedEdge<K>>) -> GraphResult<Self> {
        if let Some(index) = edges
            .windows(2)
            .position(|pair| pair[0].end != pair[1].start)
        {
            return Err(GraphError::DiscontinuousPath { index: index + 1 });
        }

        let total = edges.iter().try_fold(Distance::ZERO, |total, edge| {
            total
                .checked_add(edge.distance)
                .ok_or(GraphError::InvalidDistance(f64::INFINITY))
        })?;
        Ok(Path { edges, total })
    }

    /// The search seed: a zero-distance hop from `start` to itself
    pub(crate) fn bootstrap(start: K) -> Self {
        Path {
            edges: vec![WeightedEdge::new(start.clone(), start, Distance::ZERO)],
            total: Distance::ZERO,
        }
    }

    /// Copy of this path with one more edge at the end, or `None` when the
    /// total distance would no longer be finite
    pub(crate) fn extended(&self, edge: WeightedEdge<K>) -> Option<Self> {
        debug_assert!(self.edges.last().map_or(true, |last| last.end == edge.start));

        let total = self.total.checked_add(edge.distance)?;
        let mut edges = Vec::with_capacity(self.edges.len() + 1);
        edges.extend_from_slice(&self.edges);
        edges.push(edge);
        Some(Path { edges, total })
    }

    /// Drop the first edge; it carries no distance
    pub(crate) fn without_bootstrap(mut self) -> Self {
        if !self.edges.is_empty() {
            self.edges.remove(0);
        }
        self
    }

    /// Accumulated distance, zero for the empty path
    pub(crate) fn cost(&self) -> Distance {
        self.total
    }

    /// Parent of the first edge
    pub fn start_node(&self) -> GraphResult<&K> {
        self.edges
            .first()
            .map(|edge| &edge.start)
            .ok_or(GraphError::EmptyPath)
    }

    /// Child of the last edge
    pub fn end_node(&self) -> GraphResult<&K> {
        self.edges
            .last()
            .map(|edge| &edge.end)
            .ok_or(GraphError::EmptyPath)
    }

    /// Sum of the edge distances
    pub fn total_distance(&self) -> GraphResult<Distance> {
        if self.edges.is_empty() {
            return Err(GraphError::EmptyPath);
        }
        Ok(self.total)
    }

    /// Places visited in order, both endpoints included
    pub fn nodes(&self) -> GraphResult<Vec<K>> {
        let last = self.end_node()?.clone();
        let mut nodes: Vec<K> = self.edges.iter().map(|edge| edge.start.clone()).collect();
        nodes.push(last);
        Ok(nodes)
    }

    pub fn edges(&self) -> &[WeightedEdge<K>] {
        &self.edges
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<K: GraphElement> Default for Path<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: GraphElement> fmt::Display for Path<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(nodes) = self.nodes() else {
            return write!(f, "(empty path)");
        };
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, " ({})", self.total)
    }
}
