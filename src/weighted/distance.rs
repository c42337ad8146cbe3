//! Edge weight for the weighted graph

use crate::graph::{GraphElement, GraphError, GraphResult};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A finite, non-negative distance
///
/// `f64` has neither `Eq` nor `Hash`, so it cannot sit in a label set.
/// `Distance` rules out NaN and infinities at construction and normalizes
/// `-0.0` to `0.0`, which makes equality, ordering and hashing agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    pub fn new(value: f64) -> GraphResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(GraphError::InvalidDistance(value));
        }
        // Folds -0.0 into 0.0
        Ok(Distance(value + 0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Sum of two distances, or `None` when it is too large for an `f64`
    pub fn checked_add(self, rhs: Distance) -> Option<Distance> {
        let sum = self.0 + rhs.0;
        sum.is_finite().then_some(Distance(sum))
    }
}

impl Eq for Distance {}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Distance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Distance {
    type Error = GraphError;

    fn try_from(value: f64) -> GraphResult<Self> {
        Distance::new(value)
    }
}

impl From<Distance> for f64 {
    fn from(distance: Distance) -> f64 {
        distance.0
    }
}

impl GraphElement for Distance {}
