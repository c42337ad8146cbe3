//! Core type definitions for the graph store

use std::fmt;
use std::hash::Hash;

/// A value that can be stored in a [`GraphStore`](super::GraphStore), either
/// as a node identity or as an edge label.
///
/// Values must be comparable and hashable so they can key the adjacency maps
/// and populate label sets. The `Display` bound is used when reporting errors.
pub trait GraphElement: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// Whether this value stands for "no value".
    ///
    /// Absent values are rejected by every mutator with
    /// [`GraphError::InvalidArgument`](super::GraphError::InvalidArgument).
    fn is_absent(&self) -> bool {
        false
    }
}

/// Blank strings (empty or whitespace only) carry no identity.
impl GraphElement for String {
    fn is_absent(&self) -> bool {
        self.trim().is_empty()
    }
}

impl GraphElement for &str {
    fn is_absent(&self) -> bool {
        self.trim().is_empty()
    }
}

macro_rules! impl_present_element {
    ($($t:ty),*) => {
        $(impl GraphElement for $t {})*
    };
}

impl_present_element!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_strings_are_absent() {
        assert!(String::new().is_absent());
        assert!("   ".to_string().is_absent());
        assert!("\t\n".is_absent());
        assert!(!"Wishka".to_string().is_absent());
        assert!(!" Murat ".is_absent());
    }

    #[test]
    fn test_numbers_are_never_absent() {
        assert!(!0u64.is_absent());
        assert!(!(-1i32).is_absent());
        assert!(!'x'.is_absent());
    }
}
