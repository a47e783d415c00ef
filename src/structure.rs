//! Conjugacy-class signatures.

use std::fmt;

use itertools::Itertools;

/// The cycle structure of a permutation.
///
/// A sorted multiset of the lengths of all cycles longer than one. Two
/// permutations of the same cardinality are conjugate in their symmetric
/// group exactly when their cycle structures are equal, so this type doubles
/// as the label of a conjugacy class. Fixed points carry no weight here; the
/// neutral permutation has the empty structure.
///
/// The derived ordering is lexicographic over the ascending lengths, which
/// gives relation maps keyed by structures a stable iteration order.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleStructure {
    lengths: Box<[usize]>,
}

impl CycleStructure {
    /// Canonicalize an arbitrary list of cycle lengths.
    ///
    /// Lengths equal to 1 are dropped, since a 1-cycle is a fixed point, and
    /// the rest are sorted ascending.
    ///
    /// # Panics
    ///
    /// Panics when a length is zero; no cycle has length zero.
    pub fn new(lengths: impl IntoIterator<Item = usize>) -> CycleStructure {
        let mut parts: Vec<usize> = Vec::new();
        for length in lengths {
            assert!(length > 0, "cycle lengths must be positive");
            if length > 1 {
                parts.push(length);
            }
        }
        parts.sort_unstable();
        CycleStructure {
            lengths: parts.into_boxed_slice(),
        }
    }

    /// The empty structure, i.e. the class of the neutral permutation.
    pub fn empty() -> CycleStructure {
        CycleStructure::default()
    }

    /// Cycle lengths in ascending order, each greater than 1.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Iterate over the lengths in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.lengths.iter().copied()
    }

    /// Number of recorded cycles.
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Whether no cycle longer than one is present.
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Number of points moved by a permutation of this structure: the sum of
    /// all recorded lengths. The rest of the cardinality is fixed points.
    pub fn support(&self) -> usize {
        self.lengths.iter().sum()
    }
}

/// Structures render as tuples of their lengths: `(2, 2)`, `(3)`, `()`.
impl fmt::Display for CycleStructure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.lengths.iter().join(", "))
    }
}

impl fmt::Debug for CycleStructure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
