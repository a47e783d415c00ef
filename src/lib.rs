//! Cycle structures and conjugacy classes of finite symmetric groups.
//!
//! This crate models permutations of a set {1, ..., N}, the symmetric group
//! S<sub>N</sub>, together with the data that classifies them: the
//! disjoint-cycle cover, the order, the parity, and the cycle structure that
//! labels a conjugacy class. On top of the single-permutation algebra sit a
//! combinatorial layer (integer partitions, exact class and centralizer
//! sizes) and whole-group relation maps built from one representative per
//! class, so that callers studying how classes relate to each other never
//! pay for all N! elements where p(N) representatives suffice.
//!
//! The whole-group structure queries are deliberately brute force and meant
//! for small cardinalities; the counting layer is closed-form and exact for
//! any.

pub mod count;
pub mod perm;
pub mod relation;
pub mod structure;

/// Point of the permuted set.
///
/// Permutations act on the points {1, ..., N}; points are represented by
/// positive integers (`u32`). A mapping never contains 0.
pub type Point = u32;
