//! Structure-to-structure relation maps over a whole symmetric group.
//!
//! Each builder walks one representative per conjugacy class and records,
//! keyed by that representative's structure, the structures related to it.
//! The result is plain node-and-edge data, ready for rendering or further
//! analysis. Going through representatives costs p(N) queries instead of N!,
//! though each query still scans the full group.

use std::collections::BTreeMap;

use log::debug;

use crate::perm::{Permutation, Side};
use crate::structure::CycleStructure;

/// Relation between conjugacy classes: each class label maps to the labels
/// related to it, in the order the underlying query found them.
pub type StructureMap = BTreeMap<CycleStructure, Vec<CycleStructure>>;

/// For every non-neutral class, the classes commuting with it.
///
/// The neutral class commutes with everything and is left out, as are
/// neutral candidates on the value side; see
/// [`Permutation::commuting_structures`].
pub fn commuting(cardinality: usize) -> StructureMap {
    debug!("building the commuting-structure map of S_{}", cardinality);
    let mut map = StructureMap::new();
    for representative in Permutation::class_representatives(cardinality) {
        if representative.is_identity() {
            continue;
        }
        map.insert(
            representative.cycle_structure().clone(),
            representative.commuting_structures(),
        );
    }
    map
}

/// For every non-neutral class, the classes whose members keep a product
/// with it inside its own class.
///
/// `side` picks which factor the candidates become, as in
/// [`Permutation::stabilizing_structures`].
pub fn stabilizing(cardinality: usize, side: Side) -> StructureMap {
    debug!(
        "building the stabilizing-structure map of S_{} ({:?} factors)",
        cardinality, side
    );
    let mut map = StructureMap::new();
    for representative in Permutation::class_representatives(cardinality) {
        if representative.is_identity() {
            continue;
        }
        map.insert(
            representative.cycle_structure().clone(),
            representative.stabilizing_structures(side),
        );
    }
    map
}

/// For every class, the neutral one included, the classes of its degree-th
/// roots.
///
/// A class can have no roots at all; its entry is then an empty list, which
/// keeps the map total over all p(N) classes.
pub fn roots(cardinality: usize, degree: i64) -> StructureMap {
    debug!(
        "building the degree-{} root map of S_{}",
        degree, cardinality
    );
    let mut map = StructureMap::new();
    for representative in Permutation::class_representatives(cardinality) {
        map.insert(
            representative.cycle_structure().clone(),
            representative.root_structures(degree),
        );
    }
    map
}
