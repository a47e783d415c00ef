//! Permutations of a fixed finite set.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::mem::replace;
use std::ops::Mul;

use itertools::Itertools;
use log::{debug, trace};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{Inv, One, Pow, Zero};
use thiserror::Error;

use crate::count;
use crate::structure::CycleStructure;
use crate::Point;

/// A permutation of the set {1, ..., N}.
///
/// A permutation is a bijection from a finite set to itself. Here the set is
/// always {1, ..., N} for a fixed cardinality N: the cardinality is part of
/// the value, because the neutral element, conjugacy and the whole-group
/// queries only make sense relative to one symmetric group S<sub>N</sub>.
/// Permutations of different cardinalities never compose and never compare
/// equal.
///
/// The disjoint-cycle cover, the order and the cycle structure are computed
/// once at construction and frozen. There is no way to mutate a constructed
/// value; every group operation builds a new one.
#[derive(Clone)]
pub struct Permutation {
    data: Box<[Point]>,
    cycles: Box<[Vec<Point>]>,
    order: BigUint,
    structure: CycleStructure,
}

/// Error for mappings that are not bijections of {1, ..., N}.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidPermutation {
    /// A value lies outside 1..=N.
    #[error("point {point} lies outside 1..={cardinality}")]
    OutOfRange { point: Point, cardinality: usize },
    /// A value occurs more than once.
    #[error("point {0} occurs more than once")]
    DuplicatePoint(Point),
}

/// Error for cycle-length lists that fit no permutation of the requested
/// cardinality.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidStructure {
    /// A requested cycle length was zero.
    #[error("cycle lengths must be positive")]
    ZeroLength,
    /// The requested lengths need more points than the cardinality has.
    #[error("cycle lengths sum to {sum}, exceeding cardinality {cardinality}")]
    ExceedsCardinality { sum: usize, cardinality: usize },
}

/// Which factor a candidate becomes in [`Permutation::stabilizing_structures`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    /// The candidate p is the left factor: the product taken is `p * self`.
    Left,
    /// The candidate p is the right factor: the product taken is `self * p`.
    Right,
}

impl Permutation {
    /// Create a permutation from the images of 1..=N.
    ///
    /// `data[i]` is the image of point i + 1. Every value must lie in 1..=N
    /// and occur exactly once; anything else is rejected. The empty mapping
    /// is accepted as the sole permutation of the empty set.
    pub fn from_mapping(data: Vec<Point>) -> Result<Permutation, InvalidPermutation> {
        let cardinality = data.len();
        assert_cardinality(cardinality);
        let mut seen = vec![false; cardinality];

        for &point in data.iter() {
            if point == 0 || point as usize > cardinality {
                return Err(InvalidPermutation::OutOfRange { point, cardinality });
            }
            if replace(&mut seen[point as usize - 1], true) {
                return Err(InvalidPermutation::DuplicatePoint(point));
            }
        }

        Ok(Permutation::from_trusted(data.into_boxed_slice()))
    }

    /// Build a permutation from a mapping already known to be a bijection
    /// and derive the frozen classification data.
    fn from_trusted(data: Box<[Point]>) -> Permutation {
        debug_assert!(is_bijection(&data));
        let cycles = cycle_cover(&data);
        let order = cycles
            .iter()
            .fold(BigUint::one(), |acc, cycle| {
                acc.lcm(&BigUint::from(cycle.len()))
            });
        let structure = CycleStructure::new(cycles.iter().map(|cycle| cycle.len()));
        Permutation {
            data,
            cycles,
            order,
            structure,
        }
    }

    /// The neutral element of S<sub>N</sub>: every point fixed.
    pub fn neutral(cardinality: usize) -> Permutation {
        assert_cardinality(cardinality);
        Permutation::from_trusted((1..=cardinality as Point).collect())
    }

    /// Size N of the underlying set.
    pub fn cardinality(&self) -> usize {
        self.data.len()
    }

    /// The images of 1..=N: `mapping()[i]` is the image of point i + 1.
    pub fn mapping(&self) -> &[Point] {
        &self.data
    }

    /// The image of a single point.
    ///
    /// # Panics
    ///
    /// Panics when `point` lies outside 1..=N.
    pub fn image_of(&self, point: Point) -> Point {
        assert!(
            point >= 1 && point as usize <= self.data.len(),
            "point {} lies outside 1..={}",
            point,
            self.data.len(),
        );
        self.data[point as usize - 1]
    }

    /// The disjoint-cycle cover of {1, ..., N}.
    ///
    /// Cycles are ordered by their smallest point and each starts there;
    /// fixed points are present as 1-cycles. The cover partitions the whole
    /// set, so the cycle lengths always sum to N.
    pub fn cycles(&self) -> &[Vec<Point>] {
        &self.cycles
    }

    /// Order of the permutation in its group: the least positive k for which
    /// `pow(k)` is neutral, which is the least common multiple of all cycle
    /// lengths. Never zero; the neutral element has order 1.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// The conjugacy-class signature: all cycle lengths greater than 1,
    /// ascending.
    pub fn cycle_structure(&self) -> &CycleStructure {
        &self.structure
    }

    /// Points mapped to themselves, ascending.
    pub fn fixed_points(&self) -> Vec<Point> {
        (1..=self.data.len() as Point)
            .filter(|&point| self.data[point as usize - 1] == point)
            .collect()
    }

    /// Multiplicity table of the full cycle cover: cycle length to number of
    /// cycles of that length, 1-cycles included.
    pub fn passport(&self) -> BTreeMap<usize, usize> {
        let mut passport = BTreeMap::new();
        for cycle in self.cycles.iter() {
            *passport.entry(cycle.len()).or_insert(0) += 1;
        }
        passport
    }

    /// The permutation matrix: row i holds a single 1, in the column of the
    /// image of point i + 1.
    pub fn matrix(&self) -> Vec<Vec<u8>> {
        let n = self.data.len();
        let mut matrix = vec![vec![0; n]; n];
        for (row, &image) in self.data.iter().enumerate() {
            matrix[row][image as usize - 1] = 1;
        }
        matrix
    }

    /// Whether this is the neutral element.
    pub fn is_identity(&self) -> bool {
        self.structure.is_empty()
    }

    /// Whether the permutation is even.
    ///
    /// A cycle of length L is a product of L − 1 transpositions, so only the
    /// even-length cycles contribute an odd number of them: the permutation
    /// is even exactly when it has an even number of even-length cycles.
    pub fn is_even(&self) -> bool {
        self.cycles.iter().filter(|cycle| cycle.len() % 2 == 0).count() % 2 == 0
    }

    /// Whether the permutation moves every point.
    pub fn is_derangement(&self) -> bool {
        self.structure.support() == self.data.len()
    }

    /// Whether the two permutations lie in the same conjugacy class of the
    /// same symmetric group.
    pub fn is_conjugate_with(&self, other: &Permutation) -> bool {
        self.data.len() == other.data.len() && self.structure == other.structure
    }

    /// The inverse permutation.
    pub fn inverse(&self) -> Permutation {
        let mut data = vec![0; self.data.len()].into_boxed_slice();
        for (i, &image) in self.data.iter().enumerate() {
            data[image as usize - 1] = i as Point + 1;
        }
        Permutation::from_trusted(data)
    }

    /// An integer power of the permutation.
    ///
    /// The exponent may be zero or negative; it is first reduced with a
    /// floored modulo into `0..order`, so `p.pow(k)` equals
    /// `p.pow(k mod order)` for every signed k and `p.pow(-1)` is the
    /// inverse. The reduced power is then built by squaring.
    pub fn pow(&self, exponent: i64) -> Permutation {
        let mut exponent = self.reduce_exponent(exponent);
        let mut result = Permutation::neutral(self.data.len());
        let mut base = self.clone();
        while !exponent.is_zero() {
            if exponent.is_odd() {
                result = &result * &base;
            }
            base = &base * &base;
            exponent /= 2u32;
        }
        result
    }

    /// Reduce a signed exponent into `0..order`, floored rather than
    /// following the sign of the dividend.
    fn reduce_exponent(&self, exponent: i64) -> BigUint {
        let magnitude = BigUint::from(exponent.unsigned_abs()) % &self.order;
        if exponent < 0 && !magnitude.is_zero() {
            &self.order - magnitude
        } else {
            magnitude
        }
    }

    /// One concrete permutation realizing the given cycle lengths.
    ///
    /// Cycles are laid out consecutively in the order given: a cycle of
    /// length x starting at point s maps s to s+1, ..., s+x−1 back to s.
    /// Points past the last cycle are fixed. An empty list yields the
    /// neutral element.
    pub fn from_cycle_lengths(
        lengths: &[usize],
        cardinality: usize,
    ) -> Result<Permutation, InvalidStructure> {
        assert_cardinality(cardinality);
        if lengths.contains(&0) {
            return Err(InvalidStructure::ZeroLength);
        }
        let sum: usize = lengths.iter().sum();
        if sum > cardinality {
            return Err(InvalidStructure::ExceedsCardinality { sum, cardinality });
        }

        let mut data: Vec<Point> = Vec::with_capacity(cardinality);
        let mut start = 1usize;
        for &length in lengths {
            data.extend((start + 1..start + length).map(|point| point as Point));
            data.push(start as Point);
            start += length;
        }
        data.extend((start..=cardinality).map(|point| point as Point));

        Ok(Permutation::from_trusted(data.into_boxed_slice()))
    }

    /// One representative permutation per conjugacy class.
    ///
    /// Built from [`count::cycle_structures`] in its order, so the first
    /// entry is always the neutral element and the length is the partition
    /// count p(N). Walking these representatives instead of all N! elements
    /// is what keeps whole-group queries affordable.
    pub fn class_representatives(cardinality: usize) -> Vec<Permutation> {
        count::cycle_structures(cardinality)
            .iter()
            .map(|structure| {
                Permutation::from_cycle_lengths(structure.lengths(), cardinality)
                    .expect("class signatures never exceed their cardinality")
            })
            .collect()
    }

    /// All N! permutations of a cardinality, lexicographically by mapping.
    ///
    /// The iterator is lazy; each call starts a fresh pass beginning at the
    /// neutral element.
    pub fn all(cardinality: usize) -> AllPerms {
        assert_cardinality(cardinality);
        AllPerms {
            next: Some((1..=cardinality as Point).collect()),
        }
    }

    /// Cycle structures of the permutations commuting with this one.
    ///
    /// Walks every non-neutral permutation of the same cardinality and
    /// records the structure of each one commuting with `self`, keeping the
    /// first hit per structure. Factorial cost; meant for small
    /// cardinalities.
    pub fn commuting_structures(&self) -> Vec<CycleStructure> {
        let n = self.data.len();
        debug!("scanning S_{} for structures commuting with {}", n, self);
        let mut found: Vec<CycleStructure> = Vec::new();
        for candidate in Permutation::all(n) {
            if candidate.is_identity() || found.contains(candidate.cycle_structure()) {
                continue;
            }
            if self * &candidate == &candidate * self {
                trace!("{} commutes with {}", candidate, self);
                found.push(candidate.cycle_structure().clone());
            }
        }
        found
    }

    /// Cycle structures whose product with this permutation stays inside
    /// this permutation's conjugacy class.
    ///
    /// `side` picks which factor the candidate becomes; the classwise answer
    /// is the same on both sides, since xy and yx are always conjugate, but
    /// the products formed differ. Walks every non-neutral permutation of
    /// the same cardinality, keeping the first hit per structure.
    pub fn stabilizing_structures(&self, side: Side) -> Vec<CycleStructure> {
        let n = self.data.len();
        debug!(
            "scanning S_{} for structures stabilizing the class of {} ({:?} factors)",
            n, self, side
        );
        let mut found: Vec<CycleStructure> = Vec::new();
        for candidate in Permutation::all(n) {
            if candidate.is_identity() || found.contains(candidate.cycle_structure()) {
                continue;
            }
            let product = match side {
                Side::Left => &candidate * self,
                Side::Right => self * &candidate,
            };
            if product.cycle_structure() == &self.structure {
                trace!("{} stabilizes the class of {}", candidate, self);
                found.push(candidate.cycle_structure().clone());
            }
        }
        found
    }

    /// Cycle structures of the degree-th roots of this permutation.
    ///
    /// A root is any permutation p of the same cardinality, the neutral
    /// element included, with `p.pow(degree)` equal to `self`. Walks the
    /// whole group, keeping the first hit per structure.
    pub fn root_structures(&self, degree: i64) -> Vec<CycleStructure> {
        let n = self.data.len();
        debug!("scanning S_{} for degree-{} roots of {}", n, degree, self);
        let mut found: Vec<CycleStructure> = Vec::new();
        for candidate in Permutation::all(n) {
            if found.contains(candidate.cycle_structure()) {
                continue;
            }
            if candidate.pow(degree) == *self {
                trace!("{} is a degree-{} root of {}", candidate, degree, self);
                found.push(candidate.cycle_structure().clone());
            }
        }
        found
    }
}

/// Points up to N must be representable as [`Point`] values.
fn assert_cardinality(cardinality: usize) {
    assert!(
        cardinality <= Point::MAX as usize,
        "cardinality {} exceeds the Point range",
        cardinality,
    );
}

fn is_bijection(data: &[Point]) -> bool {
    let mut seen = vec![false; data.len()];
    data.iter().all(|&point| {
        point != 0
            && point as usize <= data.len()
            && !replace(&mut seen[point as usize - 1], true)
    })
}

/// Disjoint cycles covering {1, ..., N}, ordered by their smallest point
/// and each starting there. Fixed points appear as 1-cycles.
fn cycle_cover(data: &[Point]) -> Box<[Vec<Point>]> {
    let mut seen = vec![false; data.len()];
    let mut cycles = Vec::new();
    for start in 1..=data.len() as Point {
        if seen[start as usize - 1] {
            continue;
        }
        seen[start as usize - 1] = true;
        let mut cycle = vec![start];
        let mut point = data[start as usize - 1];
        while point != start {
            seen[point as usize - 1] = true;
            cycle.push(point);
            point = data[point as usize - 1];
        }
        cycles.push(cycle);
    }
    cycles.into_boxed_slice()
}

/// Iterator over all permutations of a cardinality in lexicographic order
/// of their mappings. Produced by [`Permutation::all`].
#[derive(Clone, Debug)]
pub struct AllPerms {
    next: Option<Vec<Point>>,
}

impl Iterator for AllPerms {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        let current = self.next.take()?;
        self.next = next_mapping(&current);
        Some(Permutation::from_trusted(current.into_boxed_slice()))
    }
}

impl FusedIterator for AllPerms {}

/// The lexicographic successor of a mapping, if any.
fn next_mapping(data: &[Point]) -> Option<Vec<Point>> {
    // Find the last ascent, swap its left end with the rightmost larger
    // point, reverse the tail.
    let pivot = data.windows(2).rposition(|w| w[0] < w[1])?;
    let successor = pivot
        + 1
        + data[pivot + 1..]
            .iter()
            .rposition(|&point| point > data[pivot])
            .expect("an ascent at the pivot guarantees a larger point after it");
    let mut next = data.to_vec();
    next.swap(pivot, successor);
    next[pivot + 1..].reverse();
    Some(next)
}

/// Composition: `(a * b)(x)` is `b(a(x))`, the left factor acting first.
///
/// # Panics
///
/// Panics when the cardinalities differ.
impl Mul for &Permutation {
    type Output = Permutation;

    fn mul(self, other: &Permutation) -> Permutation {
        assert_eq!(
            self.data.len(),
            other.data.len(),
            "cannot compose permutations of different cardinalities",
        );
        let data = self
            .data
            .iter()
            .map(|&image| other.data[image as usize - 1])
            .collect();
        Permutation::from_trusted(data)
    }
}

impl Mul for Permutation {
    type Output = Permutation;

    fn mul(self, other: Permutation) -> Permutation {
        &self * &other
    }
}

impl Mul<&Permutation> for Permutation {
    type Output = Permutation;

    fn mul(self, other: &Permutation) -> Permutation {
        &self * other
    }
}

impl Mul<Permutation> for &Permutation {
    type Output = Permutation;

    fn mul(self, other: Permutation) -> Permutation {
        self * &other
    }
}

impl Inv for &Permutation {
    type Output = Permutation;

    fn inv(self) -> Permutation {
        self.inverse()
    }
}

impl Pow<i64> for &Permutation {
    type Output = Permutation;

    fn pow(self, exponent: i64) -> Permutation {
        Permutation::pow(self, exponent)
    }
}

/// Equality compares the mappings only; the derived data is a function of
/// the mapping. [`Hash`] agrees.
impl PartialEq for Permutation {
    fn eq(&self, other: &Permutation) -> bool {
        self.data == other.data
    }
}

impl Eq for Permutation {}

impl Hash for Permutation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

/// Permutations render as their mapping followed by their structure:
/// `{4, 5, 3, 1, 2} (2, 2)-cycle`.
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{}}} {}-cycle",
            self.data.iter().join(", "),
            self.structure,
        )
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
