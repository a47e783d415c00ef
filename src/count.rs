//! Integer partitions and closed-form conjugacy-class counting.
//!
//! This is the combinatorial side of the crate: it knows how many
//! permutations of a cardinality share a cycle structure and how many
//! commute with one without ever enumerating the group. Everything here is
//! exact; the values grow factorially, so they are returned as [`BigUint`]s.

use std::collections::BTreeMap;
use std::iter::FusedIterator;

use num_bigint::BigUint;
use num_traits::{pow, One};
use thiserror::Error;

use crate::structure::CycleStructure;

/// Error for counting requests that describe no cycle type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCycleform {
    /// A declared cycle length was zero.
    #[error("cycle lengths must be positive")]
    ZeroLength,
    /// The declared lengths need more points than the cardinality has.
    #[error("cycle lengths sum to {sum}, exceeding cardinality {cardinality}")]
    ExceedsCardinality { sum: usize, cardinality: usize },
}

/// Iterator over the integer partitions of a number.
///
/// Parts are non-increasing within each partition. The order is the
/// canonical recursive one: the partitions of n are the partitions of n − 1
/// each with a 1 appended, plus, where the preceding part allows it, the
/// last part incremented instead. [`partitions`]`(5)` therefore starts at
/// `[1, 1, 1, 1, 1]` and ends at `[5]`.
#[derive(Clone, Debug)]
pub struct Partitions {
    next: Option<Vec<usize>>,
}

impl Iterator for Partitions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        self.next = successor(&current);
        Some(current)
    }
}

impl FusedIterator for Partitions {}

/// All integer partitions of `n`, lazily.
///
/// Yields exactly p(n) partitions; p(0) is 1, counting the empty partition.
pub fn partitions(n: usize) -> Partitions {
    Partitions {
        next: Some(vec![1; n]),
    }
}

/// The partition following `parts` in the canonical order, if any.
fn successor(parts: &[usize]) -> Option<Vec<usize>> {
    // The rightmost part that can grow while staying non-increasing and
    // still has at least one unit after it to pay for the increment; the
    // rest of the suffix is re-laid as 1s.
    let pivot = (0..parts.len().saturating_sub(1)).rfind(|&i| i == 0 || parts[i - 1] > parts[i])?;
    let remainder: usize = parts[pivot + 1..].iter().sum();
    let mut next = parts[..=pivot].to_vec();
    next[pivot] += 1;
    next.extend(std::iter::repeat(1).take(remainder - 1));
    Some(next)
}

/// One cycle structure per conjugacy class of the symmetric group of the
/// given cardinality.
///
/// Derived from the integer partitions of `cardinality` in their canonical
/// order by dropping the 1-parts, so the first entry is always the empty
/// structure. The length of the result is p(cardinality).
pub fn cycle_structures(cardinality: usize) -> Vec<CycleStructure> {
    partitions(cardinality).map(CycleStructure::new).collect()
}

/// Exact factorial.
pub fn factorial(n: usize) -> BigUint {
    (1..=n).map(BigUint::from).product()
}

/// Order of the centralizer of any permutation with the given cycle lengths.
///
/// `lengths` lists cycle lengths in any order; points they do not cover are
/// fixed. Over the full cycle cover (fixed points counted as 1-cycles) the
/// centralizer order is the product of L^k · k! for each distinct length L
/// with multiplicity k, which is also the number of permutations of the
/// cardinality commuting with any single permutation of this cycle type.
pub fn centralizer_order(
    lengths: &[usize],
    cardinality: usize,
) -> Result<BigUint, InvalidCycleform> {
    let passport = passport_of(lengths, cardinality)?;
    let mut order = BigUint::one();
    for (length, count) in passport {
        order *= pow(BigUint::from(length), count) * factorial(count);
    }
    Ok(order)
}

/// Number of permutations of the given cardinality with exactly this cycle
/// structure.
///
/// By orbit-stabilizer this is cardinality! divided by the centralizer
/// order; the division is always exact.
pub fn class_size(lengths: &[usize], cardinality: usize) -> Result<BigUint, InvalidCycleform> {
    let centralizer = centralizer_order(lengths, cardinality)?;
    Ok(factorial(cardinality) / centralizer)
}

/// Multiplicity table length → count of the full cycle cover described by
/// `lengths`, the omitted fixed points entered as 1-cycles.
fn passport_of(
    lengths: &[usize],
    cardinality: usize,
) -> Result<BTreeMap<usize, usize>, InvalidCycleform> {
    if lengths.contains(&0) {
        return Err(InvalidCycleform::ZeroLength);
    }
    let sum: usize = lengths.iter().sum();
    if sum > cardinality {
        return Err(InvalidCycleform::ExceedsCardinality { sum, cardinality });
    }
    let mut passport: BTreeMap<usize, usize> = BTreeMap::new();
    for &length in lengths {
        *passport.entry(length).or_insert(0) += 1;
    }
    if sum < cardinality {
        *passport.entry(1).or_insert(0) += cardinality - sum;
    }
    Ok(passport)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    /// Reference generator following the recursive rule directly.
    fn recursive_partitions(n: usize) -> Vec<Vec<usize>> {
        if n == 0 {
            return vec![vec![]];
        }
        let mut result = Vec::new();
        for p in recursive_partitions(n - 1) {
            let mut appended = p.clone();
            appended.push(1);
            result.push(appended);
            if !p.is_empty() && (p.len() < 2 || p[p.len() - 2] > p[p.len() - 1]) {
                let mut incremented = p;
                *incremented.last_mut().unwrap() += 1;
                result.push(incremented);
            }
        }
        result
    }

    #[test]
    fn partition_counts() {
        let expected = [1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42];
        for (n, &count) in expected.iter().enumerate() {
            assert_eq!(partitions(n).count(), count, "p({})", n);
        }
    }

    #[test]
    fn partition_order_of_five() {
        let all: Vec<_> = partitions(5).collect();
        assert_eq!(
            all,
            vec![
                vec![1, 1, 1, 1, 1],
                vec![2, 1, 1, 1],
                vec![2, 2, 1],
                vec![3, 1, 1],
                vec![3, 2],
                vec![4, 1],
                vec![5],
            ],
        );
    }

    #[test]
    fn partitions_match_recursive_reference() {
        for n in 0..=12 {
            let lazy: Vec<_> = partitions(n).collect();
            assert_eq!(lazy, recursive_partitions(n), "n = {}", n);
        }
    }

    #[test]
    fn partition_parts_are_non_increasing_and_sum() {
        for n in 0..=10 {
            for parts in partitions(n) {
                assert!(parts.windows(2).all(|w| w[0] >= w[1]), "{:?}", parts);
                assert_eq!(parts.iter().sum::<usize>(), n);
            }
        }
    }

    #[test]
    fn structures_of_five() {
        let all = cycle_structures(5);
        let lengths: Vec<&[usize]> = all.iter().map(CycleStructure::lengths).collect();
        assert_eq!(
            lengths,
            vec![
                &[][..],
                &[2][..],
                &[2, 2][..],
                &[3][..],
                &[2, 3][..],
                &[4][..],
                &[5][..],
            ],
        );
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), BigUint::from(1u32));
        assert_eq!(factorial(1), BigUint::from(1u32));
        assert_eq!(factorial(5), BigUint::from(120u32));
        assert_eq!(factorial(20), BigUint::from(2_432_902_008_176_640_000u64));
    }

    #[test]
    fn three_transpositions_in_s8() {
        assert_eq!(class_size(&[2, 2, 2], 8).unwrap(), BigUint::from(420u32));
    }

    #[test]
    fn centralizer_of_double_three_cycle_in_s10() {
        assert_eq!(
            centralizer_order(&[3, 3], 10).unwrap(),
            BigUint::from(432u32),
        );
    }

    #[test]
    fn class_sizes_partition_the_group() {
        for n in 0..=8 {
            let total: BigUint = cycle_structures(n)
                .iter()
                .map(|s| class_size(s.lengths(), n).unwrap())
                .sum();
            assert_eq!(total, factorial(n), "cardinality {}", n);
        }
    }

    #[test]
    fn orbit_stabilizer() {
        for n in 0..=8 {
            for s in cycle_structures(n) {
                let orbit = class_size(s.lengths(), n).unwrap();
                let stabilizer = centralizer_order(s.lengths(), n).unwrap();
                assert_eq!(orbit * stabilizer, factorial(n));
            }
        }
    }

    #[test]
    fn rejects_zero_lengths() {
        assert_eq!(
            centralizer_order(&[2, 0], 5),
            Err(InvalidCycleform::ZeroLength),
        );
        assert_eq!(class_size(&[0], 1), Err(InvalidCycleform::ZeroLength));
    }

    #[test]
    fn rejects_overfull_structures() {
        assert_eq!(
            class_size(&[3, 3], 5),
            Err(InvalidCycleform::ExceedsCardinality {
                sum: 6,
                cardinality: 5
            }),
        );
    }

    proptest! {
        #[test]
        fn counts_ignore_length_order(
            mut lengths in prop::collection::vec(1..6usize, 0..5)
        ) {
            let cardinality = lengths.iter().sum::<usize>() + 3;
            let forward = class_size(&lengths, cardinality).unwrap();
            lengths.reverse();
            let backward = class_size(&lengths, cardinality).unwrap();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn explicit_fixed_points_change_nothing(
            lengths in prop::collection::vec(2..6usize, 0..4),
            padding in 0..4usize,
        ) {
            let cardinality = lengths.iter().sum::<usize>() + padding;
            let mut padded = lengths.clone();
            padded.extend(std::iter::repeat(1).take(padding));
            prop_assert_eq!(
                class_size(&lengths, cardinality).unwrap(),
                class_size(&padded, cardinality).unwrap(),
            );
        }
    }
}
