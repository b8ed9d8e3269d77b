// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The relator universe.
//!
//! Precomputed, immutable data used throughout an enumeration:
//!
//! - every cyclic conjugate of every relator and normal subgroup generator,
//!   and the inverse of each, deduplicated and grouped by leading generator
//!   (shortlex order within a group);
//! - the index range of the group for each generator, which is exactly the
//!   set of relators to rescan after the table entry for that generator
//!   changes;
//! - scan sets for relator application: which conjugates to apply at each
//!   coset, in which order.
//!
//! Scan sets are computed on demand by [`RelatorUniverse::relator_set`];
//! the enumerator caches the ones it uses.

use crate::word::{invert, rotate, shortlex_cmp, Generator, Word};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use strum_macros::{Display, EnumIter, EnumString};

/// Order in which conjugates are applied when a scan set is permuted.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConjugateOrder {
    /// All conjugates of the first relator, then of the second, ...
    #[default]
    ByRelator,
    /// The first conjugate of each relator, then the second of each, ...
    ByPosition,
    /// Conjugates sorted in shortlex order.
    Sorted,
}

/// Selects one of the twelve scan sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RelatorSetKind {
    pub order: ConjugateOrder,
    /// Include every cyclic conjugate of the relators.
    pub permute_relators: bool,
    /// Include every cyclic conjugate of the normal subgroup generators.
    pub permute_normal: bool,
}

#[derive(Debug, Clone)]
pub struct RelatorUniverse {
    /// All conjugates, grouped by leading generator.
    words: Vec<Word>,
    /// `ranges[g]..ranges[g + 1]` are the conjugates starting with `g`.
    ranges: Vec<usize>,
    relators: Vec<Word>,
    normal: Vec<Word>,
    minimum_deduction_cost: usize,
    base_set: Vec<usize>,
}

impl RelatorUniverse {
    /// Build the universe for the given (already preprocessed) relators and
    /// normal subgroup generators. Empty words are ignored.
    pub fn new(relators: Vec<Word>, normal: Vec<Word>, inverse: &[Generator]) -> Self {
        let nr_generators = inverse.len();
        let mut groups: Vec<Vec<Word>> = vec![Vec::new(); nr_generators];
        for word in relators.iter().chain(normal.iter()) {
            for start in 0..word.len() {
                let conjugate = rotate(word, start);
                let inverted = invert(&conjugate, inverse);
                groups[conjugate[0]].push(conjugate);
                groups[inverted[0]].push(inverted);
            }
        }

        let mut words = Vec::new();
        let mut ranges = Vec::with_capacity(nr_generators + 1);
        for mut group in groups {
            group.sort_by(|a, b| shortlex_cmp(a, b));
            group.dedup();
            ranges.push(words.len());
            words.extend(group);
        }
        ranges.push(words.len());

        let mut minimum_deduction_cost = ranges.get(1).copied().unwrap_or(0);
        for g in 1..nr_generators {
            if g <= inverse[g] {
                minimum_deduction_cost = minimum_deduction_cost.min(ranges[g + 1] - ranges[g]);
            }
        }

        let mut universe = RelatorUniverse {
            words,
            ranges,
            relators,
            normal,
            minimum_deduction_cost,
            base_set: Vec::new(),
        };
        universe.base_set = universe.relator_set(RelatorSetKind::default());
        universe
    }

    /// Number of conjugates in the universe.
    pub fn count(&self) -> usize {
        self.words.len()
    }

    pub fn relator(&self, index: usize) -> &[Generator] {
        &self.words[index]
    }

    /// The conjugates whose first generator is `g`.
    pub fn range(&self, g: Generator) -> Range<usize> {
        self.ranges[g]..self.ranges[g + 1]
    }

    /// Fewest relators rescanned for any logged table entry.
    pub fn minimum_deduction_cost(&self) -> usize {
        self.minimum_deduction_cost
    }

    pub fn has_normal_subgroup(&self) -> bool {
        !self.normal.is_empty()
    }

    /// Index of `word` in the universe, if it is a conjugate.
    pub fn find(&self, word: &[Generator]) -> Option<usize> {
        let first = *word.first()?;
        let range = self.range(first);
        self.words[range.clone()]
            .binary_search_by(|w| shortlex_cmp(w, word))
            .ok()
            .map(|i| range.start + i)
    }

    /// The unpermuted relators followed by the normal subgroup generators:
    /// the set used by full scans and final checks.
    pub fn base_set(&self) -> &[usize] {
        &self.base_set
    }

    pub(crate) fn base_set_mut(&mut self) -> &mut Vec<usize> {
        &mut self.base_set
    }

    /// Compute the scan set of the given kind.
    pub fn relator_set(&self, kind: RelatorSetKind) -> Vec<usize> {
        let mut seen: HashSet<Word> = HashSet::new();
        let mut chosen: Vec<Word> = Vec::new();
        collect_conjugates(
            &self.relators,
            kind.order,
            kind.permute_relators,
            &mut seen,
            &mut chosen,
        );
        collect_conjugates(
            &self.normal,
            kind.order,
            kind.permute_normal,
            &mut seen,
            &mut chosen,
        );
        if kind.order == ConjugateOrder::Sorted {
            chosen.sort_by(|a, b| shortlex_cmp(a, b));
        }
        chosen.iter().filter_map(|w| self.find(w)).collect()
    }
}

fn collect_conjugates(
    words: &[Word],
    order: ConjugateOrder,
    permute: bool,
    seen: &mut HashSet<Word>,
    chosen: &mut Vec<Word>,
) {
    let mut take = |word: Word| {
        if !word.is_empty() && seen.insert(word.clone()) {
            chosen.push(word);
        }
    };
    if !permute {
        words.iter().for_each(|w| take(w.clone()));
    } else if order == ConjugateOrder::ByPosition {
        let longest = words.iter().map(Vec::len).max().unwrap_or(0);
        for start in 0..longest {
            for word in words.iter().filter(|w| start < w.len()) {
                take(rotate(word, start));
            }
        }
    } else {
        for word in words {
            for start in 0..word.len() {
                take(rotate(word, start));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a = 0 (involution), b = 1, B = 2
    const INVERSE: [Generator; 3] = [0, 2, 1];

    fn s3_universe() -> RelatorUniverse {
        RelatorUniverse::new(vec![vec![1, 1, 1], vec![0, 1, 0, 1]], vec![], &INVERSE)
    }

    #[test]
    fn test_grouping_by_first_generator() {
        let universe = s3_universe();
        for g in 0..3 {
            for r in universe.range(g) {
                assert_eq!(universe.relator(r)[0], g);
            }
        }
        // abab, baba and their inverses BaBa, aBaB; bbb and BBB
        assert_eq!(universe.count(), 6);
        assert_eq!(universe.range(0).len(), 2);
        assert_eq!(universe.range(1).len(), 2);
        assert_eq!(universe.range(2).len(), 2);
        assert_eq!(universe.minimum_deduction_cost(), 2);
    }

    #[test]
    fn test_find() {
        let universe = s3_universe();
        let index = universe.find(&[1, 0, 1, 0]).unwrap();
        assert_eq!(universe.relator(index), &[1, 0, 1, 0]);
        assert_eq!(universe.find(&[1, 1]), None);
        assert_eq!(universe.find(&[]), None);
    }

    #[test]
    fn test_base_set_is_unpermuted() {
        let universe = s3_universe();
        let words: Vec<&[Generator]> = universe
            .base_set()
            .iter()
            .map(|&r| universe.relator(r))
            .collect();
        assert_eq!(words, vec![&[1, 1, 1][..], &[0, 1, 0, 1][..]]);
    }

    #[test]
    fn test_permuted_sets() {
        let universe = s3_universe();
        let by_relator = universe.relator_set(RelatorSetKind {
            order: ConjugateOrder::ByRelator,
            permute_relators: true,
            permute_normal: false,
        });
        // bbb has one distinct rotation, abab has two
        assert_eq!(by_relator.len(), 3);
        let by_position = universe.relator_set(RelatorSetKind {
            order: ConjugateOrder::ByPosition,
            permute_relators: true,
            permute_normal: false,
        });
        assert_eq!(universe.relator(by_position[1]), &[0, 1, 0, 1]);
        assert_eq!(universe.relator(by_position[2]), &[1, 0, 1, 0]);
        let sorted = universe.relator_set(RelatorSetKind {
            order: ConjugateOrder::Sorted,
            permute_relators: true,
            permute_normal: false,
        });
        assert_eq!(universe.relator(sorted[0]), &[1, 1, 1]);
    }

    #[test]
    fn test_normal_subgroup_conjugates_included() {
        let universe = RelatorUniverse::new(vec![vec![1, 1, 1]], vec![vec![0]], &INVERSE);
        assert!(universe.has_normal_subgroup());
        assert_eq!(universe.range(0).len(), 1);
        assert_eq!(universe.base_set().len(), 2);
    }
}
