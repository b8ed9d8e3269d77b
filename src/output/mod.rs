// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The result of a successful enumeration.
//!
//! A [`CosetTable`] is immutable and self-contained: it carries the
//! generator names and inverse map it was built with, so it can be printed,
//! serialized and queried without the presentation.
//!
//! Viewed as an automaton the table has the cosets as states, coset 1 as
//! the start state and sole accepting state, and `transition(c, g) = c^g`;
//! it accepts exactly the words lying in the subgroup.

use crate::state::Statistics;
use crate::table::{CosetId, WorkingTable};
use crate::word::{free_reduce, invert, Alphabet, Generator, Word};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CosetTable {
    generators: Vec<String>,
    inverse: Vec<Generator>,
    /// `rows[c - 1][g]` is `c^g`.
    rows: Vec<Vec<CosetId>>,
    standardized: bool,
}

impl CosetTable {
    /// Copy rows `1..=last` out of a complete, compacted working table.
    pub(crate) fn from_working(
        alphabet: &Alphabet,
        table: &WorkingTable,
        last: CosetId,
        standardized: bool,
    ) -> Self {
        CosetTable {
            generators: (0..alphabet.len())
                .map(|g| alphabet.name(g).to_string())
                .collect(),
            inverse: alphabet.inverses().to_vec(),
            rows: (1..=last).map(|c| table.row(c).to_vec()).collect(),
            standardized,
        }
    }

    /// Number of cosets, i.e. the index of the subgroup.
    pub fn index(&self) -> usize {
        self.rows.len()
    }

    pub fn nr_generators(&self) -> usize {
        self.generators.len()
    }

    pub fn generators(&self) -> &[String] {
        &self.generators
    }

    pub fn generator_name(&self, g: Generator) -> &str {
        &self.generators[g]
    }

    pub fn inverse(&self, g: Generator) -> Generator {
        self.inverse[g]
    }

    /// The coset `c^g`. Panics if `c` is not a coset of the table.
    pub fn action(&self, c: CosetId, g: Generator) -> CosetId {
        self.rows[c as usize - 1][g]
    }

    /// True if the cosets are numbered in breadth-first order.
    pub fn is_standardized(&self) -> bool {
        self.standardized
    }

    pub fn start_state(&self) -> CosetId {
        1
    }

    pub fn is_accepting(&self, c: CosetId) -> bool {
        c == 1
    }

    /// `c^g`, or `None` if `c` or `g` is out of range.
    pub fn transition(&self, c: CosetId, g: Generator) -> Option<CosetId> {
        let row = self.rows.get((c as usize).checked_sub(1)?)?;
        row.get(g).copied()
    }

    /// The coset reached by reading `word` from coset 1.
    pub fn trace(&self, word: &[Generator]) -> CosetId {
        self.trace_from(self.start_state(), word)
    }

    pub fn trace_from(&self, c: CosetId, word: &[Generator]) -> CosetId {
        word.iter().fold(c, |c, &g| self.action(c, g))
    }

    /// True if `word` lies in the subgroup.
    pub fn accepts(&self, word: &[Generator]) -> bool {
        self.is_accepting(self.trace(word))
    }

    /// For each coset, the shortlex-least word leading to it from coset 1
    /// along the breadth-first spanning tree. Entry `c - 1` is the
    /// representative of coset `c`.
    pub fn coset_representatives(&self) -> Vec<Word> {
        let mut representatives: Vec<Option<Word>> = vec![None; self.index()];
        representatives[0] = Some(Word::new());
        let mut queue = VecDeque::from([1 as CosetId]);
        while let Some(c) = queue.pop_front() {
            let word = representatives[c as usize - 1].clone().unwrap_or_default();
            for g in 0..self.nr_generators() {
                let d = self.action(c, g);
                let slot = &mut representatives[d as usize - 1];
                if slot.is_none() {
                    let mut next = word.clone();
                    next.push(g);
                    *slot = Some(next);
                    queue.push_back(d);
                }
            }
        }
        representatives.into_iter().map(Option::unwrap_or_default).collect()
    }

    /// Schreier generators of the subgroup: `rep(c) g rep(c^g)^-1` for every
    /// edge off the spanning tree, freely reduced, without repeats.
    pub fn schreier_generators(&self) -> Vec<Word> {
        let representatives = self.coset_representatives();
        let mut seen = HashSet::new();
        let mut generators = Vec::new();
        for c in 1..=self.index() as CosetId {
            for g in 0..self.nr_generators() {
                let ig = self.inverse[g];
                let d = self.action(c, g);
                // Each edge once: skip the inverse direction.
                if g > ig || (g == ig && c > d) {
                    continue;
                }
                let mut word = representatives[c as usize - 1].clone();
                word.push(g);
                word.extend(invert(&representatives[d as usize - 1], &self.inverse));
                let word = free_reduce(&word, &self.inverse);
                if !word.is_empty() && seen.insert(word.clone()) {
                    generators.push(word);
                }
            }
        }
        generators
    }
}

/// A completed enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct Enumeration {
    pub table: CosetTable,
    pub statistics: Statistics,
}

impl Enumeration {
    pub fn index(&self) -> usize {
        self.table.index()
    }
}
