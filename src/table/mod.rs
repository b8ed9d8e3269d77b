// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Storage for the coset table under construction.
//!
//! Rows are cosets and columns are generators; the cell for `(c, g)` holds
//! `c^g`, or [`NO_COSET`] while that transition is undefined. Row 0 is a
//! sentinel that is never live.
//!
//! Alongside the cells are two per-coset arrays:
//!
//! - `merged_into`: zero for a live coset, otherwise the lower coset it was
//!   merged into. Following the chain gives the representative.
//! - `link`: the next dying coset in the coincidence queue.
//!
//! This module only stores; the bidirectional invariant
//! (`c^g = d` implies `d^inverse(g) = c`) is maintained by the enumerator.

use std::collections::TryReserveError;

/// A coset number. Zero means "no coset".
pub type CosetId = u32;

/// The "undefined" transition, and the sentinel row.
pub const NO_COSET: CosetId = 0;

const LIVE: CosetId = 0;

#[derive(Debug, Clone)]
pub struct WorkingTable {
    nr_generators: usize,
    rows: usize,
    cells: Vec<CosetId>,
    merged_into: Vec<CosetId>,
    link: Vec<CosetId>,
}

impl WorkingTable {
    /// A table with room for `rows` rows, including the sentinel row 0.
    pub fn new(nr_generators: usize, rows: usize) -> Result<Self, TryReserveError> {
        let mut table = WorkingTable {
            nr_generators,
            rows: 0,
            cells: Vec::new(),
            merged_into: Vec::new(),
            link: Vec::new(),
        };
        table.set_capacity(rows)?;
        Ok(table)
    }

    pub fn nr_generators(&self) -> usize {
        self.nr_generators
    }

    /// Number of rows, including the sentinel.
    pub fn capacity(&self) -> usize {
        self.rows
    }

    /// Grow or shrink to `rows` rows, keeping the contents of the rows that
    /// remain. If the memory for a larger table cannot be allocated the
    /// table is left as it was.
    pub fn set_capacity(&mut self, rows: usize) -> Result<(), TryReserveError> {
        let cells = rows.saturating_mul(self.nr_generators);
        if let Err(e) = self.reserve(rows, cells) {
            self.merged_into.shrink_to(self.rows);
            self.link.shrink_to(self.rows);
            self.cells.shrink_to(self.rows * self.nr_generators);
            return Err(e);
        }
        self.rows = rows;
        self.cells.resize(cells, NO_COSET);
        self.merged_into.resize(rows, LIVE);
        self.link.resize(rows, NO_COSET);
        Ok(())
    }

    fn reserve(&mut self, rows: usize, cells: usize) -> Result<(), TryReserveError> {
        self.merged_into
            .try_reserve_exact(rows.saturating_sub(self.merged_into.len()))?;
        self.link
            .try_reserve_exact(rows.saturating_sub(self.link.len()))?;
        self.cells
            .try_reserve_exact(cells.saturating_sub(self.cells.len()))
    }

    #[inline]
    pub fn action(&self, coset: CosetId, g: usize) -> CosetId {
        self.cells[coset as usize * self.nr_generators + g]
    }

    #[inline]
    pub fn set_cell(&mut self, coset: CosetId, g: usize, target: CosetId) {
        self.cells[coset as usize * self.nr_generators + g] = target;
    }

    pub fn row(&self, coset: CosetId) -> &[CosetId] {
        let start = coset as usize * self.nr_generators;
        &self.cells[start..start + self.nr_generators]
    }

    /// Make `coset` a live coset with no transitions defined.
    pub fn reset_row(&mut self, coset: CosetId) {
        let start = coset as usize * self.nr_generators;
        self.cells[start..start + self.nr_generators].fill(NO_COSET);
        self.merged_into[coset as usize] = LIVE;
        self.link[coset as usize] = NO_COSET;
    }

    #[inline]
    pub fn is_live(&self, coset: CosetId) -> bool {
        coset != NO_COSET && self.merged_into[coset as usize] == LIVE
    }

    pub fn mark_live(&mut self, coset: CosetId) {
        self.merged_into[coset as usize] = LIVE;
    }

    /// Record that `coset` has been merged into the lower coset `into`.
    pub fn kill(&mut self, coset: CosetId, into: CosetId) {
        debug_assert!(into != NO_COSET && into < coset);
        self.merged_into[coset as usize] = into;
    }

    /// The live coset that `coset` was (possibly indirectly) merged into.
    pub fn representative(&self, coset: CosetId) -> CosetId {
        let mut c = coset;
        while c != NO_COSET && self.merged_into[c as usize] != LIVE {
            c = self.merged_into[c as usize];
        }
        c
    }

    pub fn link(&self, coset: CosetId) -> CosetId {
        self.link[coset as usize]
    }

    pub fn set_link(&mut self, coset: CosetId, next: CosetId) {
        self.link[coset as usize] = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_not_live() {
        let table = WorkingTable::new(2, 4).unwrap();
        assert!(!table.is_live(NO_COSET));
        assert!(table.is_live(1));
        assert_eq!(table.capacity(), 4);
    }

    #[test]
    fn test_cells_and_rows() {
        let mut table = WorkingTable::new(3, 4).unwrap();
        table.set_cell(2, 1, 3);
        assert_eq!(table.action(2, 1), 3);
        assert_eq!(table.row(2), &[0, 3, 0]);
        table.reset_row(2);
        assert_eq!(table.row(2), &[0, 0, 0]);
    }

    #[test]
    fn test_representative_follows_chain() {
        let mut table = WorkingTable::new(2, 8).unwrap();
        table.kill(5, 3);
        table.kill(3, 1);
        assert!(!table.is_live(5));
        assert_eq!(table.representative(5), 1);
        assert_eq!(table.representative(2), 2);
        table.reset_row(5);
        assert!(table.is_live(5));
    }

    #[test]
    fn test_growth_keeps_contents() {
        let mut table = WorkingTable::new(2, 3).unwrap();
        table.set_cell(2, 0, 1);
        table.set_capacity(100).unwrap();
        assert_eq!(table.action(2, 0), 1);
        assert_eq!(table.action(99, 1), NO_COSET);
    }

    #[test]
    fn test_failed_growth_leaves_table_intact() {
        let mut table = WorkingTable::new(2, 3).unwrap();
        table.set_cell(2, 0, 1);
        table.kill(2, 1);
        assert!(table.set_capacity(usize::MAX / 2).is_err());
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.action(2, 0), 1);
        assert_eq!(table.representative(2), 1);
        assert_eq!(table.row(2).len(), 2);
    }
}
