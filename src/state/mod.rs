// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Running totals kept by the enumerator.
//!
//! [`CosetCounts`] holds the quantities the algorithm itself depends on
//! (live and dead cosets, undefined transitions); [`Statistics`] holds the
//! counters that are only reported.

pub mod statistics;

pub use statistics::{Counters, Statistics};

/// Coset and transition counts for the table under construction.
///
/// Every row between 1 and the last coset in use is either live or dead, so
/// `live + dead` is the number of rows in use. `undefined` counts the empty
/// cells of live rows together with every cell of a row that is still being
/// merged away.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CosetCounts {
    pub live: usize,
    /// Merged cosets still occupying a row.
    pub dead: usize,
    /// Cosets ever created, including coset 1.
    pub total: u64,
    pub max_live: usize,
    pub undefined: usize,
}

impl CosetCounts {
    /// Counts for a table holding only coset 1, with every transition
    /// undefined.
    pub fn initial(nr_generators: usize) -> Self {
        CosetCounts {
            live: 1,
            dead: 0,
            total: 1,
            max_live: 1,
            undefined: nr_generators,
        }
    }

    /// Account for a newly defined coset.
    pub fn add_coset(&mut self, nr_generators: usize) {
        self.live += 1;
        self.max_live = self.max_live.max(self.live);
        self.total += 1;
        self.undefined += nr_generators;
    }
}
