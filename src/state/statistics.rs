// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are kept by the enumerator and returned with the finished
//! table. Most are plain event counts; the `Max*` counters record the peak
//! of a quantity over the run.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{AsRefStr, EnumCount as EnumCountMacro, EnumIter};

#[derive(Debug, EnumCountMacro, EnumIter, AsRefStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// Cosets created, including those later merged away.
    CosetsDefined,
    Coincidences,
    /// Queued or immediate definitions made at gaps of length one.
    ShortGapsFilled,
    /// Relators completed at a best-candidate coset.
    CandidatesScanned,
    RowsScanned,
    RowsFilled,
    PhasesRun,
    FullScans,
    Compactions,
    TableGrowths,
    MaxLiveCosets,
    MaxDeductionLog,
    MaxMergeQueue,
}

const COUNT: usize = Counters::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Raise a peak counter to `value` if that is higher.
    pub(crate) fn record_max(&mut self, counter: Counters, value: u64) {
        let slot = &mut self.stats[counter as usize];
        *slot = (*slot).max(value);
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, counter) in Counters::iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", counter.as_ref(), self.get(counter))?;
        }
        Ok(())
    }
}

impl Serialize for Statistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(COUNT))?;
        for counter in Counters::iter() {
            map.serialize_entry(counter.as_ref(), &self.get(counter))?;
        }
        map.end()
    }
}
