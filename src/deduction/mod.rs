// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The deduction log.
//!
//! Every table edit made while consequences are being checked is logged as a
//! `(coset, generator)` pair and later rescanned against every relator that
//! starts with that generator. Entries are consumed last in, first out.
//!
//! The log has a soft limit. When it fills up the enumerator either purges
//! dead entries and raises the limit, or gives up on the individual entries
//! and schedules a full scan of the table instead; while a full scan is
//! pending nothing further is logged.

use crate::table::CosetId;

const INITIAL_LIMIT: usize = 1000;

#[derive(Debug)]
pub struct DeductionLog {
    entries: Vec<(CosetId, usize)>,
    limit: usize,
    longest: usize,
    full_scan_required: bool,
}

impl Default for DeductionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DeductionLog {
    pub fn new() -> Self {
        DeductionLog {
            entries: Vec::new(),
            limit: INITIAL_LIMIT,
            longest: 0,
            full_scan_required: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if there are entries to process or a full scan is pending.
    pub fn has_work(&self) -> bool {
        self.full_scan_required || !self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn full_scan_required(&self) -> bool {
        self.full_scan_required
    }

    /// Drop all entries and require a full scan instead.
    pub fn schedule_full_scan(&mut self) {
        self.entries.clear();
        self.full_scan_required = true;
    }

    /// Called when the full scan starts.
    pub fn start_full_scan(&mut self) {
        self.entries.clear();
        self.full_scan_required = false;
    }

    pub fn push(&mut self, coset: CosetId, g: usize) {
        self.entries.push((coset, g));
        if self.entries.len() > self.limit {
            self.limit = self.entries.len();
        }
        self.longest = self.longest.max(self.entries.len());
    }

    pub fn pop(&mut self) -> Option<(CosetId, usize)> {
        self.entries.pop()
    }

    /// Raise the limit by half.
    pub fn grow(&mut self) {
        self.limit += self.limit / 2;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only the entries for which `keep` holds, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(CosetId, usize) -> bool) {
        self.entries.retain(|&(c, g)| keep(c, g));
    }

    /// Replace every entry; entries mapped to `None` are dropped.
    pub fn renumber(&mut self, mut map: impl FnMut(CosetId, usize) -> Option<CosetId>) {
        self.entries = self
            .entries
            .iter()
            .filter_map(|&(c, g)| map(c, g).map(|n| (n, g)))
            .collect();
    }

    /// Greatest number of entries held at once.
    pub fn longest(&self) -> usize {
        self.longest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut log = DeductionLog::new();
        log.push(1, 0);
        log.push(2, 1);
        assert_eq!(log.pop(), Some((2, 1)));
        assert_eq!(log.pop(), Some((1, 0)));
        assert_eq!(log.pop(), None);
        assert_eq!(log.longest(), 2);
    }

    #[test]
    fn test_full_scan_scheduling() {
        let mut log = DeductionLog::new();
        log.push(1, 0);
        assert!(log.has_work());
        log.schedule_full_scan();
        assert!(log.is_empty());
        assert!(log.has_work());
        log.start_full_scan();
        assert!(!log.has_work());
    }

    #[test]
    fn test_limit_grows() {
        let mut log = DeductionLog::new();
        for c in 0..INITIAL_LIMIT {
            log.push(c as CosetId + 1, 0);
        }
        assert!(log.is_full());
        log.grow();
        assert!(!log.is_full());
    }

    #[test]
    fn test_retain_and_renumber() {
        let mut log = DeductionLog::new();
        log.push(1, 0);
        log.push(5, 1);
        log.push(3, 2);
        log.retain(|c, _| c != 5);
        log.renumber(|c, _| if c == 3 { Some(2) } else { None });
        assert_eq!(log.pop(), Some((2, 2)));
        assert!(log.is_empty());
    }
}
