// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Processing the deduction log.

use super::{Enumerator, ScanResult};
use crate::positions::PositionId;
use crate::relators::RelatorUniverse;
use crate::state::Counters;
use crate::table::NO_COSET;
use crate::word::Generator;
use std::sync::Arc;
use tracing::debug;

impl Enumerator {
    /// Rescan logged edits, run pending full scans and make queued gap
    /// definitions until nothing is left to do.
    pub(super) fn seek_consequences(&mut self) {
        let cursor = self.positions.create();
        let universe = Arc::clone(&self.universe);
        let base_len = universe.base_set().len();

        while self.log.has_work() {
            if self.counts.undefined == 0 {
                self.gaps.clear();
            }
            if self.log.len() * universe.minimum_deduction_cost() > self.counts.live * base_len {
                // Cheaper to scan the whole table.
                self.schedule_full_scan();
            }
            if self.log.full_scan_required() {
                self.full_scan();
                continue;
            }

            while let Some((ci, g)) = self.log.pop() {
                if !self.table.is_live(ci) {
                    continue;
                }
                self.positions.set_position(cursor, ci);
                if self.rescan(cursor, g, &universe) {
                    break;
                }
            }

            while self.log.is_empty() && !self.log.full_scan_required() {
                let Some((ci, g)) = self.gaps.pop() else {
                    break;
                };
                if !self.table.is_live(ci) || self.table.action(ci, g) != NO_COSET {
                    continue;
                }
                if self.define_coset(ci, g).is_none() {
                    self.failed = false;
                    break;
                }
                self.statistics.increment(Counters::ShortGapsFilled);
            }
        }

        self.positions.release(cursor);
        self.recover_space(false);
        #[cfg(debug_assertions)]
        self.validate();
    }

    /// Scan every relator starting with `g` at the cursor's coset. Returns
    /// true if the table changed.
    fn rescan(&mut self, cursor: PositionId, g: Generator, universe: &RelatorUniverse) -> bool {
        let final_check = self.counts.undefined == 0;
        let mut news = false;
        for r in universe.range(g) {
            let ci = self.positions.current(cursor);
            let word = universe.relator(r);
            let result = if final_check {
                self.scan_final(ci, word)
            } else {
                self.scan_consequence(ci, word, r)
            };
            if result == ScanResult::NoCoset {
                return true;
            }
            news |= result.is_news();
        }
        news
    }

    /// Apply every relator of the base set at every coset from the
    /// scanner's row onwards, deducing what can be deduced without
    /// defining anything.
    pub(super) fn full_scan(&mut self) {
        self.statistics.increment(Counters::FullScans);
        debug!(
            live = self.counts.live,
            last = self.positions.last_coset(),
            "full scan"
        );
        self.consequences_skipped = false;
        self.log.start_full_scan();

        let cursor = self.positions.create();
        let next = self.positions.next(self.scanner);
        if next > 1 {
            self.positions.set_position(cursor, next - 1);
        }
        self.full_scanner = Some(cursor);
        let universe = Arc::clone(&self.universe);
        loop {
            let ci = self.positions.advance(cursor);
            if ci == NO_COSET {
                break;
            }
            if self.table.is_live(ci) {
                for &r in universe.base_set() {
                    let ci = self.positions.current(cursor);
                    if self.scan_look_ahead(ci, universe.relator(r)) == ScanResult::NoCoset {
                        break;
                    }
                }
            }
            if self.log.full_scan_required() {
                break;
            }
            self.positions.end_current(cursor);
        }
        self.full_scanner = None;
        self.positions.release(cursor);

        if self.log_purge_required {
            self.clean_log();
        }
        if self.mode.look_ahead && self.counts.dead > 0 && !self.log.full_scan_required() {
            self.recover_space(true);
        }
        #[cfg(debug_assertions)]
        self.validate();
    }

    /// Drop log entries for dead cosets.
    pub(super) fn clean_log(&mut self) {
        if self.log.full_scan_required() {
            return;
        }
        let table = &self.table;
        self.log.retain(|c, _| table.is_live(c));
        self.log_purge_required = false;
    }

    /// Check every relator at every coset of a table that was completed
    /// without checking consequences, repeating until a pass finds no
    /// coincidence.
    pub(super) fn finish(&mut self) {
        self.recover_space(true);
        let universe = Arc::clone(&self.universe);
        let cursor = self.positions.create();
        loop {
            let before = self.statistics.get(Counters::Coincidences);
            self.positions.end_current(cursor);
            self.positions.begin(cursor);
            loop {
                if self.positions.advance(cursor) == NO_COSET {
                    break;
                }
                for &r in universe.base_set() {
                    let ci = self.positions.current(cursor);
                    if self.scan_final(ci, universe.relator(r)) == ScanResult::NoCoset {
                        break;
                    }
                }
                self.positions.end_current(cursor);
            }
            if self.statistics.get(Counters::Coincidences) == before {
                break;
            }
        }
        self.positions.release(cursor);
        self.consequences_skipped = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Enumerator;
    use crate::options::{EnumerationOptions, Strategy};
    use crate::presentation::Presentation;
    use crate::state::Counters;
    use crate::word::Alphabet;

    fn s3() -> Presentation {
        let mut alphabet = Alphabet::new();
        alphabet.add_involution("a").unwrap();
        alphabet.add_pair("b", "B").unwrap();
        Presentation::new(alphabet)
            .with_relators(&["a^2", "b^3", "(ab)^2"])
            .unwrap()
    }

    #[test]
    fn test_logged_edit_is_rescanned() {
        let options = EnumerationOptions::with_strategy(Strategy::Sims9);
        let mut enumerator = Enumerator::new(&s3(), options).unwrap();
        enumerator.mode.check_consequences = true;
        enumerator.define_coset(1, 1).unwrap();
        enumerator.define_coset(2, 1).unwrap();
        assert!(enumerator.log.has_work());
        enumerator.seek_consequences();
        assert!(!enumerator.log.has_work());
        // b^3 closes at coset 1.
        assert_eq!(enumerator.table.action(3, 1), 1);
    }

    #[test]
    fn test_full_scan_finds_deductions() {
        let options = EnumerationOptions::with_strategy(Strategy::Sims1);
        let mut enumerator = Enumerator::new(&s3(), options).unwrap();
        enumerator.define_coset(1, 1).unwrap();
        enumerator.define_coset(2, 1).unwrap();
        enumerator.full_scan();
        assert_eq!(enumerator.table.action(1, 2), 3);
        assert_eq!(enumerator.statistics.get(Counters::FullScans), 1);
    }

    #[test]
    fn test_clean_log_drops_dead_entries() {
        let options = EnumerationOptions::with_strategy(Strategy::Sims9);
        let mut enumerator = Enumerator::new(&s3(), options).unwrap();
        enumerator.define_coset(1, 1).unwrap();
        enumerator.table.kill(2, 1);
        enumerator.log.push(1, 0);
        enumerator.log.push(2, 0);
        enumerator.log_purge_required = true;
        enumerator.clean_log();
        assert_eq!(enumerator.log.len(), 1);
        assert!(!enumerator.log_purge_required);
    }
}
