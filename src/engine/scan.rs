// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Scanning relators through the table.
//!
//! A scan walks a relator forwards from a coset and backwards (through the
//! inverse generators) from the same coset until both walks are blocked or
//! they meet. There are three flavours:
//!
//! - *open* scans ([`Enumerator::scan_and_fill`]) define new cosets until
//!   the relator is complete;
//! - *closed* scans only make a deduction when the walks are one step
//!   apart, and optionally fill gaps of two steps;
//! - *final* scans check a relator in a table with no undefined entries.

use super::{Enumerator, ScanResult};
use crate::positions::PositionId;
use crate::state::Counters;
use crate::table::{CosetId, NO_COSET};
use crate::word::Generator;

/// The two walks of a relator from one coset, each as far as it gets.
struct Walk {
    fi: usize,
    fci: CosetId,
    bi: usize,
    bci: CosetId,
}

impl Enumerator {
    fn walk_forward(&self, walk: &mut Walk, word: &[Generator]) {
        while walk.fi < walk.bi {
            let next = self.table.action(walk.fci, word[walk.fi]);
            if next == NO_COSET {
                break;
            }
            walk.fci = next;
            walk.fi += 1;
        }
    }

    fn walk_backward(&self, walk: &mut Walk, word: &[Generator]) {
        while walk.bi > walk.fi {
            let next = self.table.action(walk.bci, self.inverse[word[walk.bi - 1]]);
            if next == NO_COSET {
                break;
            }
            walk.bci = next;
            walk.bi -= 1;
        }
    }

    fn define_at_front(&self, fci: CosetId, bci: CosetId) -> bool {
        (self.mode.front_fill || fci <= bci) && !self.mode.back_fill
    }

    /// Apply `word` at the cursor's coset, defining cosets until the relator
    /// holds there. Space is recovered, and the scan retried once, if the
    /// table fills up.
    pub(super) fn scan_and_fill(&mut self, cursor: PositionId, word: &[Generator]) -> ScanResult {
        self.ensure_space(word.len());
        let mut retried = false;
        loop {
            let result = self.scan_and_fill_inner(self.positions.current(cursor), word);
            if result == ScanResult::NoCoset {
                return result;
            }
            if result == ScanResult::NoSpace {
                if self.mode.look_ahead {
                    self.schedule_full_scan();
                } else {
                    self.recover_space(true);
                }
            }
            if self.log.has_work() {
                self.seek_consequences();
            }
            if result != ScanResult::NoSpace || retried {
                return result;
            }
            retried = true;
            if self.positions.current(cursor) == NO_COSET || self.can_grow(1) {
                self.failed = false;
            } else {
                return ScanResult::NoSpace;
            }
        }
    }

    pub(super) fn scan_and_fill_inner(&mut self, ci: CosetId, word: &[Generator]) -> ScanResult {
        if !self.table.is_live(ci) {
            return ScanResult::NoCoset;
        }
        let mut walk = Walk {
            fi: 0,
            fci: ci,
            bi: word.len(),
            bci: ci,
        };
        loop {
            self.walk_forward(&mut walk, word);
            if walk.fi == walk.bi {
                return self.close(walk.fci, walk.bci);
            }
            self.walk_backward(&mut walk, word);
            if walk.fi == walk.bi {
                return self.close(walk.fci, walk.bci);
            }
            if walk.bi == walk.fi + 1 {
                self.set_action(walk.fci, word[walk.fi], walk.bci);
                return ScanResult::Deduction;
            }
            if self.define_at_front(walk.fci, walk.bci) {
                let Some(nci) = self.define_coset(walk.fci, word[walk.fi]) else {
                    return ScanResult::NoSpace;
                };
                walk.fci = nci;
                walk.fi += 1;
            } else {
                let g = self.inverse[word[walk.bi - 1]];
                let Some(nci) = self.define_coset(walk.bci, g) else {
                    return ScanResult::NoSpace;
                };
                walk.bci = nci;
                walk.bi -= 1;
            }
        }
    }

    /// Both walks ended at the same point of the relator.
    fn close(&mut self, fci: CosetId, bci: CosetId) -> ScanResult {
        if fci == bci {
            ScanResult::Complete
        } else {
            self.coincidence(fci, bci);
            ScanResult::Coincidence
        }
    }

    /// Number of cosets an open scan of `word` at `ci` would define.
    pub(super) fn scan_count(&self, ci: CosetId, word: &[Generator]) -> usize {
        let mut walk = Walk {
            fi: 0,
            fci: ci,
            bi: word.len(),
            bci: ci,
        };
        self.walk_forward(&mut walk, word);
        self.walk_backward(&mut walk, word);
        (walk.bi - walk.fi).saturating_sub(1)
    }

    /// Closed scan used by look-ahead and full scans.
    pub(super) fn scan_look_ahead(&mut self, ci: CosetId, word: &[Generator]) -> ScanResult {
        self.scan_closed(ci, word, None)
    }

    /// Closed scan of the conjugate `relator`, used when rescanning logged
    /// edits. Short gaps may be filled and best candidates updated.
    pub(super) fn scan_consequence(
        &mut self,
        ci: CosetId,
        word: &[Generator],
        relator: usize,
    ) -> ScanResult {
        self.scan_closed(ci, word, Some(relator))
    }

    fn scan_closed(
        &mut self,
        ci: CosetId,
        word: &[Generator],
        relator: Option<usize>,
    ) -> ScanResult {
        if !self.table.is_live(ci) {
            return ScanResult::NoCoset;
        }
        let gap_fill = relator.is_some() && self.mode.gap_fill;
        let full_ci = if gap_fill {
            self.positions.position(self.filler)
        } else {
            NO_COSET
        };
        let mut fillable = !self.mode.require_low || ci < full_ci;

        let n = word.len();
        let mut fi = 0;
        let mut fci = ci;
        while fi < n {
            let next = self.table.action(fci, word[fi]);
            if next == NO_COSET {
                break;
            }
            fillable |= next < full_ci;
            fci = next;
            fi += 1;
        }
        if fi == n {
            return self.close(fci, ci);
        }

        let mut bi = n;
        let mut bci = ci;
        while bi > fi {
            let next = self.table.action(bci, self.inverse[word[bi - 1]]);
            if next == NO_COSET {
                break;
            }
            fillable |= next < full_ci;
            bci = next;
            bi -= 1;
        }

        match bi - fi {
            0 => self.close(fci, bci),
            1 => {
                self.set_action(fci, word[fi], bci);
                ScanResult::Deduction
            }
            2 if gap_fill
                && fillable
                && n > 3
                && (!self.mode.check_fill_factor
                    || full_ci as usize * self.fill_factor > self.counts.live) =>
            {
                self.fill_short_gap(fci, word[fi], word[fi + 1], bci)
            }
            gap => {
                if let (Some(relator), Some(candidates)) = (relator, self.candidates.as_mut()) {
                    candidates.update(&mut self.positions, relator, ci, gap);
                }
                ScanResult::Incomplete
            }
        }
    }

    /// Fill the gap `fci^first^second = bci` with one new coset, or queue
    /// the definition.
    fn fill_short_gap(
        &mut self,
        fci: CosetId,
        first: Generator,
        second: Generator,
        bci: CosetId,
    ) -> ScanResult {
        let front = self.define_at_front(fci, bci);
        let (ci, g) = if front {
            (fci, first)
        } else {
            (bci, self.inverse[second])
        };
        if self.mode.queue_gaps {
            self.gaps.push(ci, g);
            return ScanResult::Incomplete;
        }
        let Some(nci) = self.define_coset(ci, g) else {
            self.failed = false;
            return ScanResult::Incomplete;
        };
        self.statistics.increment(Counters::ShortGapsFilled);
        let (from, g, to) = if front {
            (nci, second, bci)
        } else {
            (fci, first, nci)
        };
        if self.table.action(from, g) == NO_COSET
            && self.table.action(to, self.inverse[g]) == NO_COSET
        {
            self.set_action(from, g, to);
        }
        ScanResult::Deduction
    }

    /// Check `word` at `ci` in a table with no undefined entries.
    pub(super) fn scan_final(&mut self, ci: CosetId, word: &[Generator]) -> ScanResult {
        if !self.table.is_live(ci) {
            return ScanResult::NoCoset;
        }
        let mut fci = ci;
        for &g in word {
            fci = self.table.action(fci, g);
            if fci == NO_COSET {
                return ScanResult::Incomplete;
            }
        }
        self.close(fci, ci)
    }
}
