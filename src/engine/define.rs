// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Coset definitions and table growth.

use super::{Enumerator, LARGE_TABLE};
use crate::positions::PositionId;
use crate::state::Counters;
use crate::table::{CosetId, NO_COSET};
use crate::word::Generator;
use tracing::debug;

/// New capacities are rounded up to a multiple of this many rows.
const GROWTH_QUANTUM: usize = 256;

impl Enumerator {
    /// True if `amount` more cosets fit, growing the table if allowed.
    pub(super) fn can_grow(&mut self, amount: usize) -> bool {
        if self.positions.can_grow(amount) {
            return true;
        }
        self.grow(amount);
        self.positions.can_grow(amount)
    }

    /// Enlarge the table so that at least `amount` more cosets fit, up to
    /// the ceiling.
    pub(super) fn grow(&mut self, amount: usize) {
        let current = self.table.capacity();
        if current >= self.ceiling {
            return;
        }
        let needed = self.positions.last_coset() as usize + amount + 1;
        let mut desired = if current >= LARGE_TABLE {
            current + current / 8 + 1
        } else {
            current * 2
        };
        desired = desired.max(needed);
        if self.dynamic && self.mode.look_ahead && desired >= LARGE_TABLE {
            // Give look-ahead a chance before the table gets any bigger.
            self.schedule_full_scan();
            self.has_overflowed = true;
        }
        let desired = desired
            .div_ceil(GROWTH_QUANTUM)
            .saturating_mul(GROWTH_QUANTUM)
            .min(self.ceiling);
        if desired > current {
            debug!(from = current, to = desired, "growing coset table");
            if self.set_capacity(desired) {
                self.statistics.increment(Counters::TableGrowths);
            } else {
                // Out of memory: the table stays this size from now on.
                self.ceiling = current;
            }
        }
    }

    /// Grow, or failing that recover space, so that `amount` more cosets
    /// fit while consequences are being checked.
    pub(super) fn ensure_space(&mut self, amount: usize) {
        if self.mode.check_consequences && !self.can_grow(amount) {
            self.recover_space(true);
            self.grow(amount);
        }
    }

    /// Define a new coset as `ci^g`. Returns `None`, with `failed` set, if
    /// there is no room.
    pub(super) fn define_coset(&mut self, ci: CosetId, g: Generator) -> Option<CosetId> {
        if !self.positions.can_grow(1) {
            self.grow(1);
        }
        let Some(nci) = self.positions.add_coset() else {
            self.has_overflowed = true;
            self.failed = true;
            return None;
        };
        self.table.reset_row(nci);
        self.counts.add_coset(self.nr_generators);
        self.statistics.increment(Counters::CosetsDefined);
        self.set_action(ci, g, nci);
        Some(nci)
    }

    /// Set `ci^g = nci` and `nci^(g^-1) = ci`, logging the edit when
    /// consequences are being checked.
    pub(super) fn set_action(&mut self, ci: CosetId, g: Generator, nci: CosetId) {
        let ig = self.inverse[g];
        self.table.set_cell(ci, g, nci);
        self.table.set_cell(nci, ig, ci);
        self.counts.undefined -= if ci == nci && g == ig { 1 } else { 2 };

        if !self.mode.check_consequences {
            self.consequences_skipped = true;
            return;
        }
        if self.log.full_scan_required() {
            return;
        }
        if self.log.is_full() {
            if self.log.len() > self.counts.live / 2 {
                debug!(
                    entries = self.log.len(),
                    live = self.counts.live,
                    "deduction log overflow; scheduling a full scan"
                );
                self.schedule_full_scan();
                return;
            }
            if self.log_purge_required {
                self.clean_log();
            }
            self.log.grow();
        }
        if g <= ig {
            self.log.push(ci, g);
        } else {
            self.log.push(nci, ig);
        }
    }

    /// The coset `current(cursor)^g`, defining it if necessary. Returns
    /// `None` if the cursor's coset has died or there is no room even after
    /// recovering space.
    pub(super) fn ensure_defined(
        &mut self,
        cursor: PositionId,
        g: Generator,
    ) -> Option<CosetId> {
        let mut retried = false;
        loop {
            self.failed = false;
            let ci = self.positions.current(cursor);
            if !self.table.is_live(ci) {
                return None;
            }
            let nci = self.table.action(ci, g);
            if nci != NO_COSET {
                return Some(nci);
            }
            if let Some(nci) = self.define_coset(ci, g) {
                return Some(nci);
            }
            if retried {
                return None;
            }
            retried = true;
            if self.mode.look_ahead {
                self.schedule_full_scan();
                self.seek_consequences();
            } else {
                self.recover_space(true);
            }
        }
    }

    pub(super) fn schedule_full_scan(&mut self) {
        self.log.schedule_full_scan();
    }
}
