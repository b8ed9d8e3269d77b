// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Recovering the rows of dead cosets.
//!
//! Compaction renumbers the live cosets `1..=live` in their existing order.
//! Cursors follow through [`PositionRegistry`](crate::positions::PositionRegistry)
//! adjustment. Pending log entries and queued gaps are handled according to
//! the [`CompactionMode`].

use super::Enumerator;
use crate::options::CompactionMode;
use crate::state::Counters;
use crate::table::{CosetId, NO_COSET};
use crate::word::Generator;
use tracing::debug;

impl Enumerator {
    /// Compact the table if that is allowed now and worthwhile, or `want`
    /// says it is needed. Returns true if the table was compacted.
    pub(super) fn recover_space(&mut self, want: bool) -> bool {
        if self.options.max_hole_percentage == 100 || self.counts.dead == 0 {
            return false;
        }
        let log_idle = self.log.is_empty() || self.log.full_scan_required();
        if self.gaps.is_empty() && log_idle {
            self.trim_tail();
        }
        if (log_idle || self.compaction != CompactionMode::Discard) && self.full_scanner.is_none() {
            let want = want
                || self.counts.dead * 100
                    > self.table.capacity() * self.options.max_hole_percentage as usize;
            if want && self.counts.dead > self.options.allow_holes {
                self.compress();
                return true;
            }
        }
        false
    }

    /// Drop dead cosets from the end of the table.
    fn trim_tail(&mut self) {
        let table = &self.table;
        let trimmed = self.positions.trim_dead_tail(|c| table.is_live(c));
        self.counts.dead -= trimmed as usize;
    }

    /// Remove every dead coset from the table.
    pub(super) fn compress(&mut self) {
        self.statistics.increment(Counters::Compactions);
        debug!(
            live = self.counts.live,
            dead = self.counts.dead,
            mode = %self.compaction,
            "compacting coset table"
        );
        if let Some(candidates) = self.candidates.as_mut() {
            candidates.release_stale(&mut self.positions);
        }
        self.trim_tail();
        if self.counts.dead == 0 {
            return;
        }

        let pending = (!self.log.is_empty() && !self.log.full_scan_required())
            || !self.gaps.is_empty();
        match (self.compaction, self.ren_column) {
            (CompactionMode::SpecialColumn, Some(ren)) if pending => {
                self.compress_through_column(ren)
            }
            (CompactionMode::RebuildByRow | CompactionMode::RebuildByColumn, _) if pending => {
                self.compress_rebuilding()
            }
            _ => {
                if !self.log.is_empty() {
                    self.schedule_full_scan();
                }
                self.gaps.clear();
                self.compress_plain();
            }
        }
    }

    /// Copy row `from` to row `to`, repointing its neighbours.
    fn move_row(&mut self, from: CosetId, to: CosetId) {
        for g in 0..self.nr_generators {
            let mut nci = self.table.action(from, g);
            if nci != NO_COSET {
                if nci == from {
                    nci = to;
                } else {
                    self.table.set_cell(nci, self.inverse[g], to);
                }
            }
            self.table.set_cell(to, g, nci);
        }
        self.table.mark_live(to);
    }

    fn compress_plain(&mut self) {
        let old_last = self.positions.last_coset();
        self.positions.begin_adjustment();
        let mut new_last = NO_COSET;
        for ci in 1..=old_last {
            if self.table.is_live(ci) {
                new_last += 1;
                if new_last != ci {
                    self.move_row(ci, new_last);
                }
            } else {
                self.positions.count_hole(ci);
            }
        }
        self.finish_compaction(old_last, new_last);
    }

    fn finish_compaction(&mut self, old_last: CosetId, new_last: CosetId) {
        for c in (new_last + 1).max(2)..=old_last {
            self.table.kill(c, 1);
        }
        let holes = self.positions.end_adjustment();
        debug_assert_eq!(
            holes as usize, self.counts.dead,
            "compaction removed a different number of cosets than were dead"
        );
        self.counts.dead = 0;
    }

    /// Compact, using column `ren` to record where each coset went so that
    /// the log and gap queue keep their order.
    fn compress_through_column(&mut self, ren: Generator) {
        let iren = self.inverse[ren];
        let old_last = self.positions.last_coset();
        self.positions.begin_adjustment();
        let mut new_last = NO_COSET;
        for ci in 1..=old_last {
            if !self.table.is_live(ci) {
                self.table.set_cell(ci, ren, NO_COSET);
                self.positions.count_hole(ci);
                continue;
            }
            new_last += 1;
            if new_last != ci {
                for g in 0..self.nr_generators {
                    let nci = self.table.action(ci, g);
                    let ig = self.inverse[g];
                    // Cells of column ren below ci already hold new numbers.
                    if nci != NO_COSET && nci != ci && (ig != ren || nci > ci) {
                        self.table.set_cell(nci, ig, new_last);
                    }
                    if g != ren {
                        let moved = if nci == ci { new_last } else { nci };
                        self.table.set_cell(new_last, g, moved);
                    }
                }
                self.table.mark_live(new_last);
            }
            self.table.set_cell(ci, ren, new_last);
        }

        let table = &self.table;
        let map = |c: CosetId| {
            let n = if c <= old_last {
                table.action(c, ren)
            } else {
                NO_COSET
            };
            (n != NO_COSET).then_some(n)
        };
        self.log.renumber(|c, _| map(c));
        self.gaps.renumber(|c, _| map(c));
        self.finish_compaction(old_last, new_last);

        for c in 1..=new_last {
            self.table.set_cell(c, ren, NO_COSET);
        }
        for c in 1..=new_last {
            let d = self.table.action(c, iren);
            if d != NO_COSET {
                self.table.set_cell(d, ren, c);
            }
        }
        let table = &self.table;
        self.gaps
            .renumber(|c, g| (table.action(c, g) == NO_COSET).then_some(c));
    }

    /// Compact after tagging the cells named by the log and gap queue, then
    /// rebuild both from the tags.
    fn compress_rebuilding(&mut self) {
        let n = self.nr_generators;
        let old_last = self.positions.last_coset();
        let mut pending = vec![false; (old_last as usize + 1) * n];
        while let Some((c, g)) = self.log.pop() {
            if c <= old_last && self.table.is_live(c) {
                pending[c as usize * n + g] = true;
            }
        }
        while let Some((c, g)) = self.gaps.pop() {
            if c <= old_last && self.table.is_live(c) && self.table.action(c, g) == NO_COSET {
                pending[c as usize * n + g] = true;
            }
        }

        self.positions.begin_adjustment();
        let mut new_last = NO_COSET;
        for ci in 1..=old_last {
            if self.table.is_live(ci) {
                new_last += 1;
                if new_last != ci {
                    self.move_row(ci, new_last);
                    let from = ci as usize * n;
                    pending.copy_within(from..from + n, new_last as usize * n);
                }
            } else {
                self.positions.count_hole(ci);
            }
        }
        self.finish_compaction(old_last, new_last);

        let by_row = self.compaction != CompactionMode::RebuildByColumn;
        let cells: Box<dyn Iterator<Item = (CosetId, Generator)>> = if by_row {
            Box::new((1..=new_last).flat_map(|c| (0..n).map(move |g| (c, g))))
        } else {
            Box::new((0..n).flat_map(move |g| (1..=new_last).map(move |c| (c, g))))
        };
        for (c, g) in cells {
            if !pending[c as usize * n + g] {
                continue;
            }
            if self.table.action(c, g) != NO_COSET {
                self.log.push(c, g);
            } else {
                self.gaps.push(c, g);
            }
        }
    }
}
