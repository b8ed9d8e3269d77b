// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Coincidence processing.
//!
//! Merging two cosets kills the higher one and queues it. Each queued coset
//! then hands its transitions over to its representative, which may in turn
//! force further merges. The queue is a FIFO threaded through the table's
//! link column.

use super::Enumerator;
use crate::state::Counters;
use crate::table::{CosetId, NO_COSET};
use crate::word::Generator;

impl Enumerator {
    /// Identify cosets `a` and `b`, and everything that follows from that.
    pub(super) fn coincidence(&mut self, a: CosetId, b: CosetId) {
        self.merge_head = NO_COSET;
        self.merge_tail = NO_COSET;
        self.merge_queue = 0;
        self.merge(a, b);

        while self.merge_head != NO_COSET {
            let dying = self.merge_head;
            self.merge_queue -= 1;
            for g in 0..self.nr_generators {
                self.transfer_edge(dying, g);
            }
            self.counts.dead += 1;
            self.counts.undefined -= self.nr_generators;
            self.merge_head = self.table.link(dying);
        }
        self.merge_tail = NO_COSET;

        let table = &self.table;
        self.positions.forget_dead(|c| table.is_live(c));
        if self.counts.undefined == 0 {
            self.gaps.clear();
        }
        if !self.recover_space(false) {
            self.log_purge_required = !self.log.is_empty() && !self.log.full_scan_required();
        }
        #[cfg(debug_assertions)]
        self.validate();
    }

    /// Queue the higher of the representatives of `a` and `b` for merging
    /// into the lower.
    fn merge(&mut self, a: CosetId, b: CosetId) {
        let a = self.table.representative(a);
        let b = self.table.representative(b);
        if a == b {
            return;
        }
        let (keep, kill) = if a < b { (a, b) } else { (b, a) };
        self.table.kill(kill, keep);
        self.table.set_link(kill, NO_COSET);
        if self.merge_head == NO_COSET {
            self.merge_head = kill;
        } else {
            self.table.set_link(self.merge_tail, kill);
        }
        self.merge_tail = kill;
        self.counts.live -= 1;

        self.statistics.increment(Counters::Coincidences);
        self.merge_queue += 1;
        self.statistics
            .record_max(Counters::MaxMergeQueue, self.merge_queue as u64);
    }

    /// Move the transition `dying^g` onto the representatives.
    fn transfer_edge(&mut self, dying: CosetId, g: Generator) {
        let target = self.table.action(dying, g);
        if target == NO_COSET {
            return;
        }
        let ig = self.inverse[g];
        self.table.set_cell(dying, g, NO_COSET);
        self.table.set_cell(target, ig, NO_COSET);
        self.counts.undefined += if target == dying && g == ig { 1 } else { 2 };

        let rep = self.table.representative(dying);
        let trep = self.table.representative(target);
        let existing = self.table.action(rep, g);
        if existing != NO_COSET {
            self.merge(existing, trep);
            return;
        }
        let back = self.table.action(trep, ig);
        if back != NO_COSET {
            self.merge(back, rep);
        } else {
            self.set_action(rep, g, trep);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Enumerator;
    use crate::options::{EnumerationOptions, Strategy};
    use crate::presentation::Presentation;
    use crate::state::Counters;
    use crate::word::Alphabet;

    fn cyclic_enumerator() -> Enumerator {
        let mut alphabet = Alphabet::new();
        alphabet.add_pair("b", "B").unwrap();
        let presentation = Presentation::new(alphabet).with_relators(&["b^2"]).unwrap();
        let options = EnumerationOptions::with_strategy(Strategy::Sims1);
        Enumerator::new(&presentation, options).unwrap()
    }

    #[test]
    fn test_merge_carries_edges_to_representative() {
        let mut enumerator = cyclic_enumerator();
        enumerator.define_coset(1, 0).unwrap();
        enumerator.define_coset(2, 0).unwrap();
        enumerator.define_coset(3, 0).unwrap();
        // 1 -> 2 -> 3 -> 4; identify 1 and 3.
        enumerator.coincidence(3, 1);
        assert_eq!(enumerator.counts.live, 2);
        assert!(!enumerator.table.is_live(3));
        assert!(!enumerator.table.is_live(4));
        // The dead cosets were at the end of the table and have been dropped.
        assert_eq!(enumerator.counts.dead, 0);
        assert_eq!(enumerator.positions.last_coset(), 2);
        assert_eq!(enumerator.table.action(1, 0), 2);
        assert_eq!(enumerator.table.action(2, 0), 1);
        assert_eq!(enumerator.table.action(1, 1), 2);
        assert_eq!(enumerator.counts.undefined, 0);
        assert_eq!(enumerator.statistics.get(Counters::Coincidences), 2);
    }

    #[test]
    fn test_single_merge_loses_one_coset() {
        let mut alphabet = Alphabet::new();
        alphabet.add_pair("x", "X").unwrap();
        alphabet.add_pair("y", "Y").unwrap();
        let options = EnumerationOptions::with_strategy(Strategy::Sims1);
        let mut enumerator = Enumerator::new(&Presentation::new(alphabet), options).unwrap();
        // x, y and X each lead from 1 to a new coset: 2, 3 and 4.
        enumerator.define_coset(1, 0).unwrap();
        enumerator.define_coset(1, 2).unwrap();
        enumerator.define_coset(1, 1).unwrap();
        let live = enumerator.counts.live;
        let dead = enumerator.counts.dead;

        // 3 only has its Y edge, which 2 lacks, so nothing else follows.
        enumerator.coincidence(2, 3);
        assert_eq!(enumerator.counts.live, live - 1);
        assert_eq!(enumerator.counts.dead, dead + 1);
        assert_eq!(enumerator.statistics.get(Counters::Coincidences), 1);
        assert!(!enumerator.table.is_live(3));
        assert_eq!(enumerator.positions.last_coset(), 4);
        assert_eq!(enumerator.table.action(1, 2), 2);
        assert_eq!(enumerator.table.action(2, 3), 1);
        assert_eq!(enumerator.counts.undefined, 3 * 4 - 6);
    }

    #[test]
    fn test_merge_of_equal_representatives_is_a_no_op() {
        let mut enumerator = cyclic_enumerator();
        enumerator.define_coset(1, 0).unwrap();
        enumerator.coincidence(2, 2);
        assert_eq!(enumerator.counts.live, 2);
        assert_eq!(enumerator.statistics.get(Counters::Coincidences), 0);
    }
}
