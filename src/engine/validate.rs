// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Table consistency checks, compiled into debug builds only.

use super::Enumerator;
use crate::table::NO_COSET;

impl Enumerator {
    /// Panic if the table breaks any structural invariant: every
    /// transition is matched by its inverse and leads to a live coset, rows
    /// below the filler are complete, and the counters agree with the
    /// table.
    pub(super) fn validate(&self) {
        let last = self.positions.last_coset();
        let filled_below = self.positions.position(self.filler);
        let mut live = 0;
        let mut defined = 0;
        for ci in 1..=last {
            if !self.table.is_live(ci) {
                continue;
            }
            live += 1;
            for g in 0..self.nr_generators {
                let nci = self.table.action(ci, g);
                if nci == NO_COSET {
                    assert!(
                        ci >= filled_below,
                        "coset {ci} is below the filler ({filled_below}) but {ci}^{g} is undefined"
                    );
                    continue;
                }
                defined += 1;
                assert!(
                    self.table.is_live(nci),
                    "{ci}^{g} = {nci}, which is not a live coset"
                );
                assert_eq!(
                    self.table.action(nci, self.inverse[g]),
                    ci,
                    "{ci}^{g} = {nci} but the inverse transition disagrees"
                );
            }
        }
        assert_eq!(live, self.counts.live, "live coset count");
        assert_eq!(
            defined + self.counts.undefined,
            live * self.nr_generators,
            "undefined transition count"
        );
        assert_eq!(
            last as usize - live,
            self.counts.dead,
            "dead coset count"
        );
    }
}
