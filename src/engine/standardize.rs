// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Breadth-first renumbering.
//!
//! A table is standardized when walking the rows in order, and each row in
//! generator order, meets every coset for the first time in increasing
//! order. Two enumerations of the same subgroup produce identical
//! standardized tables.

use super::Enumerator;
use crate::error::EnumerationError;
use crate::table::{CosetId, NO_COSET};

impl Enumerator {
    /// Renumber a complete table into standard order.
    pub(super) fn standardize(&mut self) -> Result<(), EnumerationError> {
        if self.counts.live != self.positions.last_coset() as usize {
            self.compress();
        }
        let last = self.positions.last_coset();
        let mut next_slot: CosetId = 2;
        let mut ci: CosetId = 1;
        while next_slot <= last && ci <= last {
            self.poll_abort()?;
            for g in 0..self.nr_generators {
                let nci = self.table.action(ci, g);
                if nci >= next_slot {
                    if nci > next_slot {
                        self.exchange(next_slot, nci);
                    }
                    next_slot += 1;
                    if next_slot > last {
                        return Ok(());
                    }
                }
            }
            ci += 1;
        }
        Ok(())
    }

    /// Swap the numbers of cosets `dest` and `src`. If `dest` is dead, `src`
    /// moves into its row and dies in its place.
    pub(super) fn exchange(&mut self, dest: CosetId, src: CosetId) {
        let n = self.nr_generators;
        let swap = move |c: CosetId| {
            if c == src {
                dest
            } else if c == dest {
                src
            } else {
                c
            }
        };
        let dest_live = self.table.is_live(dest);
        let src_row = self.table.row(src).to_vec();
        let dest_row = if dest_live {
            self.table.row(dest).to_vec()
        } else {
            vec![NO_COSET; n]
        };

        let mut fixes = Vec::new();
        for g in 0..n {
            let ig = self.inverse[g];
            for (target, renamed) in [(src_row[g], dest), (dest_row[g], src)] {
                if target != NO_COSET && target != src && target != dest {
                    fixes.push((target, ig, renamed));
                }
            }
        }
        for (target, g, renamed) in fixes {
            self.table.set_cell(target, g, renamed);
        }
        for g in 0..n {
            self.table.set_cell(dest, g, swap(src_row[g]));
            self.table.set_cell(src, g, swap(dest_row[g]));
        }
        if !dest_live {
            self.table.mark_live(dest);
            self.table.kill(src, 1);
        }

        if !self.log.is_empty() {
            self.log.renumber(|c, _| Some(swap(c)));
        }
        if !self.gaps.is_empty() {
            self.gaps.renumber(|c, _| Some(swap(c)));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Enumerator;
    use crate::options::{EnumerationOptions, Strategy};
    use crate::presentation::Presentation;
    use crate::word::Alphabet;

    fn enumerator() -> Enumerator {
        let mut alphabet = Alphabet::new();
        alphabet.add_pair("x", "X").unwrap();
        alphabet.add_involution("t").unwrap();
        let options = EnumerationOptions::with_strategy(Strategy::Sims1);
        Enumerator::new(&Presentation::new(alphabet), options).unwrap()
    }

    #[test]
    fn test_exchange_keeps_table_consistent() {
        let mut enumerator = enumerator();
        // 1 -t-> 2, 1 -x-> 3, 3 -t-> 3
        enumerator.define_coset(1, 2).unwrap();
        enumerator.define_coset(1, 0).unwrap();
        enumerator.set_action(3, 2, 3);
        enumerator.log.push(3, 2);
        enumerator.exchange(2, 3);
        assert_eq!(enumerator.table.action(1, 0), 2);
        assert_eq!(enumerator.table.action(2, 1), 1);
        assert_eq!(enumerator.table.action(2, 2), 2);
        assert_eq!(enumerator.table.action(1, 2), 3);
        assert_eq!(enumerator.table.action(3, 2), 1);
        assert_eq!(enumerator.log.pop(), Some((2, 2)));
    }

    #[test]
    fn test_standardize_orders_by_first_occurrence() {
        let mut enumerator = enumerator();
        enumerator.define_coset(1, 2).unwrap();
        enumerator.define_coset(1, 0).unwrap();
        enumerator.standardize().unwrap();
        // x comes before t, so 1^x is coset 2.
        assert_eq!(enumerator.table.action(1, 0), 2);
        assert_eq!(enumerator.table.action(1, 2), 3);
    }
}
