// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rewriting the base relator set before enumeration.

use super::{Enumerator, PhaseMode};
use crate::options::EquivalentPresentation;
use crate::word::rotate;
use std::sync::Arc;
use tracing::debug;

impl Enumerator {
    /// Reorder the base set and, relator by relator, replace it by the
    /// cyclic conjugate needing the fewest (or most) new cosets when
    /// applied at coset 1 after the ones before it.
    pub(super) fn equivalent_presentation(&mut self) {
        let choice = self.options.equivalent_presentation;
        if choice == EquivalentPresentation::AsIs {
            return;
        }
        debug!(%choice, "rewriting relators");
        self.mode = PhaseMode::default();
        let universe = Arc::clone(&self.universe);
        let mut base = universe.base_set().to_vec();
        if choice.reverses() {
            base.reverse();
        }

        if let Some(most) = choice.conjugate_choice() {
            if let Some(&first) = base.first() {
                self.scan_and_fill_inner(1, universe.relator(first));
            }
            for slot in base.iter_mut().skip(1) {
                let word = universe.relator(*slot);
                let gap = self.scan_count(1, word);
                if gap != 0 {
                    let mut best = 0;
                    let mut best_gap = gap;
                    for start in 1..word.len() {
                        let count = self.scan_count(1, &rotate(word, start));
                        if (most && count > best_gap) || (!most && count < best_gap) {
                            best = start;
                            best_gap = count;
                        }
                    }
                    if best != 0 {
                        if let Some(conjugate) = universe.find(&rotate(word, best)) {
                            *slot = conjugate;
                        }
                    }
                }
                self.scan_and_fill_inner(1, universe.relator(*slot));
            }
            self.reset_table();
        }

        drop(universe);
        *Arc::make_mut(&mut self.universe).base_set_mut() = base;
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Enumerator;
    use crate::options::{EnumerationOptions, EquivalentPresentation};
    use crate::presentation::{CyclicReduction, Presentation};
    use crate::word::Alphabet;

    fn presentation() -> Presentation {
        let mut alphabet = Alphabet::new();
        alphabet.add_pair("a", "A").unwrap();
        alphabet.add_pair("b", "B").unwrap();
        Presentation::new(alphabet)
            .with_relators(&["a^3", "b^3", "(ab)^2"])
            .unwrap()
    }

    fn options(mode: EquivalentPresentation) -> EnumerationOptions {
        let mut options = EnumerationOptions::default();
        options.cyclic_reduction = CyclicReduction::AsIs;
        options.equivalent_presentation = mode;
        options
    }

    #[test]
    fn test_reverse_reverses_base_set() {
        let plain =
            Enumerator::new(&presentation(), options(EquivalentPresentation::AsIs)).unwrap();
        let reversed =
            Enumerator::new(&presentation(), options(EquivalentPresentation::Reverse)).unwrap();
        let mut expected = plain.universe.base_set().to_vec();
        expected.reverse();
        assert_eq!(reversed.universe.base_set(), expected.as_slice());
    }

    #[test]
    fn test_conjugate_choice_leaves_fresh_table() {
        for mode in [
            EquivalentPresentation::FewestDefinitions,
            EquivalentPresentation::MostDefinitions,
        ] {
            let enumerator = Enumerator::new(&presentation(), options(mode)).unwrap();
            assert_eq!(enumerator.positions.last_coset(), 1);
            assert_eq!(enumerator.universe.base_set().len(), 3);
            let enumeration = enumerator.run().unwrap();
            assert_eq!(enumeration.index(), 12);
        }
    }
}
