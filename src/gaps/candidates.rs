// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Best scan candidate per relator.

use crate::positions::{PositionId, PositionRegistry};
use crate::table::{CosetId, NO_COSET};

#[derive(Debug, Clone, Copy)]
struct Candidate {
    position: PositionId,
    gap: usize,
}

/// One slot per relator in the universe, each remembering the coset from
/// which that relator is nearest to completion.
///
/// The slots hold cursors so that they follow their coset through
/// renumbering, and lose it when the coset dies.
#[derive(Debug)]
pub struct Candidates {
    slots: Vec<Option<Candidate>>,
    next: usize,
    exhausted: bool,
}

impl Candidates {
    pub fn new(nr_relators: usize) -> Self {
        Candidates {
            slots: vec![None; nr_relators],
            next: 0,
            exhausted: true,
        }
    }

    /// True once a full round found no candidate; cleared by the next update.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Offer `coset` as the place to fill `relator`, which has `gap`
    /// undefined steps there. Kept if the slot is empty, its coset died, the
    /// gap is shorter, or the gap is equal and the coset lower.
    pub fn update(
        &mut self,
        registry: &mut PositionRegistry,
        relator: usize,
        coset: CosetId,
        gap: usize,
    ) {
        self.exhausted = false;
        if let Some(candidate) = &mut self.slots[relator] {
            let current = registry.current(candidate.position);
            if current == NO_COSET
                || gap < candidate.gap
                || (gap == candidate.gap && coset < current)
            {
                registry.set_position(candidate.position, coset);
                candidate.gap = gap;
            }
        } else {
            let position = registry.create();
            registry.set_position(position, coset);
            self.slots[relator] = Some(Candidate { position, gap });
        }
    }

    /// Remove the next candidate in round-robin order, returning its relator
    /// and cursor. The caller owns the cursor and must release it. Returns
    /// `None`, and marks the slots exhausted, after two fruitless passes.
    pub fn take_next(&mut self) -> Option<(usize, PositionId)> {
        if self.slots.is_empty() {
            self.exhausted = true;
            return None;
        }
        let mut wrapped_once = false;
        loop {
            if let Some(candidate) = self.slots[self.next].take() {
                return Some((self.next, candidate.position));
            }
            self.next += 1;
            if self.next == self.slots.len() {
                self.next = 0;
                if wrapped_once {
                    self.exhausted = true;
                    return None;
                }
                wrapped_once = true;
            }
        }
    }

    /// Move on to the next relator after a candidate has been used.
    pub fn step(&mut self) {
        self.next += 1;
        if self.next == self.slots.len() {
            self.next = 0;
        }
    }

    /// Swap two coset numbers in every slot.
    pub fn exchange(&mut self, registry: &mut PositionRegistry, a: CosetId, b: CosetId) {
        for candidate in self.slots.iter().flatten() {
            let current = registry.current(candidate.position);
            if current == a {
                registry.set_position(candidate.position, b);
            } else if current == b {
                registry.set_position(candidate.position, a);
            }
        }
    }

    /// Release the cursors of slots whose coset has died.
    pub fn release_stale(&mut self, registry: &mut PositionRegistry) {
        for slot in self.slots.iter_mut() {
            if let Some(candidate) = slot {
                if registry.current(candidate.position) == NO_COSET {
                    registry.release(candidate.position);
                    *slot = None;
                }
            }
        }
    }

    /// Release every cursor.
    pub fn release_all(&mut self, registry: &mut PositionRegistry) {
        for candidate in self.slots.iter_mut().filter_map(Option::take) {
            registry.release(candidate.position);
        }
    }
}
