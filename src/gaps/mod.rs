// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Deferred coset definitions at short scan gaps.
//!
//! Two heuristics are supported:
//!
//! - [`GapQueue`] (gap strategy 1): when a consequence scan stops one
//!   definition short of a deduction, the definition is queued and made once
//!   the deduction log is empty. The queue is bounded; when it is full the
//!   oldest entry is dropped.
//! - [`Candidates`] (gap strategy 2): one slot per relator remembering the
//!   coset with the shortest outstanding gap for that relator. The row filler
//!   takes the slots round robin and fills the relator from that coset.

mod candidates;

pub use candidates::Candidates;

use crate::table::CosetId;
use std::collections::VecDeque;

/// A ring of `slots` slots, one of which is always empty, so at most
/// `slots - 1` definitions are held.
#[derive(Debug, Default)]
pub struct GapQueue {
    entries: VecDeque<(CosetId, usize)>,
    limit: usize,
}

impl GapQueue {
    pub fn new(slots: usize) -> Self {
        let limit = slots.saturating_sub(1);
        GapQueue {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue a definition of `coset^g`, dropping the oldest entry when the
    /// queue is full. Does nothing if the queue has fewer than two slots.
    pub fn push(&mut self, coset: CosetId, g: usize) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back((coset, g));
    }

    pub fn pop(&mut self) -> Option<(CosetId, usize)> {
        self.entries.pop_front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace every entry, preserving order; entries mapped to `None` are
    /// dropped.
    pub fn renumber(&mut self, mut map: impl FnMut(CosetId, usize) -> Option<CosetId>) {
        self.entries = self
            .entries
            .iter()
            .filter_map(|&(c, g)| map(c, g).map(|n| (n, g)))
            .collect();
    }
}
