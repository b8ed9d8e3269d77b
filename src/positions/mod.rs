// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cursors into the coset sequence.
//!
//! The enumerator walks the table with several independent cursors: the
//! relator scanner, the row filler, the standardizer, the full scanner and one
//! per best gap candidate. A cursor has a *current* coset (0 when it has
//! none) and a *next* coset, the one [`PositionRegistry::advance`] moves to.
//!
//! All cursors live in one [`PositionRegistry`] and are addressed by
//! [`PositionId`] handles, so the registry can fix every cursor up in a single
//! pass when cosets die or are renumbered.
//!
//! The registry also owns the number of the last coset in use and the table
//! capacity, since only it decides when a new coset number is handed out.

use crate::table::{CosetId, NO_COSET};

/// Handle to a cursor owned by a [`PositionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionId(usize);

#[derive(Debug, Clone, Copy)]
struct Cursor {
    current: CosetId,
    next: CosetId,
    /// Holes counted below `next` during a renumbering pass.
    adjustment: CosetId,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            current: NO_COSET,
            next: 1,
            adjustment: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct PositionRegistry {
    cursors: Vec<Option<Cursor>>,
    /// Released slots available for reuse.
    free: Vec<usize>,
    last_coset: CosetId,
    /// Number of rows, including the sentinel row 0.
    capacity: usize,
    holes: CosetId,
}

impl PositionRegistry {
    pub fn new() -> Self {
        PositionRegistry::default()
    }

    /// Forget all cursors and cosets.
    pub fn reset(&mut self) {
        self.cursors.clear();
        self.free.clear();
        self.last_coset = NO_COSET;
    }

    pub fn last_coset(&self) -> CosetId {
        self.last_coset
    }

    pub fn set_capacity(&mut self, rows: usize) {
        self.capacity = rows;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if `amount` more cosets fit without growing the table.
    pub fn can_grow(&self, amount: usize) -> bool {
        self.last_coset as usize + amount < self.capacity
    }

    /// Hand out the next coset number, if there is room for it.
    pub fn add_coset(&mut self) -> Option<CosetId> {
        if self.can_grow(1) {
            self.last_coset += 1;
            Some(self.last_coset)
        } else {
            None
        }
    }

    /// Number of cursors currently registered.
    pub fn cursor_count(&self) -> usize {
        self.cursors.len() - self.free.len()
    }

    /// Create a cursor positioned before coset 1.
    pub fn create(&mut self) -> PositionId {
        match self.free.pop() {
            Some(slot) => {
                self.cursors[slot] = Some(Cursor::new());
                PositionId(slot)
            }
            None => {
                self.cursors.push(Some(Cursor::new()));
                PositionId(self.cursors.len() - 1)
            }
        }
    }

    pub fn release(&mut self, id: PositionId) {
        if self.cursors[id.0].take().is_some() {
            self.free.push(id.0);
        }
    }

    fn cursor(&self, id: PositionId) -> &Cursor {
        self.cursors[id.0]
            .as_ref()
            .unwrap_or_else(|| panic!("cursor {} used after release", id.0))
    }

    fn cursor_mut(&mut self, id: PositionId) -> &mut Cursor {
        self.cursors[id.0]
            .as_mut()
            .unwrap_or_else(|| panic!("cursor {} used after release", id.0))
    }

    pub fn current(&self, id: PositionId) -> CosetId {
        self.cursor(id).current
    }

    pub fn next(&self, id: PositionId) -> CosetId {
        self.cursor(id).next
    }

    /// The current coset, or the next one if there is no current coset.
    pub fn position(&self, id: PositionId) -> CosetId {
        let cursor = self.cursor(id);
        if cursor.current != NO_COSET {
            cursor.current
        } else {
            cursor.next
        }
    }

    /// Restart from coset 1.
    pub fn begin(&mut self, id: PositionId) {
        self.cursor_mut(id).next = 1;
    }

    /// Return the current coset; only when there is none, move to the next
    /// coset in use. Returns 0 past the end.
    pub fn advance(&mut self, id: PositionId) -> CosetId {
        let last = self.last_coset;
        let cursor = self.cursor_mut(id);
        if cursor.current != NO_COSET {
            return cursor.current;
        }
        if cursor.next <= last {
            cursor.current = cursor.next;
            cursor.next += 1;
            return cursor.current;
        }
        NO_COSET
    }

    /// Finish with the current coset so that the next `advance` moves on.
    pub fn end_current(&mut self, id: PositionId) {
        self.cursor_mut(id).current = NO_COSET;
    }

    pub fn set_position(&mut self, id: PositionId, coset: CosetId) {
        let cursor = self.cursor_mut(id);
        cursor.current = coset;
        cursor.next = coset + 1;
        cursor.adjustment = 0;
    }

    /// Clear every cursor whose current coset is no longer live.
    pub fn forget_dead(&mut self, is_live: impl Fn(CosetId) -> bool) {
        for cursor in self.cursors.iter_mut().flatten() {
            if cursor.current != NO_COSET && !is_live(cursor.current) {
                cursor.current = NO_COSET;
            }
        }
    }

    /// Start a renumbering pass.
    pub fn begin_adjustment(&mut self) {
        self.holes = 0;
        for cursor in self.cursors.iter_mut().flatten() {
            cursor.adjustment = 0;
        }
    }

    /// Record that coset `hole` is being removed by the renumbering pass.
    /// Holes must be reported in increasing order.
    pub fn count_hole(&mut self, hole: CosetId) {
        self.holes += 1;
        for cursor in self.cursors.iter_mut().flatten() {
            if hole < cursor.next {
                cursor.adjustment += 1;
            }
            if hole == cursor.current {
                cursor.current = NO_COSET;
            }
        }
    }

    /// Finish a renumbering pass, shifting every cursor down past the holes
    /// beneath it. Returns the number of holes removed.
    pub fn end_adjustment(&mut self) -> CosetId {
        for cursor in self.cursors.iter_mut().flatten() {
            if cursor.current != NO_COSET {
                cursor.current -= cursor.adjustment;
            }
            cursor.next -= cursor.adjustment;
            cursor.adjustment = 0;
        }
        self.last_coset -= self.holes;
        std::mem::take(&mut self.holes)
    }

    /// Drop dead cosets from the end of the sequence. Returns how many were
    /// dropped.
    pub fn trim_dead_tail(&mut self, is_live: impl Fn(CosetId) -> bool) -> CosetId {
        let mut trimmed = 0;
        while self.last_coset > 1 && !is_live(self.last_coset) {
            self.last_coset -= 1;
            trimmed += 1;
        }
        if trimmed != 0 {
            let last = self.last_coset;
            for cursor in self.cursors.iter_mut().flatten() {
                if cursor.current > last {
                    cursor.current = NO_COSET;
                }
                if cursor.next > last + 1 {
                    cursor.next = last + 1;
                }
            }
        }
        trimmed
    }
}
