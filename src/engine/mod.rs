// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The coset enumerator.
//!
//! An [`Enumerator`] owns every piece of working state for one run: the
//! table, the cursors, the deduction log, the gap queues and the counters.
//! [`Enumerator::run`] consumes it and returns either the completed
//! [`CosetTable`](crate::output::CosetTable) or an [`EnumerationError`].
//!
//! # Phases
//!
//! The run executes the phases of its [`EnumerationOptions`] in order, then
//! loops back to the loop phase until no transition is undefined. Each phase
//! is resolved into a [`PhaseMode`] when it starts. A phase either
//!
//! 1. applies relators (HLT): the scanner visits cosets in order and every
//!    relator of the phase's scan set is walked from that coset, defining
//!    new cosets wherever the walk is blocked; or
//! 2. fills rows (Felsch): the filler defines the missing transitions of one
//!    row at a time, and every edit is rescanned against the relators that
//!    start with the edited generator before the next definition is made.
//!
//! Scans that meet with unequal cosets trigger coincidence processing,
//! which merges the two cosets and everything that follows from it before
//! anything else happens.
//!
//! # Module layout
//!
//! - `define`: definitions, table growth.
//! - `scan`: the scan variants.
//! - `consequences`: draining the deduction log, full scans.
//! - `coincidence`: merging cosets.
//! - `compaction`: recovering the rows of dead cosets.
//! - `standardize`: breadth-first renumbering.
//! - `equivalent`: choosing conjugates of the relators before the run.

mod coincidence;
mod compaction;
mod consequences;
mod define;
mod equivalent;
mod scan;
mod standardize;
#[cfg(debug_assertions)]
mod validate;

use crate::deduction::DeductionLog;
use crate::error::EnumerationError;
use crate::gaps::{Candidates, GapQueue};
use crate::options::{
    CompactionMode, EnumerationOptions, FillOrder, Phase, PhaseLength, PhaseRng,
};
use crate::output::{CosetTable, Enumeration};
use crate::positions::{PositionId, PositionRegistry};
use crate::presentation::Presentation;
use crate::relators::{RelatorSetKind, RelatorUniverse};
use crate::state::{CosetCounts, Counters, Statistics};
use crate::table::{CosetId, WorkingTable, NO_COSET};
use crate::word::{Alphabet, Generator, Word};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Most cells the table may ever hold.
const MAX_CELLS: usize = 1 << 31;

/// Rows allocated up front when the table may grow freely.
const INITIAL_ROWS: usize = 1 << 14;

/// Above this many rows the table grows by an eighth at a time, and an
/// unlimited look-ahead phase gives way to the next phase.
const LARGE_TABLE: usize = 8 << 20;

/// Rows processed between progress traces.
const PROGRESS_INTERVAL: u64 = 4096;

/// Outcome of walking one relator from one coset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanResult {
    /// The starting coset is not live.
    NoCoset,
    /// A definition was needed and the table is full.
    NoSpace,
    Incomplete,
    Complete,
    /// The walk was one step short and that step has been filled in.
    Deduction,
    /// The two ends met at different cosets, which have been merged.
    Coincidence,
}

impl ScanResult {
    /// True if the scan changed the table in a way that may invalidate
    /// later scans of the same entry.
    fn is_news(self) -> bool {
        matches!(
            self,
            ScanResult::NoCoset | ScanResult::Deduction | ScanResult::Coincidence
        )
    }
}

/// The behaviour of the current phase, with the option dependencies
/// resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PhaseMode {
    pub apply_relators: bool,
    pub check_consequences: bool,
    pub look_ahead: bool,
    pub pre_fill: bool,
    pub front_fill: bool,
    pub back_fill: bool,
    /// Fill gaps of length one found by consequence scans.
    pub gap_fill: bool,
    pub queue_gaps: bool,
    pub check_fill_factor: bool,
    pub require_low: bool,
}

impl PhaseMode {
    fn new(phase: &Phase, queued_definitions: Option<usize>) -> Self {
        let (check_consequences, look_ahead, pre_fill) = if phase.apply_relators {
            (
                phase.check_consequences,
                !phase.check_consequences && phase.look_ahead,
                phase.pre_fill,
            )
        } else {
            (true, false, false)
        };
        let gap_fill = check_consequences && phase.short_gaps && queued_definitions.is_some();
        PhaseMode {
            apply_relators: phase.apply_relators,
            check_consequences,
            look_ahead,
            pre_fill,
            front_fill: phase.fill_order == FillOrder::Front,
            back_fill: phase.fill_order == FillOrder::Back,
            gap_fill,
            queue_gaps: gap_fill
                && phase.queue_short_gaps
                && queued_definitions.is_some_and(|n| n > 0),
            check_fill_factor: gap_fill && phase.use_fill_factor,
            require_low: gap_fill && phase.require_low,
        }
    }
}

/// A single coset enumeration.
///
/// # Example
///
/// ```
/// use todd_coxeter::engine::Enumerator;
/// use todd_coxeter::options::EnumerationOptions;
/// use todd_coxeter::presentation::Presentation;
/// use todd_coxeter::word::Alphabet;
///
/// let mut alphabet = Alphabet::new();
/// alphabet.add_involution("a").unwrap();
/// alphabet.add_pair("b", "B").unwrap();
/// let s3 = Presentation::new(alphabet)
///     .with_relators(&["a^2", "b^3", "(ab)^2"])
///     .unwrap();
///
/// let enumerator = Enumerator::new(&s3, EnumerationOptions::default()).unwrap();
/// let enumeration = enumerator.run().unwrap();
/// assert_eq!(enumeration.index(), 6);
/// ```
pub struct Enumerator {
    options: EnumerationOptions,
    alphabet: Alphabet,
    inverse: Vec<Generator>,
    nr_generators: usize,
    universe: Arc<RelatorUniverse>,
    scan_sets: HashMap<RelatorSetKind, Arc<Vec<usize>>>,
    /// Non-empty subgroup generators, consumed by the first phase.
    subgroup: Vec<Word>,

    table: WorkingTable,
    positions: PositionRegistry,
    log: DeductionLog,
    gaps: GapQueue,
    candidates: Option<Candidates>,
    counts: CosetCounts,
    statistics: Statistics,
    mode: PhaseMode,

    scanner: PositionId,
    filler: PositionId,
    standardiser: Option<PositionId>,
    full_scanner: Option<PositionId>,

    compaction: CompactionMode,
    /// Column borrowed for the old to new map by special column compaction.
    ren_column: Option<Generator>,
    /// Most rows the table may have, including the sentinel.
    ceiling: usize,
    dynamic: bool,
    fill_factor: usize,

    failed: bool,
    /// No phase can make progress although transitions are undefined.
    stalled: bool,
    has_overflowed: bool,
    /// Transitions were set while consequences were not being checked.
    consequences_skipped: bool,
    log_purge_required: bool,

    merge_head: CosetId,
    merge_tail: CosetId,
    merge_queue: usize,

    rng: PhaseRng,
    abort: Option<Arc<AtomicBool>>,
}

impl Enumerator {
    /// Prepare an enumeration of the cosets of the subgroup generated by
    /// the presentation's subgroup generators.
    pub fn new(
        presentation: &Presentation,
        options: EnumerationOptions,
    ) -> Result<Self, EnumerationError> {
        options.validate()?;
        let alphabet = presentation.alphabet().clone();
        let inverse = alphabet.inverses().to_vec();
        let nr_generators = inverse.len();

        let relators = presentation.reduced_relators(options.cyclic_reduction);
        let normal = presentation.reduced_normal_subgroup(options.cyclic_reduction);
        let universe = Arc::new(RelatorUniverse::new(relators, normal, &inverse));
        let subgroup: Vec<Word> = presentation
            .subgroup_generators()
            .iter()
            .filter(|w| !w.is_empty())
            .cloned()
            .collect();

        let columns = nr_generators.max(2);
        let hard_limit = (MAX_CELLS / columns).min(u32::MAX as usize);
        let requested = match (options.max_cosets, options.work_space) {
            (Some(max_cosets), _) if max_cosets > 0 => max_cosets.saturating_add(1),
            (_, Some(work_space)) if work_space > 0 => {
                work_space / (columns * std::mem::size_of::<CosetId>())
            }
            _ => 0,
        };
        let dynamic = requested == 0;
        let ceiling = if dynamic {
            hard_limit
        } else {
            requested.clamp(2, hard_limit)
        };
        let mut initial = if dynamic { INITIAL_ROWS } else { ceiling };
        if let PhaseLength::Rows(n) | PhaseLength::Definitions(n) = options.phases[0].length {
            let n = usize::try_from(n).unwrap_or(usize::MAX).min(LARGE_TABLE);
            initial = initial.max(n);
        }
        let initial = initial.min(ceiling);

        let mut compaction = options.compaction;
        let ren_column = (0..nr_generators).find(|&g| inverse[g] != g);
        if compaction == CompactionMode::SpecialColumn && ren_column.is_none() {
            warn!("every generator is an involution; special column compaction falls back to discard");
            compaction = CompactionMode::Discard;
        }

        let fill_factor = if options.fill_factor == 0 {
            5 * (nr_generators + 2) / 4
        } else {
            options.fill_factor
        };

        let table = WorkingTable::new(nr_generators, initial).map_err(|e| {
            warn!(rows = initial, error = %e, "cannot allocate the initial coset table");
            EnumerationError::CapacityExhausted {
                live: 0,
                ceiling: initial - 1,
            }
        })?;
        let mut positions = PositionRegistry::new();
        positions.set_capacity(initial);
        let scanner = positions.create();
        let filler = positions.create();

        let mut enumerator = Enumerator {
            gaps: GapQueue::new(options.queued_definitions.unwrap_or(0)),
            options,
            alphabet,
            inverse,
            nr_generators,
            universe,
            scan_sets: HashMap::new(),
            subgroup,
            table,
            positions,
            log: DeductionLog::new(),
            candidates: None,
            counts: CosetCounts::initial(nr_generators),
            statistics: Statistics::new(),
            mode: PhaseMode::default(),
            scanner,
            filler,
            standardiser: None,
            full_scanner: None,
            compaction,
            ren_column,
            ceiling,
            dynamic,
            fill_factor,
            failed: false,
            stalled: false,
            has_overflowed: false,
            consequences_skipped: false,
            log_purge_required: false,
            merge_head: NO_COSET,
            merge_tail: NO_COSET,
            merge_queue: 0,
            rng: PhaseRng::default(),
            abort: None,
        };
        enumerator.reset_table();
        enumerator.equivalent_presentation();
        Ok(enumerator)
    }

    /// Poll `flag` between rows; once it is set the run stops with
    /// [`EnumerationError::Aborted`].
    pub fn with_abort_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    /// Run the enumeration to completion or failure.
    pub fn run(mut self) -> Result<Enumeration, EnumerationError> {
        info!(
            generators = self.nr_generators,
            conjugates = self.universe.count(),
            subgroup_generators = self.subgroup.len(),
            "starting coset enumeration"
        );
        let subgroup = std::mem::take(&mut self.subgroup);
        self.do_phase(0, Some(&subgroup))?;
        let mut phase = 0;
        while self.counts.undefined != 0 && !self.failed {
            phase += 1;
            if phase == self.options.phases.len() {
                match self.options.loop_phase {
                    Some(loop_phase) => phase = loop_phase,
                    None => break,
                }
            }
            self.do_phase(phase, None)?;
        }

        if self.failed || self.counts.undefined != 0 {
            let error = if self.failed && !self.stalled {
                EnumerationError::CapacityExhausted {
                    live: self.counts.live,
                    ceiling: self.ceiling - 1,
                }
            } else {
                EnumerationError::StrategyExhausted
            };
            info!(%error, total = self.counts.total, "enumeration failed");
            return Err(error);
        }
        self.complete()
    }

    /// Put the table back to a single coset with nothing defined.
    fn reset_table(&mut self) {
        self.positions.reset();
        self.log.start_full_scan();
        self.gaps.clear();
        self.candidates = None;
        self.failed = false;
        self.stalled = false;
        self.has_overflowed = false;
        self.consequences_skipped = false;
        self.log_purge_required = false;
        self.counts = CosetCounts::initial(self.nr_generators);
        self.statistics = Statistics::new();
        self.statistics.increment(Counters::CosetsDefined);

        let first = self.positions.add_coset();
        debug_assert_eq!(first, Some(1));
        self.table.reset_row(1);

        self.scanner = self.positions.create();
        self.filler = self.positions.create();
        self.standardiser = if self.options.build_standardised {
            let standardiser = self.positions.create();
            self.positions.advance(standardiser);
            Some(standardiser)
        } else {
            None
        };
        self.full_scanner = None;
    }

    /// Resize the table and tell the cursors. False, with nothing changed,
    /// if the memory cannot be allocated.
    fn set_capacity(&mut self, rows: usize) -> bool {
        if let Err(e) = self.table.set_capacity(rows) {
            warn!(rows, error = %e, "cannot grow the coset table");
            return false;
        }
        self.positions.set_capacity(rows);
        true
    }

    fn poll_abort(&self) -> Result<(), EnumerationError> {
        match &self.abort {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(EnumerationError::Aborted),
            _ => Ok(()),
        }
    }

    /// The scan set of an HLT phase.
    fn scan_set(&mut self, phase: &Phase) -> Arc<Vec<usize>> {
        let permute_normal = phase.permute_normal && self.universe.has_normal_subgroup();
        if !phase.permute_relators && !permute_normal {
            return Arc::new(self.universe.base_set().to_vec());
        }
        let kind = RelatorSetKind {
            order: phase.conjugate_order,
            permute_relators: phase.permute_relators,
            permute_normal,
        };
        let universe = &self.universe;
        Arc::clone(
            self.scan_sets
                .entry(kind)
                .or_insert_with(|| Arc::new(universe.relator_set(kind))),
        )
    }

    fn do_phase(
        &mut self,
        index: usize,
        subgroup: Option<&[Word]>,
    ) -> Result<(), EnumerationError> {
        let phase = self.options.phases[index].resolve(&mut self.rng);
        self.statistics.increment(Counters::PhasesRun);
        self.mode = PhaseMode::new(&phase, self.options.queued_definitions);
        debug!(
            phase = index,
            apply_relators = phase.apply_relators,
            check_consequences = self.mode.check_consequences,
            look_ahead = self.mode.look_ahead,
            fill_order = %phase.fill_order,
            length = ?phase.length,
            "starting phase"
        );
        if !self.mode.apply_relators && self.consequences_skipped {
            self.schedule_full_scan();
        }

        let want_candidates = self.mode.check_consequences && phase.best_candidates;
        if !want_candidates {
            if let Some(mut candidates) = self.candidates.take() {
                candidates.release_all(&mut self.positions);
            }
        } else if self.candidates.is_none() {
            self.candidates = Some(Candidates::new(self.universe.count()));
        }
        self.has_overflowed = false;

        let scan_set = self.mode.apply_relators.then(|| self.scan_set(&phase));
        let start_total = self.counts.total;
        let mut rows_left = match phase.length {
            PhaseLength::Rows(n) => n,
            _ => 0,
        };

        if let Some(subgroup) = subgroup {
            self.positions.advance(self.scanner);
            for word in subgroup {
                self.scan_and_fill(self.scanner, word);
                if self.log.has_work() {
                    self.seek_consequences();
                }
            }
        } else if self.log.has_work() {
            self.seek_consequences();
        }

        let mut steps: u64 = 0;
        while self.counts.undefined != 0 && !self.failed {
            self.poll_abort()?;
            match &scan_set {
                Some(set) => self.scan_row(set),
                None => {
                    if !self.fill_row() {
                        self.stall();
                    }
                }
            }
            steps += 1;
            if steps % PROGRESS_INTERVAL == 0 {
                self.trace_progress();
            }

            match phase.length {
                PhaseLength::Rows(_) => {
                    rows_left -= 1;
                    if rows_left == 0 {
                        break;
                    }
                }
                PhaseLength::Definitions(n) => {
                    if self.counts.total - start_total >= n {
                        break;
                    }
                }
                PhaseLength::Unlimited => {
                    if self.has_overflowed
                        && self.mode.look_ahead
                        && self.options.phases.len() != 1
                    {
                        break;
                    }
                }
            }
        }

        if self.failed
            && self.has_overflowed
            && self.mode.look_ahead
            && phase.length == PhaseLength::Unlimited
            && self.options.phases.len() != 1
        {
            debug!(phase = index, "look-ahead phase overflowed; moving on");
            self.failed = false;
        }
        if self.mode.look_ahead && !self.failed && self.counts.undefined != 0 {
            self.schedule_full_scan();
        }
        Ok(())
    }

    /// Apply every relator of `set` at the scanner's next coset.
    fn scan_row(&mut self, set: &[usize]) {
        let ci = self.positions.advance(self.scanner);
        if ci == NO_COSET {
            // Every row has been scanned yet some transitions are missing,
            // e.g. for a generator that occurs in no relator.
            if !self.fill_row() {
                self.stall();
            }
            return;
        }
        if self.mode.pre_fill && ci >= self.positions.next(self.filler) {
            self.fill_row();
        }
        let universe = Arc::clone(&self.universe);
        for &r in set {
            let result = self.scan_and_fill(self.scanner, universe.relator(r));
            if result == ScanResult::NoCoset || self.failed {
                break;
            }
        }
        if self.positions.current(self.scanner) >= self.positions.next(self.filler) {
            self.fill_row();
        }
        self.positions.end_current(self.scanner);
        self.statistics.increment(Counters::RowsScanned);
    }

    /// Define every missing transition of the filler's next row. Returns
    /// false if there is no row left to fill.
    fn fill_row(&mut self) -> bool {
        if self.failed {
            return true;
        }
        if self.positions.advance(self.filler) == NO_COSET {
            return false;
        }
        self.ensure_space(self.nr_generators);

        match self.standardiser {
            Some(standardiser) => self.fill_row_standardised(standardiser),
            None => {
                for g in 0..self.nr_generators {
                    if self.ensure_defined(self.filler, g).is_none() {
                        break;
                    }
                    if self.log.has_work() {
                        self.seek_consequences();
                    }
                }
            }
        }
        if self.failed {
            // leave the filler on the incomplete row
            return true;
        }

        self.scan_candidate();
        self.positions.end_current(self.filler);
        self.statistics.increment(Counters::RowsFilled);
        true
    }

    /// Fill the filler's row, moving each new coset into the next
    /// breadth-first slot as it is defined.
    fn fill_row_standardised(&mut self, standardiser: PositionId) {
        for g in 0..self.nr_generators {
            let Some(mut nci) = self.ensure_defined(self.filler, g) else {
                break;
            };
            if self.log.has_work() {
                self.seek_consequences();
                let ci = self.positions.current(self.filler);
                nci = if ci == NO_COSET {
                    NO_COSET
                } else {
                    self.table.action(ci, g)
                };
            }
            if nci != NO_COSET && nci >= self.positions.next(standardiser) {
                self.positions.end_current(standardiser);
                let bfs_ci = self.positions.advance(standardiser);
                if bfs_ci != NO_COSET && bfs_ci != nci {
                    self.exchange(bfs_ci, nci);
                    if let Some(candidates) = self.candidates.as_mut() {
                        candidates.exchange(&mut self.positions, nci, bfs_ci);
                    }
                }
            }
        }
    }

    /// Complete the next best candidate relator, if any.
    fn scan_candidate(&mut self) {
        let Some(candidates) = self.candidates.as_mut() else {
            return;
        };
        if candidates.is_exhausted() {
            return;
        }
        let Some((relator, position)) = candidates.take_next() else {
            return;
        };
        if self.positions.current(position) != NO_COSET {
            let universe = Arc::clone(&self.universe);
            self.scan_and_fill(position, universe.relator(relator));
            self.statistics.increment(Counters::CandidatesScanned);
            if let Some(candidates) = self.candidates.as_mut() {
                candidates.step();
            }
        }
        self.positions.release(position);
    }

    fn stall(&mut self) {
        warn!(
            undefined = self.counts.undefined,
            "no row left to process; giving up"
        );
        self.failed = true;
        self.stalled = true;
    }

    fn trace_progress(&self) {
        trace!(
            live = self.counts.live,
            max_live = self.counts.max_live,
            last = self.positions.last_coset(),
            total = self.counts.total,
            undefined = self.counts.undefined,
            coincidences = self.statistics.get(Counters::Coincidences),
            log = self.log.len(),
            gaps = self.gaps.len(),
            "progress"
        );
    }

    /// Tidy up a successful run and build the output table.
    fn complete(mut self) -> Result<Enumeration, EnumerationError> {
        if self.consequences_skipped {
            self.finish();
        }
        self.log.start_full_scan();
        self.gaps.clear();
        if let Some(mut candidates) = self.candidates.take() {
            candidates.release_all(&mut self.positions);
        }
        if self.options.standardize {
            self.standardize()?;
        } else if self.counts.live != self.positions.last_coset() as usize {
            self.compress();
        }

        self.statistics
            .record_max(Counters::MaxLiveCosets, self.counts.max_live as u64);
        self.statistics
            .record_max(Counters::MaxDeductionLog, self.log.longest() as u64);
        let table = CosetTable::from_working(
            &self.alphabet,
            &self.table,
            self.positions.last_coset(),
            self.options.standardize,
        );
        info!(
            index = table.index(),
            total = self.counts.total,
            max_live = self.counts.max_live,
            "enumeration complete"
        );
        Ok(Enumeration {
            table,
            statistics: self.statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Strategy;

    fn s3() -> Presentation {
        let mut alphabet = Alphabet::new();
        alphabet.add_involution("a").unwrap();
        alphabet.add_pair("b", "B").unwrap();
        Presentation::new(alphabet)
            .with_relators(&["a^2", "b^3", "(ab)^2"])
            .unwrap()
    }

    #[test]
    fn test_phase_mode_for_felsch() {
        let mode = PhaseMode::new(&Phase::long(), Some(10));
        assert!(!mode.apply_relators);
        assert!(mode.check_consequences && mode.gap_fill && mode.queue_gaps);
        assert!(!mode.front_fill && !mode.back_fill);

        let unqueued = PhaseMode::new(&Phase::long(), Some(0));
        assert!(unqueued.gap_fill && !unqueued.queue_gaps);
        let disabled = PhaseMode::new(&Phase::long(), None);
        assert!(!disabled.gap_fill);
    }

    #[test]
    fn test_phase_mode_look_ahead_needs_unchecked_hlt() {
        let mode = PhaseMode::new(&Phase::hlt(FillOrder::Back).with_look_ahead(), Some(10));
        assert!(mode.look_ahead && mode.back_fill && !mode.check_consequences);
        let checked = Phase::hlt(FillOrder::Back)
            .with_look_ahead()
            .with_consequences();
        assert!(!PhaseMode::new(&checked, Some(10)).look_ahead);
    }

    #[test]
    fn test_capacity_from_max_cosets() {
        let options = EnumerationOptions::default().with_max_cosets(100);
        let enumerator = Enumerator::new(&s3(), options).unwrap();
        assert_eq!(enumerator.ceiling, 101);
        assert!(!enumerator.dynamic);
        assert_eq!(enumerator.table.capacity(), 101);
    }

    #[test]
    fn test_dynamic_capacity() {
        let enumerator = Enumerator::new(&s3(), EnumerationOptions::default()).unwrap();
        assert!(enumerator.dynamic);
        assert_eq!(enumerator.table.capacity(), INITIAL_ROWS);
        assert_eq!(enumerator.fill_factor, 6);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let mut options = EnumerationOptions::default();
        options.loop_phase = Some(7);
        assert!(matches!(
            Enumerator::new(&s3(), options),
            Err(EnumerationError::Options(_))
        ));
    }

    #[test]
    fn test_fresh_table_has_one_coset() {
        let enumerator =
            Enumerator::new(&s3(), EnumerationOptions::with_strategy(Strategy::Sims2)).unwrap();
        assert_eq!(enumerator.positions.last_coset(), 1);
        assert_eq!(enumerator.counts, CosetCounts::initial(3));
        assert!(enumerator.standardiser.is_some());
    }

    #[test]
    fn test_abort_flag_stops_run() {
        let flag = Arc::new(AtomicBool::new(true));
        let enumerator = Enumerator::new(&s3(), EnumerationOptions::default())
            .unwrap()
            .with_abort_flag(flag);
        assert_eq!(enumerator.run().unwrap_err(), EnumerationError::Aborted);
    }

    #[test]
    fn test_run_s3() {
        let enumeration = Enumerator::new(&s3(), EnumerationOptions::default())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(enumeration.index(), 6);
        assert!(enumeration.statistics.get(Counters::PhasesRun) >= 1);
    }
}
