// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration options and strategies.
//!
//! An enumeration runs a list of up to [`MAX_PHASES`] [`Phase`]s, each of
//! which says how rows are processed (relator application "HLT" style, or
//! row filling "Felsch" style), which heuristics are active, and how long the
//! phase lasts. When the last phase finishes the run continues from
//! [`EnumerationOptions::loop_phase`], or stops if there is none.
//!
//! Options can be built in code, loaded from JSON through serde, set from a
//! named [`Strategy`], or set from a strategy string such as
//! `"sims:1/a"` or `"/mcpb:1r/bsx"` (see [`EnumerationOptions::from_strategy_str`]).

mod strategy;
mod strategy_string;

pub use strategy::Strategy;

use crate::presentation::CyclicReduction;
use crate::relators::ConjugateOrder;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Most phases a strategy may have.
pub const MAX_PHASES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("unknown strategy name '{0}'")]
    UnknownStrategy(String),

    #[error("unrecognised letter '{letter}' at offset {offset} in strategy string")]
    UnknownPhaseLetter { letter: char, offset: usize },

    #[error("invalid length for phase {phase} in strategy string")]
    InvalidPhaseLength { phase: usize },

    #[error("length of phase {phase} is too large")]
    PhaseLengthTooLarge { phase: usize },

    #[error("a strategy may have at most {MAX_PHASES} phases")]
    TooManyPhases,

    #[error("a strategy needs at least one phase")]
    NoPhases,

    #[error("loop phase {loop_phase} does not exist (there are {nr_phases} phases)")]
    LoopPhaseOutOfRange { loop_phase: usize, nr_phases: usize },

    #[error("max hole percentage {0} exceeds 100")]
    HolePercentage(u32),
}

/// Which end of an incomplete scan receives new coset definitions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FillOrder {
    /// Always define at the front of the gap (Sims' book).
    #[default]
    Front,
    /// Always define at the back of the gap (ACE).
    Back,
    /// Define from whichever end is at the lower coset.
    Balanced,
}

/// How a phase is modified each time it starts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Variation {
    #[default]
    Fixed,
    /// Randomly toggle the ordering, fill and short-gap options.
    Vary,
    /// Replace the phase with random options, always checking consequences.
    Random,
}

/// How long a phase lasts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseLength {
    /// Until the enumeration completes, or, for a look-ahead phase that is
    /// not the only phase, until the table overflows.
    #[default]
    Unlimited,
    /// A number of rows processed.
    Rows(u64),
    /// A number of new cosets defined.
    Definitions(u64),
}

/// What to do with pending deductions and queued gaps when dead cosets are
/// squeezed out of the table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompactionMode {
    /// Drop them and schedule a full scan.
    #[default]
    Discard,
    /// Renumber them through a generator column, keeping their order.
    SpecialColumn,
    /// Tag their cells and rebuild them in coset, then generator, order.
    RebuildByRow,
    /// Tag their cells and rebuild them in generator, then coset, order.
    RebuildByColumn,
}

/// Further rewriting of the relators before enumeration starts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquivalentPresentation {
    #[default]
    AsIs,
    /// Pick, relator by relator, the conjugate needing fewest new cosets at
    /// coset 1.
    FewestDefinitions,
    /// Pick the conjugate needing the most new cosets at coset 1.
    MostDefinitions,
    /// Reverse the order of the relators.
    Reverse,
    ReverseFewestDefinitions,
    ReverseMostDefinitions,
}

impl EquivalentPresentation {
    pub fn reverses(self) -> bool {
        matches!(
            self,
            EquivalentPresentation::Reverse
                | EquivalentPresentation::ReverseFewestDefinitions
                | EquivalentPresentation::ReverseMostDefinitions
        )
    }

    /// `Some(true)` to maximise definitions, `Some(false)` to minimise.
    pub fn conjugate_choice(self) -> Option<bool> {
        match self {
            EquivalentPresentation::FewestDefinitions
            | EquivalentPresentation::ReverseFewestDefinitions => Some(false),
            EquivalentPresentation::MostDefinitions
            | EquivalentPresentation::ReverseMostDefinitions => Some(true),
            _ => None,
        }
    }
}

/// One phase of a strategy.
///
/// A phase with `apply_relators` processes rows HLT style: every relator of
/// the selected scan set is applied at the scanned coset, defining cosets
/// as needed. Otherwise rows are filled Felsch style, one generator at a
/// time, and consequences are always checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phase {
    pub apply_relators: bool,
    /// Apply every cyclic conjugate of the relators.
    pub permute_relators: bool,
    /// Apply every cyclic conjugate of the normal subgroup generators.
    pub permute_normal: bool,
    pub conjugate_order: ConjugateOrder,
    pub check_consequences: bool,
    /// Run a full scan instead of failing when an HLT phase overflows.
    pub look_ahead: bool,
    /// Fill the scanned row before applying relators.
    pub pre_fill: bool,
    pub fill_order: FillOrder,
    /// Fill gaps of length one found by consequence scans.
    pub short_gaps: bool,
    /// Queue short gap definitions until the deduction log is empty.
    pub queue_short_gaps: bool,
    /// Throttle short gap filling by the fill factor.
    pub use_fill_factor: bool,
    /// Only fill short gaps whose scan passes through a completed row.
    pub require_low: bool,
    /// Complete one relator per filled row at its best candidate coset.
    pub best_candidates: bool,
    pub length: PhaseLength,
    pub variation: Variation,
}

const APPLY_RELATORS: u32 = 1;
const PRE_FILL: u32 = 2;
const BALANCE_SCAN: u32 = 4;
const BACK_SCAN: u32 = 8;
const CHECK_CONSEQUENCES: u32 = 16;
const PERMUTE_RELATORS: u32 = 32;
const PERMUTE_NORMAL: u32 = 64;
const ORDER_BY_POSITION: u32 = 128;
const ORDER_SORTED: u32 = 256;
const SHORT_GAPS: u32 = 512;
const USE_FILL_FACTOR: u32 = 1024;
const REQUIRE_LOW: u32 = 2048;
const QUEUE_SHORT_GAPS: u32 = 4096;
const BEST_CANDIDATES: u32 = 8192;
/// One past the highest bit touched by [`Variation`].
const VARIABLE_BITS: u32 = 16384;

impl Phase {
    /// HLT: apply relators at each row, defining cosets as needed.
    pub fn hlt(fill_order: FillOrder) -> Self {
        Phase {
            apply_relators: true,
            fill_order,
            ..Phase::default()
        }
    }

    /// Felsch: fill rows in order, checking consequences of every edit.
    pub fn felsch(fill_order: FillOrder) -> Self {
        Phase {
            check_consequences: true,
            fill_order,
            ..Phase::default()
        }
    }

    pub fn with_length(mut self, length: PhaseLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_look_ahead(mut self) -> Self {
        self.look_ahead = true;
        self
    }

    pub fn with_consequences(mut self) -> Self {
        self.check_consequences = true;
        self
    }

    pub fn with_permuted_relators(mut self) -> Self {
        self.apply_relators = true;
        self.permute_relators = true;
        self.permute_normal = true;
        self
    }

    /// Queued short gaps plus best candidates, balanced fill.
    pub fn long() -> Self {
        Phase {
            check_consequences: true,
            best_candidates: true,
            short_gaps: true,
            queue_short_gaps: true,
            fill_order: FillOrder::Balanced,
            ..Phase::default()
        }
    }

    /// Short gaps throttled by the fill factor, queued, back fill.
    pub fn with_ace_gaps(mut self) -> Self {
        self.short_gaps = true;
        self.use_fill_factor = true;
        self.queue_short_gaps = true;
        self.fill_order = FillOrder::Back;
        self
    }

    fn flag_bits(&self) -> u32 {
        let flags = [
            (self.apply_relators, APPLY_RELATORS),
            (self.pre_fill, PRE_FILL),
            (self.fill_order == FillOrder::Balanced, BALANCE_SCAN),
            (self.fill_order == FillOrder::Back, BACK_SCAN),
            (self.check_consequences, CHECK_CONSEQUENCES),
            (self.permute_relators, PERMUTE_RELATORS),
            (self.permute_normal, PERMUTE_NORMAL),
            (
                self.conjugate_order == ConjugateOrder::ByPosition,
                ORDER_BY_POSITION,
            ),
            (self.conjugate_order == ConjugateOrder::Sorted, ORDER_SORTED),
            (self.short_gaps, SHORT_GAPS),
            (self.use_fill_factor, USE_FILL_FACTOR),
            (self.require_low, REQUIRE_LOW),
            (self.queue_short_gaps, QUEUE_SHORT_GAPS),
            (self.best_candidates, BEST_CANDIDATES),
        ];
        flags
            .iter()
            .filter(|(on, _)| *on)
            .fold(0, |bits, (_, bit)| bits | bit)
    }

    fn with_flag_bits(&self, bits: u32) -> Phase {
        let on = |bit: u32| bits & bit != 0;
        Phase {
            apply_relators: on(APPLY_RELATORS),
            pre_fill: on(PRE_FILL),
            fill_order: if on(BALANCE_SCAN) {
                FillOrder::Balanced
            } else if on(BACK_SCAN) {
                FillOrder::Back
            } else {
                FillOrder::Front
            },
            check_consequences: on(CHECK_CONSEQUENCES),
            permute_relators: on(PERMUTE_RELATORS),
            permute_normal: on(PERMUTE_NORMAL),
            conjugate_order: if on(ORDER_SORTED) {
                ConjugateOrder::Sorted
            } else if on(ORDER_BY_POSITION) {
                ConjugateOrder::ByPosition
            } else {
                ConjugateOrder::ByRelator
            },
            short_gaps: on(SHORT_GAPS),
            use_fill_factor: on(USE_FILL_FACTOR),
            require_low: on(REQUIRE_LOW),
            queue_short_gaps: on(QUEUE_SHORT_GAPS),
            best_candidates: on(BEST_CANDIDATES),
            look_ahead: self.look_ahead,
            length: self.length,
            variation: Variation::Fixed,
        }
    }

    /// The phase actually run, after applying its [`Variation`].
    pub(crate) fn resolve(&self, rng: &mut PhaseRng) -> Phase {
        match self.variation {
            Variation::Fixed => *self,
            Variation::Random => {
                let mut phase =
                    self.with_flag_bits(rng.below(VARIABLE_BITS) | CHECK_CONSEQUENCES);
                phase.look_ahead = false;
                phase
            }
            Variation::Vary => {
                let fixed = APPLY_RELATORS
                    | CHECK_CONSEQUENCES
                    | PERMUTE_RELATORS
                    | PERMUTE_NORMAL
                    | SHORT_GAPS
                    | BEST_CANDIDATES;
                let toggled = rng.below(VARIABLE_BITS) & !fixed;
                self.with_flag_bits(self.flag_bits() ^ toggled)
            }
        }
    }
}

/// The BCPL linear congruential generator, seeded with zero at the start of
/// every enumeration so that runs are reproducible.
#[derive(Debug, Default)]
pub(crate) struct PhaseRng {
    seed: u32,
}

impl PhaseRng {
    pub(crate) fn below(&mut self, limit: u32) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(2_147_001_325)
            .wrapping_add(715_136_305);
        (self.seed >> 3) % limit
    }
}

/// Everything that controls an enumeration apart from the presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationOptions {
    /// Most cosets the table may hold at once. `None` lets the table grow
    /// until `work_space` or the hard limit is reached.
    pub max_cosets: Option<usize>,
    /// Most bytes the table may occupy, used when `max_cosets` is not set.
    pub work_space: Option<usize>,
    pub phases: Vec<Phase>,
    /// Phase to return to after the last one; `None` stops instead.
    pub loop_phase: Option<usize>,
    /// Short gaps are only filled (when throttled) while
    /// `filled rows * fill_factor > live cosets`. Zero selects
    /// `5 * (generators + 2) / 4`.
    pub fill_factor: usize,
    /// Capacity of the short gap queue. `None` disables short gap filling
    /// entirely; `Some(0)` fills gaps at once even in queued phases.
    pub queued_definitions: Option<usize>,
    pub cyclic_reduction: CyclicReduction,
    pub equivalent_presentation: EquivalentPresentation,
    pub compaction: CompactionMode,
    /// Compact once dead cosets exceed this percentage of the table; 100
    /// disables space recovery altogether.
    pub max_hole_percentage: u32,
    /// Never compact while there are this many dead cosets or fewer.
    pub allow_holes: usize,
    /// Keep the table in breadth-first order while rows are filled.
    pub build_standardised: bool,
    /// Standardize the completed table.
    pub standardize: bool,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        EnumerationOptions::with_strategy(Strategy::Default)
    }
}

impl EnumerationOptions {
    pub fn new() -> Self {
        EnumerationOptions::default()
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        let mut options = EnumerationOptions {
            max_cosets: None,
            work_space: None,
            phases: Vec::new(),
            loop_phase: None,
            fill_factor: 0,
            queued_definitions: Some(4096),
            cyclic_reduction: CyclicReduction::LeastRelator,
            equivalent_presentation: EquivalentPresentation::AsIs,
            compaction: CompactionMode::Discard,
            max_hole_percentage: 30,
            allow_holes: 10000,
            build_standardised: false,
            standardize: true,
        };
        options.set_strategy(strategy);
        options
    }

    /// Replace the phases and the strategy-dependent settings with those of
    /// a named strategy. Coset limits and preprocessing modes are kept.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.max_hole_percentage = 30;
        self.fill_factor = 0;
        self.compaction = CompactionMode::Discard;
        self.build_standardised = false;
        self.loop_phase = None;
        strategy.configure(self);
    }

    /// Options from a strategy string: an optional strategy name followed by
    /// `/`-separated phase descriptors.
    pub fn from_strategy_str(text: &str) -> Result<Self, OptionsError> {
        let mut options = EnumerationOptions::default();
        options.apply_strategy_str(text)?;
        Ok(options)
    }

    /// Apply a strategy string to these options.
    pub fn apply_strategy_str(&mut self, text: &str) -> Result<(), OptionsError> {
        strategy_string::apply(self, text)?;
        self.validate()
    }

    pub fn with_max_cosets(mut self, max_cosets: usize) -> Self {
        self.max_cosets = Some(max_cosets);
        self
    }

    pub fn with_compaction(mut self, compaction: CompactionMode) -> Self {
        self.compaction = compaction;
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.phases.is_empty() {
            return Err(OptionsError::NoPhases);
        }
        if self.phases.len() > MAX_PHASES {
            return Err(OptionsError::TooManyPhases);
        }
        if let Some(loop_phase) = self.loop_phase {
            if loop_phase >= self.phases.len() {
                return Err(OptionsError::LoopPhaseOutOfRange {
                    loop_phase,
                    nr_phases: self.phases.len(),
                });
            }
        }
        if self.max_hole_percentage > 100 {
            return Err(OptionsError::HolePercentage(self.max_hole_percentage));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EnumerationOptions::default();
        assert_eq!(options.phases.len(), 3);
        assert_eq!(options.loop_phase, Some(1));
        assert_eq!(options.compaction, CompactionMode::RebuildByRow);
        assert_eq!(options.queued_definitions, Some(4096));
        assert!(options.phases[0].look_ahead);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_flag_bits_survive_a_round_trip() {
        let phase = Phase::long().with_permuted_relators();
        let rebuilt = phase.with_flag_bits(phase.flag_bits());
        assert_eq!(rebuilt, phase);
    }

    #[test]
    fn test_random_phase_checks_consequences() {
        let mut rng = PhaseRng::default();
        let phase = Phase {
            variation: Variation::Random,
            length: PhaseLength::Rows(10),
            ..Phase::default()
        };
        for _ in 0..20 {
            let resolved = phase.resolve(&mut rng);
            assert!(resolved.check_consequences);
            assert!(!resolved.look_ahead);
            assert_eq!(resolved.length, PhaseLength::Rows(10));
            assert_eq!(resolved.variation, Variation::Fixed);
        }
    }

    #[test]
    fn test_vary_keeps_core_flags() {
        let mut rng = PhaseRng::default();
        let phase = Phase {
            variation: Variation::Vary,
            ..Phase::long()
        };
        for _ in 0..20 {
            let resolved = phase.resolve(&mut rng);
            assert!(resolved.check_consequences);
            assert!(resolved.best_candidates);
            assert!(resolved.short_gaps);
            assert!(!resolved.apply_relators);
        }
    }

    #[test]
    fn test_validation() {
        let mut options = EnumerationOptions::default();
        options.loop_phase = Some(5);
        assert!(matches!(
            options.validate(),
            Err(OptionsError::LoopPhaseOutOfRange { .. })
        ));
        options.loop_phase = None;
        options.max_hole_percentage = 101;
        assert_eq!(options.validate(), Err(OptionsError::HolePercentage(101)));
        options.max_hole_percentage = 30;
        options.phases.clear();
        assert_eq!(options.validate(), Err(OptionsError::NoPhases));
    }

    #[test]
    fn test_options_json() {
        let json = r#"{"max_cosets": 1000, "compaction": "special_column",
                       "phases": [{"check_consequences": true, "length": {"definitions": 50}}]}"#;
        let options: EnumerationOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.max_cosets, Some(1000));
        assert_eq!(options.compaction, CompactionMode::SpecialColumn);
        assert_eq!(options.phases.len(), 1);
        assert_eq!(options.phases[0].length, PhaseLength::Definitions(50));
        assert_eq!(options.queued_definitions, Some(4096));
    }
}
