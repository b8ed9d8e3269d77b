// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Named strategies.
//!
//! The `sims:N` strategies follow the numbering of Sims' book: odd numbers
//! build the table in any order, the following even number builds it in
//! standardized order. `def`, `easy`, `fel:0`, `fel:1`, `hard`, `hlt` and
//! `pure_c` imitate the strategies of the same names in ACE.

use super::{CompactionMode, EnumerationOptions, FillOrder, Phase, PhaseLength, Variation};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Strategy {
    /// Look-ahead HLT, then alternating long Felsch and HLT+deduction phases.
    #[default]
    #[strum(serialize = "default")]
    #[serde(rename = "default")]
    Default,
    #[strum(serialize = "sims:1")]
    #[serde(rename = "sims:1")]
    Sims1,
    #[strum(serialize = "sims:2")]
    #[serde(rename = "sims:2")]
    Sims2,
    #[strum(serialize = "sims:3")]
    #[serde(rename = "sims:3")]
    Sims3,
    #[strum(serialize = "sims:4")]
    #[serde(rename = "sims:4")]
    Sims4,
    #[strum(serialize = "sims:5")]
    #[serde(rename = "sims:5")]
    Sims5,
    #[strum(serialize = "sims:6")]
    #[serde(rename = "sims:6")]
    Sims6,
    #[strum(serialize = "sims:7")]
    #[serde(rename = "sims:7")]
    Sims7,
    #[strum(serialize = "sims:8")]
    #[serde(rename = "sims:8")]
    Sims8,
    #[strum(serialize = "sims:9")]
    #[serde(rename = "sims:9")]
    Sims9,
    #[strum(serialize = "sims:10")]
    #[serde(rename = "sims:10")]
    Sims10,
    #[strum(serialize = "def")]
    #[serde(rename = "def")]
    AceDefault,
    #[strum(serialize = "easy")]
    #[serde(rename = "easy")]
    AceEasy,
    #[strum(serialize = "fel:0")]
    #[serde(rename = "fel:0")]
    AceFelsch0,
    #[strum(serialize = "fel:1")]
    #[serde(rename = "fel:1")]
    AceFelsch1,
    #[strum(serialize = "hard")]
    #[serde(rename = "hard")]
    AceHard,
    #[strum(serialize = "hlt")]
    #[serde(rename = "hlt")]
    HltLookahead,
    #[strum(serialize = "pure_c")]
    #[serde(rename = "pure_c")]
    AcePureC,
    #[strum(serialize = "long")]
    #[serde(rename = "long")]
    Long,
    #[strum(serialize = "lucky")]
    #[serde(rename = "lucky")]
    Lucky,
}

impl Strategy {
    /// Set the phases, loop and strategy-specific settings.
    pub(super) fn configure(self, options: &mut EnumerationOptions) {
        use PhaseLength::{Definitions, Rows};

        let hlt = Phase::hlt(FillOrder::Front);
        let hlt_ace = Phase::hlt(FillOrder::Back);
        let hlt_maf = Phase::hlt(FillOrder::Balanced);
        let felsch = Phase::felsch(FillOrder::Front);
        let felsch_ace = Phase::felsch(FillOrder::Back);

        options.phases = match self {
            Strategy::Default => {
                options.compaction = CompactionMode::RebuildByRow;
                options.loop_phase = Some(1);
                let long_hlt = Phase {
                    apply_relators: true,
                    ..Phase::long()
                };
                vec![
                    hlt_maf.with_look_ahead(),
                    Phase::long().with_length(Definitions(8000)),
                    long_hlt.with_length(Definitions(2000)),
                ]
            }
            Strategy::AceDefault => {
                options.loop_phase = Some(1);
                vec![
                    hlt.with_look_ahead(),
                    felsch.with_ace_gaps().with_length(Definitions(1000)),
                    hlt_ace.with_consequences().with_length(Rows(1)),
                ]
            }
            Strategy::AceHard => {
                options.loop_phase = Some(0);
                vec![
                    hlt_ace.with_consequences().with_length(Rows(1)),
                    felsch.with_ace_gaps().with_length(Definitions(1000)),
                ]
            }
            Strategy::AceEasy => {
                options.max_hole_percentage = 100;
                vec![hlt_ace]
            }
            Strategy::HltLookahead => vec![hlt_ace.with_look_ahead()],
            Strategy::Sims1 | Strategy::Sims2 => vec![hlt],
            Strategy::Sims3 | Strategy::Sims4 => vec![hlt.with_consequences()],
            Strategy::Sims5 | Strategy::Sims6 => vec![hlt.with_permuted_relators()],
            Strategy::Sims7 | Strategy::Sims8 => {
                vec![hlt.with_permuted_relators().with_consequences()]
            }
            Strategy::Sims9 | Strategy::Sims10 => vec![felsch],
            Strategy::AcePureC => {
                options.max_hole_percentage = 100;
                vec![felsch_ace]
            }
            Strategy::AceFelsch0 => vec![felsch_ace],
            Strategy::AceFelsch1 => {
                options.loop_phase = Some(1);
                vec![
                    hlt_ace.with_consequences().with_length(Rows(1)),
                    felsch.with_ace_gaps(),
                ]
            }
            Strategy::Long => vec![Phase::long()],
            Strategy::Lucky => {
                options.loop_phase = Some(0);
                let varied = Phase {
                    check_consequences: true,
                    best_candidates: true,
                    short_gaps: true,
                    variation: Variation::Vary,
                    ..Phase::default()
                };
                let random = Phase {
                    variation: Variation::Random,
                    ..Phase::default()
                };
                vec![
                    Phase::long().with_length(Rows(91000)),
                    varied.with_length(Definitions(9000)),
                    random.with_length(Rows(10)),
                ]
            }
        };
        options.build_standardised = matches!(
            self,
            Strategy::Sims2
                | Strategy::Sims4
                | Strategy::Sims6
                | Strategy::Sims8
                | Strategy::Sims10
        );
    }
}
