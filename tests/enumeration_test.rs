// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

mod common;

use common::{a4, assert_valid_table, modular_group, psl27, s3, s4};
use todd_coxeter::options::{CompactionMode, EquivalentPresentation};
use todd_coxeter::presentation::CyclicReduction;
use todd_coxeter::state::Counters;
use todd_coxeter::{enumerate, EnumerationError, EnumerationOptions, Presentation, Strategy};

#[test]
fn test_s3_trivial_subgroup() {
    let presentation = s3(&[]);
    let enumeration = enumerate(&presentation, EnumerationOptions::default()).unwrap();
    assert_eq!(enumeration.index(), 6);
    assert!(enumeration.table.is_standardized());
    assert_valid_table(&enumeration.table, &presentation);
}

#[test]
fn test_infinite_index_exhausts_capacity() {
    let options = EnumerationOptions::default().with_max_cosets(1000);
    match enumerate(&modular_group(), options) {
        Err(EnumerationError::CapacityExhausted { live, ceiling }) => {
            assert_eq!(ceiling, 1000);
            assert!(live > 1 && live <= 1000);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_infinite_index_fails_under_every_strategy() {
    for strategy in [
        Strategy::Sims1,
        Strategy::Sims9,
        Strategy::HltLookahead,
        Strategy::AceFelsch0,
        Strategy::AceHard,
    ] {
        let options = EnumerationOptions::with_strategy(strategy).with_max_cosets(1000);
        let result = enumerate(&modular_group(), options);
        assert!(
            matches!(result, Err(EnumerationError::CapacityExhausted { .. })),
            "{strategy}: {result:?}"
        );
    }
}

#[test]
fn test_index_of_cyclic_subgroups() {
    let cases = [(s3(&["a"]), 3), (a4(&["b"]), 4), (s4(&["a"]), 12), (psl27(&["b"]), 56)];
    for (presentation, index) in cases {
        let enumeration = enumerate(&presentation, EnumerationOptions::default()).unwrap();
        assert_eq!(enumeration.index(), index);
        assert_valid_table(&enumeration.table, &presentation);
    }
}

#[test]
fn test_psl27_order() {
    let presentation = psl27(&[]);
    let enumeration = enumerate(&presentation, EnumerationOptions::default()).unwrap();
    assert_eq!(enumeration.index(), 168);
    assert_valid_table(&enumeration.table, &presentation);
}

#[test]
fn test_whole_group_has_index_one() {
    let enumeration = enumerate(&s4(&["a", "b"]), EnumerationOptions::default()).unwrap();
    assert_eq!(enumeration.index(), 1);
}

#[test]
fn test_normal_subgroup_generators_act_as_relators() {
    let presentation = s4(&[]).with_normal_subgroup(&["(ab)^2"]).unwrap();
    let enumeration = enumerate(&presentation, EnumerationOptions::default()).unwrap();
    assert_eq!(enumeration.index(), 6);
}

#[test]
fn test_three_generators() {
    // c commutes with a and inverts b, giving S3 x C2.
    let mut alphabet = common::ab_alphabet();
    alphabet.add_involution("c").unwrap();
    let presentation = Presentation::new(alphabet)
        .with_relators(&["a^2", "b^3", "(ab)^2", "(ac)^2", "(bc)^2"])
        .unwrap();
    let enumeration = enumerate(&presentation, EnumerationOptions::default()).unwrap();
    assert_eq!(enumeration.index(), 12);
}

#[test]
fn test_every_strategy_gives_the_same_table() {
    let presentation = s4(&["a"]);
    let expected = enumerate(&presentation, EnumerationOptions::default())
        .unwrap()
        .table;
    for strategy in <Strategy as strum::IntoEnumIterator>::iter() {
        let options = EnumerationOptions::with_strategy(strategy);
        let table = enumerate(&presentation, options)
            .unwrap_or_else(|e| panic!("{strategy}: {e}"))
            .table;
        assert_eq!(table, expected, "{strategy}");
    }
}

#[test]
fn test_strategy_strings() {
    let presentation = psl27(&[]);
    for text in ["hard", "sims:3", "/mcpb:1r/bsx", "fel:1", "default/a"] {
        let options = EnumerationOptions::from_strategy_str(text).unwrap();
        let enumeration = enumerate(&presentation, options)
            .unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(enumeration.index(), 168, "{text}");
    }
}

#[test]
fn test_compaction_modes_agree() {
    let presentation = psl27(&[]);
    let expected = enumerate(&presentation, EnumerationOptions::default())
        .unwrap()
        .table;
    for mode in [
        CompactionMode::Discard,
        CompactionMode::SpecialColumn,
        CompactionMode::RebuildByRow,
        CompactionMode::RebuildByColumn,
    ] {
        for strategy in [Strategy::Default, Strategy::AceFelsch0, Strategy::AceHard] {
            let mut options = EnumerationOptions::with_strategy(strategy).with_compaction(mode);
            options.allow_holes = 0;
            options.max_hole_percentage = 1;
            let enumeration = enumerate(&presentation, options).unwrap();
            assert_eq!(enumeration.table, expected, "{mode} {strategy}");
        }
    }
}

#[test]
fn test_tight_table_recovers_space() {
    // Felsch never holds many more live cosets than the index, so a table
    // barely larger than the group only has to reuse dead rows.
    let mut options = EnumerationOptions::with_strategy(Strategy::AceFelsch0).with_max_cosets(220);
    options.allow_holes = 0;
    let enumeration = enumerate(&psl27(&[]), options).unwrap();
    assert_eq!(enumeration.index(), 168);
}

#[test]
fn test_preprocessing_modes_agree() {
    let presentation = s4(&["a"]);
    for reduction in [
        CyclicReduction::AsIs,
        CyclicReduction::LeastRelator,
        CyclicReduction::BestEquation,
    ] {
        for rewrite in [
            EquivalentPresentation::AsIs,
            EquivalentPresentation::FewestDefinitions,
            EquivalentPresentation::MostDefinitions,
            EquivalentPresentation::Reverse,
            EquivalentPresentation::ReverseFewestDefinitions,
            EquivalentPresentation::ReverseMostDefinitions,
        ] {
            let mut options = EnumerationOptions::default();
            options.cyclic_reduction = reduction;
            options.equivalent_presentation = rewrite;
            let enumeration = enumerate(&presentation, options).unwrap();
            assert_eq!(enumeration.index(), 12, "{reduction} {rewrite}");
        }
    }
}

#[test]
fn test_unstandardized_output_is_still_valid() {
    let presentation = psl27(&["b"]);
    let mut options = EnumerationOptions::with_strategy(Strategy::Sims1);
    options.standardize = false;
    let enumeration = enumerate(&presentation, options).unwrap();
    assert!(!enumeration.table.is_standardized());
    assert_eq!(enumeration.index(), 56);
    assert_valid_table(&enumeration.table, &presentation);
}

#[test]
fn test_statistics_are_recorded() {
    let enumeration = enumerate(&psl27(&[]), EnumerationOptions::default()).unwrap();
    let statistics = &enumeration.statistics;
    assert!(statistics.get(Counters::CosetsDefined) >= 168);
    assert!(statistics.get(Counters::MaxLiveCosets) >= 168);
    assert!(statistics.get(Counters::PhasesRun) >= 1);
}

#[test]
fn test_schreier_generators_lie_in_subgroup() {
    let enumeration = enumerate(&s4(&["a"]), EnumerationOptions::default()).unwrap();
    let table = &enumeration.table;
    let generators = table.schreier_generators();
    assert!(!generators.is_empty());
    for word in &generators {
        assert_eq!(table.trace(word), 1);
    }
    let representatives = table.coset_representatives();
    assert_eq!(representatives.len(), 12);
    for (i, word) in representatives.iter().enumerate() {
        assert_eq!(table.trace(word) as usize, i + 1);
    }
}
