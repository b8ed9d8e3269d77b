// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use todd_coxeter::word::Alphabet;
use todd_coxeter::{CosetTable, Presentation};

/// Alphabet with an involution `a` and a pair `b`, `B`.
pub fn ab_alphabet() -> Alphabet {
    let mut alphabet = Alphabet::new();
    alphabet.add_involution("a").unwrap();
    alphabet.add_pair("b", "B").unwrap();
    alphabet
}

/// The triangle group `<a, b | a^2, b^3, (ab)^k>`: S3, A4, S4 and A5 for
/// k = 2, 3, 4, 5; infinite for k >= 6.
pub fn triangle_group(k: u32, subgroup: &[&str]) -> Presentation {
    let ab_k = format!("(ab)^{k}");
    Presentation::new(ab_alphabet())
        .with_relators(&["a^2", "b^3", &ab_k])
        .unwrap()
        .with_subgroup(subgroup)
        .unwrap()
}

pub fn s3(subgroup: &[&str]) -> Presentation {
    triangle_group(2, subgroup)
}

pub fn a4(subgroup: &[&str]) -> Presentation {
    triangle_group(3, subgroup)
}

pub fn s4(subgroup: &[&str]) -> Presentation {
    triangle_group(4, subgroup)
}

/// PSL(2,7), of order 168.
pub fn psl27(subgroup: &[&str]) -> Presentation {
    Presentation::new(ab_alphabet())
        .with_relators(&["a^2", "b^3", "(ab)^7", "(aBab)^4"])
        .unwrap()
        .with_subgroup(subgroup)
        .unwrap()
}

/// The modular group `<a, b | a^2, b^3>`, which is infinite.
pub fn modular_group() -> Presentation {
    Presentation::new(ab_alphabet())
        .with_relators(&["a^2", "b^3"])
        .unwrap()
}

/// Panic unless `table` is a complete permutation table in which every
/// word of `relators` fixes every coset.
pub fn assert_valid_table(table: &CosetTable, presentation: &Presentation) {
    let index = table.index() as u32;
    for c in 1..=index {
        for g in 0..table.nr_generators() {
            let d = table.action(c, g);
            assert!((1..=index).contains(&d), "{c}^{g} = {d} out of range");
            assert_eq!(table.action(d, table.inverse(g)), c);
        }
        for relator in presentation.relators() {
            assert_eq!(table.trace_from(c, relator), c, "relator fails at {c}");
        }
    }
    for generator in presentation.subgroup_generators() {
        assert_eq!(table.trace(generator), 1);
    }
}
