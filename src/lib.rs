// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Todd–Coxeter coset enumeration.
//!
//! Given a finitely presented group `G = <X | R>` and a subgroup `H`
//! generated by words in `X`, coset enumeration builds the table of the
//! action of the generators on the right cosets of `H`. When `H` has finite
//! index the enumeration completes and the table is the permutation
//! representation of `G` on `G/H`; when it does not, the enumeration runs
//! out of space.
//!
//! # Architecture
//!
//! Immutable data, computed once per enumeration:
//! - [`Presentation`](presentation::Presentation): alphabet, relators and
//!   subgroup generators, with relator preprocessing.
//! - [`RelatorUniverse`](relators::RelatorUniverse): every cyclic conjugate
//!   of every relator, grouped by leading generator, and the scan sets.
//!
//! Mutable working state, owned by the [`Enumerator`]:
//! - the coset table itself, with liveness and merge-queue columns;
//! - cursors into the coset sequence, adjusted when cosets are renumbered;
//! - the deduction log and the short gap queues;
//! - counters and statistics.
//!
//! # Strategies
//!
//! An enumeration runs a list of phases, each either applying relators at
//! every coset (HLT) or filling rows one transition at a time while checking
//! the consequences of every edit (Felsch). Named presets are available
//! through [`Strategy`](options::Strategy), and custom strategies can be
//! written as strategy strings (see
//! [`EnumerationOptions::from_strategy_str`](options::EnumerationOptions::from_strategy_str)).
//!
//! # Example
//!
//! ```
//! use todd_coxeter::{enumerate, EnumerationOptions, Presentation};
//! use todd_coxeter::word::Alphabet;
//!
//! let mut alphabet = Alphabet::new();
//! alphabet.add_involution("a").unwrap();
//! alphabet.add_pair("b", "B").unwrap();
//! let s4 = Presentation::new(alphabet)
//!     .with_relators(&["a^2", "b^3", "(ab)^4"])
//!     .unwrap()
//!     .with_subgroup(&["a"])
//!     .unwrap();
//!
//! let enumeration = enumerate(&s4, EnumerationOptions::default()).unwrap();
//! assert_eq!(enumeration.index(), 12);
//! ```
//!
//! # References
//!
//! - Sims, C. C. (1994). *Computation with Finitely Presented Groups*.
//!   Cambridge University Press.
//! - Havas, G. and Ramsay, C. (2003). "Coset enumeration: ACE version 3.001".

pub mod deduction;
pub mod engine;
pub mod error;
pub mod gaps;
pub mod options;
pub mod output;
pub mod positions;
pub mod presentation;
pub mod relators;
pub mod state;
pub mod table;
pub mod word;

// Re-export commonly used types
pub use engine::Enumerator;
pub use error::EnumerationError;
pub use options::{EnumerationOptions, Strategy};
pub use output::{CosetTable, Enumeration};
pub use presentation::Presentation;

/// Enumerate the cosets of the subgroup generated by the presentation's
/// subgroup generators.
pub fn enumerate(
    presentation: &Presentation,
    options: EnumerationOptions,
) -> Result<Enumeration, EnumerationError> {
    Enumerator::new(presentation, options)?.run()
}
