// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration failures.

use crate::options::OptionsError;
use thiserror::Error;

/// Why an enumeration ended without a completed coset table.
///
/// The working table is dropped in every case; no partial table is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// A coset could not be defined even after recovering space. This is
    /// also how an infinite (or too large) index shows up.
    #[error(
        "coset table exhausted with {live} live cosets (limit {ceiling}); \
         the index may be infinite"
    )]
    CapacityExhausted { live: usize, ceiling: usize },

    /// The last phase finished with undefined transitions and the strategy
    /// has no loop phase, or no phase could make further progress.
    #[error("strategy ended before the coset table was complete")]
    StrategyExhausted,

    #[error("enumeration aborted")]
    Aborted,

    #[error(transparent)]
    Options(#[from] OptionsError),
}
