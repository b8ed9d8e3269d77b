// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Strategy strings.
//!
//! ```text
//! strategy := [name] ('/' phase)*
//! phase    := letter* [':' length]
//! length   := ['-'] digits [k|K|m|M] [r|R|d|D]
//! ```
//!
//! The optional name selects a [`Strategy`]; an empty name starts from a
//! single unlimited Felsch phase. Each descriptor then modifies the next
//! phase in turn (the first modifies phase 0), adding phases as needed.
//! Letters are case insensitive:
//!
//! | letter | effect |
//! |---|---|
//! | `*` | loop back to this phase after the last one |
//! | `H` | apply relators (HLT) |
//! | `M` | apply all conjugates of relators and normal subgroup generators |
//! | `G`, `N` | apply all conjugates of the relators / normal subgroup generators |
//! | `2`, `3` | conjugates ordered by position / sorted |
//! | `C` | check consequences |
//! | `L` | look-ahead |
//! | `P` | pre-fill rows |
//! | `T`, `A`, `B` | front / back / balanced definitions |
//! | `S`, `Q` | immediate / queued short gap filling |
//! | `U`, `R` | short gaps limited by fill factor / by passing a completed row |
//! | `X` | best candidate gap filling |
//! | `V`, `W` | vary / randomize the phase each time it runs |
//!
//! Lengths count rows unless suffixed with `d` (definitions); `k`, `K`, `m`
//! and `M` multiply by 1000, 1024, 10^6 and 2^20; `-1` means unlimited.

use super::{
    EnumerationOptions, FillOrder, OptionsError, Phase, PhaseLength, Strategy, Variation,
    MAX_PHASES,
};
use crate::relators::ConjugateOrder;
use std::str::FromStr;

pub(super) fn apply(options: &mut EnumerationOptions, text: &str) -> Result<(), OptionsError> {
    let (name, descriptors) = match text.find('/') {
        Some(slash) => (&text[..slash], Some(slash + 1)),
        None => (text, None),
    };
    let name = name.trim();
    if name.is_empty() {
        options.phases = vec![Phase::default()];
        options.loop_phase = None;
    } else {
        let strategy = Strategy::from_str(name)
            .map_err(|_| OptionsError::UnknownStrategy(name.to_string()))?;
        options.set_strategy(strategy);
    }

    let Some(start) = descriptors else {
        return Ok(());
    };
    let mut offset = start;
    for (phase_nr, descriptor) in text[start..].split('/').enumerate() {
        if phase_nr >= MAX_PHASES {
            return Err(OptionsError::TooManyPhases);
        }
        if phase_nr >= options.phases.len() {
            options.phases.push(Phase::default());
        }
        apply_descriptor(options, phase_nr, descriptor, offset)?;
        offset += descriptor.len() + 1;
    }
    Ok(())
}

fn apply_descriptor(
    options: &mut EnumerationOptions,
    phase_nr: usize,
    descriptor: &str,
    offset: usize,
) -> Result<(), OptionsError> {
    let (letters, length) = match descriptor.find(':') {
        Some(colon) => (&descriptor[..colon], Some(&descriptor[colon + 1..])),
        None => (descriptor, None),
    };

    for (i, letter) in letters.char_indices() {
        let phase = &mut options.phases[phase_nr];
        match letter.to_ascii_uppercase() {
            ' ' => {}
            '*' => options.loop_phase = Some(phase_nr),
            '2' => {
                phase.apply_relators = true;
                if phase.conjugate_order != ConjugateOrder::Sorted {
                    phase.conjugate_order = ConjugateOrder::ByPosition;
                }
            }
            '3' => {
                phase.apply_relators = true;
                phase.conjugate_order = ConjugateOrder::Sorted;
            }
            'A' => phase.fill_order = FillOrder::Back,
            'B' => phase.fill_order = FillOrder::Balanced,
            'T' => phase.fill_order = FillOrder::Front,
            'C' => phase.check_consequences = true,
            'G' => {
                phase.apply_relators = true;
                phase.permute_relators = true;
            }
            'H' => phase.apply_relators = true,
            'L' => {
                phase.apply_relators = true;
                phase.look_ahead = true;
            }
            'M' => {
                phase.apply_relators = true;
                phase.permute_relators = true;
                phase.permute_normal = true;
            }
            'N' => {
                phase.apply_relators = true;
                phase.permute_normal = true;
            }
            'P' => {
                phase.apply_relators = true;
                phase.pre_fill = true;
            }
            'Q' => {
                phase.check_consequences = true;
                phase.short_gaps = true;
                phase.queue_short_gaps = true;
                phase.require_low = false;
                phase.use_fill_factor = false;
            }
            'R' => {
                phase.check_consequences = true;
                phase.short_gaps = true;
                phase.require_low = true;
            }
            'S' => {
                phase.check_consequences = true;
                phase.short_gaps = true;
                phase.queue_short_gaps = false;
                phase.require_low = false;
                phase.use_fill_factor = false;
            }
            'U' => {
                phase.check_consequences = true;
                phase.short_gaps = true;
                phase.use_fill_factor = true;
            }
            'V' => {
                if phase.variation != Variation::Random {
                    phase.variation = Variation::Vary;
                }
            }
            'W' => phase.variation = Variation::Random,
            'X' => {
                phase.check_consequences = true;
                phase.best_candidates = true;
            }
            _ => {
                return Err(OptionsError::UnknownPhaseLetter {
                    letter,
                    offset: offset + i,
                })
            }
        }
    }

    if let Some(length) = length {
        let colon = offset + letters.len();
        let phase = &mut options.phases[phase_nr];
        phase.length = parse_length(length, phase.length, phase_nr, colon + 1)?;
    }
    Ok(())
}

fn parse_length(
    text: &str,
    previous: PhaseLength,
    phase_nr: usize,
    offset: usize,
) -> Result<PhaseLength, OptionsError> {
    let invalid = OptionsError::InvalidPhaseLength { phase: phase_nr };
    let too_large = OptionsError::PhaseLengthTooLarge { phase: phase_nr };

    let mut value: u64 = 0;
    let mut negative = false;
    let mut seen_digit = false;
    let mut expect_digit = true;
    let mut by_definitions = matches!(previous, PhaseLength::Definitions(_));

    for (i, c) in text.char_indices() {
        let multiplier = match c {
            'k' => Some(1000),
            'K' => Some(1024),
            'm' => Some(1_000_000),
            'M' => Some(1024 * 1024),
            _ => None,
        };
        if let Some(multiplier) = multiplier {
            if !seen_digit {
                return Err(invalid);
            }
            expect_digit = false;
            value = value.checked_mul(multiplier).ok_or(too_large.clone())?;
            continue;
        }
        match c {
            ' ' => {
                if seen_digit {
                    expect_digit = false;
                }
            }
            '-' => {
                if seen_digit || negative {
                    return Err(invalid);
                }
                negative = true;
            }
            '0'..='9' => {
                if !expect_digit {
                    return Err(invalid);
                }
                let digit = u64::from(c as u8 - b'0');
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or(too_large.clone())?;
                seen_digit = true;
            }
            'r' | 'R' => {
                if seen_digit {
                    expect_digit = false;
                }
                by_definitions = false;
            }
            'd' | 'D' => {
                if seen_digit {
                    expect_digit = false;
                }
                by_definitions = true;
            }
            _ => {
                return Err(OptionsError::UnknownPhaseLetter {
                    letter: c,
                    offset: offset + i,
                })
            }
        }
    }

    if !seen_digit {
        return Err(invalid);
    }
    if negative {
        return if value == 1 {
            Ok(PhaseLength::Unlimited)
        } else {
            Err(invalid)
        };
    }
    if value == 0 {
        return Err(invalid);
    }
    Ok(if by_definitions {
        PhaseLength::Definitions(value)
    } else {
        PhaseLength::Rows(value)
    })
}
