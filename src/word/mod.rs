// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Words over a generator alphabet.
//!
//! A word is a plain sequence of generator numbers. Everything that needs the
//! inverse map takes it as a slice indexed by generator, which is what
//! [`Alphabet::inverses`] returns.
//!
//! # Ordering
//!
//! Words are compared in shortlex order: shorter words first, then
//! lexicographically by generator number. Relator conjugates are sorted and
//! deduplicated in this order.

mod alphabet;
mod parse;

pub use alphabet::Alphabet;

use std::cmp::Ordering;
use thiserror::Error;

/// A generator number, indexing the columns of the coset table.
pub type Generator = usize;

/// A word in the generators.
pub type Word = Vec<Generator>;

/// Errors from building alphabets and parsing words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("generator name must not be empty")]
    EmptyName,

    #[error("generator name '{0}' is already in use")]
    DuplicateGenerator(String),

    #[error("unknown generator at offset {offset} in '{text}'")]
    UnknownGenerator { text: String, offset: usize },

    #[error("unbalanced parenthesis at offset {offset} in '{text}'")]
    UnbalancedParenthesis { text: String, offset: usize },

    #[error("malformed exponent at offset {offset} in '{text}'")]
    BadExponent { text: String, offset: usize },
}

/// The inverse of `word`: reversed, with every generator inverted.
pub fn invert(word: &[Generator], inverse: &[Generator]) -> Word {
    word.iter().rev().map(|&g| inverse[g]).collect()
}

/// Cancel adjacent `x X` pairs.
pub fn free_reduce(word: &[Generator], inverse: &[Generator]) -> Word {
    let mut reduced: Word = Vec::with_capacity(word.len());
    for &g in word {
        match reduced.last() {
            Some(&last) if inverse[last] == g => {
                reduced.pop();
            }
            _ => reduced.push(g),
        }
    }
    reduced
}

/// Freely reduce `word` and then strip inverse pairs from the two ends.
pub fn cyclically_reduce(word: &[Generator], inverse: &[Generator]) -> Word {
    let reduced = free_reduce(word, inverse);
    let mut start = 0;
    let mut end = reduced.len();
    while end - start >= 2 && inverse[reduced[start]] == reduced[end - 1] {
        start += 1;
        end -= 1;
    }
    reduced[start..end].to_vec()
}

/// The cyclic conjugate of `word` starting at position `start`.
pub fn rotate(word: &[Generator], start: usize) -> Word {
    let mut rotated = Vec::with_capacity(word.len());
    rotated.extend_from_slice(&word[start..]);
    rotated.extend_from_slice(&word[..start]);
    rotated
}

/// Shortlex comparison: by length, then lexicographically.
pub fn shortlex_cmp(a: &[Generator], b: &[Generator]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Raise `word` to an integer power; negative powers use the inverse.
pub fn power(word: &[Generator], exponent: i64, inverse: &[Generator]) -> Word {
    let base = if exponent < 0 {
        invert(word, inverse)
    } else {
        word.to_vec()
    };
    let count = exponent.unsigned_abs() as usize;
    let mut result = Vec::with_capacity(base.len() * count);
    for _ in 0..count {
        result.extend_from_slice(&base);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // a = 0 (involution), b = 1, B = 2
    const INVERSE: [Generator; 3] = [0, 2, 1];

    #[test]
    fn test_invert() {
        assert_eq!(invert(&[0, 1, 1], &INVERSE), vec![2, 2, 0]);
        assert_eq!(invert(&[], &INVERSE), Vec::<Generator>::new());
    }

    #[test]
    fn test_free_reduce() {
        assert_eq!(free_reduce(&[1, 2, 0], &INVERSE), vec![0]);
        assert_eq!(free_reduce(&[0, 0], &INVERSE), Vec::<Generator>::new());
        assert_eq!(free_reduce(&[1, 0, 0, 2], &INVERSE), Vec::<Generator>::new());
        assert_eq!(free_reduce(&[1, 1, 1], &INVERSE), vec![1, 1, 1]);
    }

    #[test]
    fn test_cyclically_reduce() {
        assert_eq!(cyclically_reduce(&[1, 0, 1, 2], &INVERSE), vec![0, 1]);
        assert_eq!(cyclically_reduce(&[2, 0, 1], &INVERSE), vec![0]);
        assert_eq!(cyclically_reduce(&[0, 1], &INVERSE), vec![0, 1]);
    }

    #[test]
    fn test_rotate() {
        assert_eq!(rotate(&[0, 1, 2], 1), vec![1, 2, 0]);
        assert_eq!(rotate(&[0, 1, 2], 0), vec![0, 1, 2]);
    }

    #[test]
    fn test_shortlex() {
        assert_eq!(shortlex_cmp(&[2], &[0, 0]), Ordering::Less);
        assert_eq!(shortlex_cmp(&[0, 2], &[1, 0]), Ordering::Less);
        assert_eq!(shortlex_cmp(&[1, 1], &[1, 1]), Ordering::Equal);
    }

    #[test]
    fn test_power() {
        assert_eq!(power(&[0, 1], 2, &INVERSE), vec![0, 1, 0, 1]);
        assert_eq!(power(&[0, 1], -1, &INVERSE), vec![2, 0]);
        assert!(power(&[0, 1], 0, &INVERSE).is_empty());
    }
}
