// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Group presentations: generators, relators and subgroup generators.
//!
//! A [`Presentation`] is the input to an enumeration. It can be built in code
//! from an [`Alphabet`] and word strings, or loaded from a
//! [`PresentationDescription`] (the JSON form used by the `tcenum` binary):
//!
//! ```json
//! {
//!   "generators": [{"name": "a"}, {"name": "b", "inverse": "B"}],
//!   "relators": ["a^2", "b^3", "(ab)^2"],
//!   "subgroup": ["a"]
//! }
//! ```

use crate::word::{cyclically_reduce, invert, rotate, shortlex_cmp, Alphabet, Word, WordError};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("presentation has no generators")]
    NoGenerators,

    #[error(transparent)]
    Word(#[from] WordError),
}

/// How relators are preprocessed before the relator universe is built.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CyclicReduction {
    /// Use the relators exactly as given.
    AsIs,
    /// Cyclically and freely reduce, then use the least cyclic conjugate.
    #[default]
    LeastRelator,
    /// Cyclically and freely reduce, then use the conjugate `uV` for which
    /// the equation `u = v` has the least sides.
    BestEquation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    alphabet: Alphabet,
    relators: Vec<Word>,
    subgroup: Vec<Word>,
    normal_subgroup: Vec<Word>,
}

impl Presentation {
    pub fn new(alphabet: Alphabet) -> Self {
        Presentation {
            alphabet,
            relators: Vec::new(),
            subgroup: Vec::new(),
            normal_subgroup: Vec::new(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn relators(&self) -> &[Word] {
        &self.relators
    }

    /// Generators of the subgroup whose cosets are enumerated.
    pub fn subgroup_generators(&self) -> &[Word] {
        &self.subgroup
    }

    /// Generators of a normal subgroup; these are applied at every coset,
    /// like extra relators.
    pub fn normal_subgroup_generators(&self) -> &[Word] {
        &self.normal_subgroup
    }

    pub fn add_relator(&mut self, text: &str) -> Result<&mut Self, PresentationError> {
        let word = self.alphabet.parse(text)?;
        self.relators.push(word);
        Ok(self)
    }

    pub fn add_subgroup_generator(&mut self, text: &str) -> Result<&mut Self, PresentationError> {
        let word = self.alphabet.parse(text)?;
        self.subgroup.push(word);
        Ok(self)
    }

    pub fn add_normal_subgroup_generator(
        &mut self,
        text: &str,
    ) -> Result<&mut Self, PresentationError> {
        let word = self.alphabet.parse(text)?;
        self.normal_subgroup.push(word);
        Ok(self)
    }

    /// Builder form of [`Presentation::add_relator`] for several relators.
    pub fn with_relators(mut self, texts: &[&str]) -> Result<Self, PresentationError> {
        for text in texts {
            self.add_relator(text)?;
        }
        Ok(self)
    }

    pub fn with_subgroup(mut self, texts: &[&str]) -> Result<Self, PresentationError> {
        for text in texts {
            self.add_subgroup_generator(text)?;
        }
        Ok(self)
    }

    pub fn with_normal_subgroup(mut self, texts: &[&str]) -> Result<Self, PresentationError> {
        for text in texts {
            self.add_normal_subgroup_generator(text)?;
        }
        Ok(self)
    }

    /// The relators after preprocessing, with empty and repeated words
    /// removed.
    pub fn reduced_relators(&self, mode: CyclicReduction) -> Vec<Word> {
        reduce_words(&self.relators, &self.alphabet, mode)
    }

    /// The normal subgroup generators after the same preprocessing.
    pub fn reduced_normal_subgroup(&self, mode: CyclicReduction) -> Vec<Word> {
        reduce_words(&self.normal_subgroup, &self.alphabet, mode)
    }

    /// Build a presentation from its serializable description.
    pub fn from_description(
        description: &PresentationDescription,
    ) -> Result<Self, PresentationError> {
        if description.generators.is_empty() {
            return Err(PresentationError::NoGenerators);
        }
        let mut alphabet = Alphabet::new();
        for generator in &description.generators {
            match generator.inverse.as_deref() {
                Some(inverse) if inverse != generator.name => {
                    alphabet.add_pair(&generator.name, inverse)?;
                }
                _ => {
                    alphabet.add_involution(&generator.name)?;
                }
            }
        }
        let mut presentation = Presentation::new(alphabet);
        for text in &description.relators {
            presentation.add_relator(text)?;
        }
        for text in &description.subgroup {
            presentation.add_subgroup_generator(text)?;
        }
        for text in &description.normal_subgroup {
            presentation.add_normal_subgroup_generator(text)?;
        }
        Ok(presentation)
    }
}

fn reduce_words(words: &[Word], alphabet: &Alphabet, mode: CyclicReduction) -> Vec<Word> {
    let inverse = alphabet.inverses();
    let mut result: Vec<Word> = Vec::with_capacity(words.len());
    for word in words {
        let reduced = match mode {
            CyclicReduction::AsIs => word.clone(),
            CyclicReduction::LeastRelator => least_conjugate(&cyclically_reduce(word, inverse)),
            CyclicReduction::BestEquation => {
                best_equation_conjugate(&cyclically_reduce(word, inverse), inverse)
            }
        };
        if !reduced.is_empty() && !result.contains(&reduced) {
            result.push(reduced);
        }
    }
    result
}

fn least_conjugate(word: &[usize]) -> Word {
    (0..word.len())
        .map(|i| rotate(word, i))
        .min_by(|a, b| shortlex_cmp(a, b))
        .unwrap_or_default()
}

/// Split each rotation `uV` with `|u| = ceil(n/2)` and pick the one whose
/// equation `u = v` has the least left side, then the least right side.
fn best_equation_conjugate(word: &[usize], inverse: &[usize]) -> Word {
    let split = word.len().div_ceil(2);
    (0..word.len())
        .map(|i| {
            let rotated = rotate(word, i);
            let rhs = invert(&rotated[split..], inverse);
            (rotated, rhs)
        })
        .min_by(|(a, a_rhs), (b, b_rhs)| {
            shortlex_cmp(&a[..split], &b[..split]).then_with(|| shortlex_cmp(a_rhs, b_rhs))
        })
        .map(|(rotated, _)| rotated)
        .unwrap_or_default()
}

/// Serializable form of a presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationDescription {
    pub generators: Vec<GeneratorDescription>,
    #[serde(default)]
    pub relators: Vec<String>,
    #[serde(default)]
    pub subgroup: Vec<String>,
    #[serde(default)]
    pub normal_subgroup: Vec<String>,
}

/// A generator and, unless it is an involution, the name of its inverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
}
