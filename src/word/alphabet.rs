// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generator alphabet with an explicit involution.

use super::{parse, Generator, Word, WordError};
use serde::Serialize;

/// The generators of a presentation and their inverses.
///
/// Every generator is either its own inverse (an involution such as `a` in
/// `a^2 = 1`) or paired with a distinct inverse generator (`b` and `B`).
/// Both members of a pair are columns of the coset table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Alphabet {
    names: Vec<String>,
    inverse: Vec<Generator>,
}

impl Alphabet {
    pub fn new() -> Self {
        Alphabet::default()
    }

    /// Add a generator that is its own inverse.
    pub fn add_involution(&mut self, name: &str) -> Result<Generator, WordError> {
        self.check_name(name)?;
        let g = self.names.len();
        self.names.push(name.to_string());
        self.inverse.push(g);
        Ok(g)
    }

    /// Add a generator together with its (distinct) inverse.
    pub fn add_pair(
        &mut self,
        name: &str,
        inverse_name: &str,
    ) -> Result<(Generator, Generator), WordError> {
        self.check_name(name)?;
        self.check_name(inverse_name)?;
        if name == inverse_name {
            return Err(WordError::DuplicateGenerator(name.to_string()));
        }
        let g = self.names.len();
        self.names.push(name.to_string());
        self.names.push(inverse_name.to_string());
        self.inverse.push(g + 1);
        self.inverse.push(g);
        Ok((g, g + 1))
    }

    fn check_name(&self, name: &str) -> Result<(), WordError> {
        if name.is_empty() {
            return Err(WordError::EmptyName);
        }
        if self.lookup(name).is_some() {
            return Err(WordError::DuplicateGenerator(name.to_string()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn inverse(&self, g: Generator) -> Generator {
        self.inverse[g]
    }

    /// The inverse map, indexed by generator.
    pub fn inverses(&self) -> &[Generator] {
        &self.inverse
    }

    pub fn name(&self, g: Generator) -> &str {
        &self.names[g]
    }

    pub fn lookup(&self, name: &str) -> Option<Generator> {
        self.names.iter().position(|n| n == name)
    }

    /// True if some generator is not its own inverse.
    pub fn has_non_involution(&self) -> bool {
        self.inverse.iter().enumerate().any(|(g, &ig)| g != ig)
    }

    /// Parse a word such as `"(ab)^2"`, `"a*b^-1"` or `"1"`.
    pub fn parse(&self, text: &str) -> Result<Word, WordError> {
        parse::parse_word(self, text)
    }

    /// Render a word using generator names; the empty word is `"1"`.
    pub fn format(&self, word: &[Generator]) -> String {
        if word.is_empty() {
            return "1".to_string();
        }
        let single_chars = self.names.iter().all(|n| n.chars().count() == 1);
        let parts: Vec<&str> = word.iter().map(|&g| self.name(g)).collect();
        if single_chars {
            parts.concat()
        } else {
            parts.join("*")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_and_involutions() {
        let mut alphabet = Alphabet::new();
        let a = alphabet.add_involution("a").unwrap();
        let (b, big_b) = alphabet.add_pair("b", "B").unwrap();
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.inverse(a), a);
        assert_eq!(alphabet.inverse(b), big_b);
        assert_eq!(alphabet.inverse(big_b), b);
        assert!(alphabet.has_non_involution());
        assert_eq!(alphabet.lookup("B"), Some(big_b));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut alphabet = Alphabet::new();
        alphabet.add_involution("a").unwrap();
        assert_eq!(
            alphabet.add_pair("b", "a"),
            Err(WordError::DuplicateGenerator("a".to_string()))
        );
        assert_eq!(alphabet.add_involution(""), Err(WordError::EmptyName));
        assert!(alphabet.add_pair("c", "c").is_err());
    }

    #[test]
    fn test_format() {
        let mut alphabet = Alphabet::new();
        alphabet.add_involution("a").unwrap();
        alphabet.add_pair("b", "B").unwrap();
        assert_eq!(alphabet.format(&[0, 1, 2]), "abB");
        assert_eq!(alphabet.format(&[]), "1");

        let mut long = Alphabet::new();
        long.add_pair("x1", "X1").unwrap();
        assert_eq!(long.format(&[0, 1]), "x1*X1");
    }
}
