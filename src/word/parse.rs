// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Word parser.
//!
//! Grammar, with whitespace allowed between tokens:
//!
//! ```text
//! word  := (term | '*')*
//! term  := atom ('^' ['-'|'+'] digits)?
//! atom  := '(' word ')' | generator-name | '1'
//! ```
//!
//! Generator names are matched greedily, longest first, so `ab` is two
//! generators unless the alphabet has a generator called `ab`.

use super::{power, Alphabet, Word, WordError};

pub(super) fn parse_word(alphabet: &Alphabet, text: &str) -> Result<Word, WordError> {
    let mut parser = Parser {
        alphabet,
        text,
        pos: 0,
    };
    let word = parser.sequence()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(word),
        Some(')') => Err(parser.unbalanced(parser.pos)),
        Some(_) => Err(parser.unknown()),
    }
}

struct Parser<'a> {
    alphabet: &'a Alphabet,
    text: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump(c);
        }
    }

    fn unknown(&self) -> WordError {
        WordError::UnknownGenerator {
            text: self.text.to_string(),
            offset: self.pos,
        }
    }

    fn unbalanced(&self, offset: usize) -> WordError {
        WordError::UnbalancedParenthesis {
            text: self.text.to_string(),
            offset,
        }
    }

    fn sequence(&mut self) -> Result<Word, WordError> {
        let mut word = Word::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(')') => return Ok(word),
                Some('*') => self.bump('*'),
                Some(_) => {
                    let atom = self.atom()?;
                    let exponent = self.exponent()?;
                    word.extend(power(&atom, exponent, self.alphabet.inverses()));
                }
            }
        }
    }

    fn atom(&mut self) -> Result<Word, WordError> {
        if let Some(g) = self.generator() {
            self.pos += self.alphabet.name(g).len();
            return Ok(vec![g]);
        }
        match self.peek() {
            Some('(') => {
                let open = self.pos;
                self.bump('(');
                let inner = self.sequence()?;
                self.skip_whitespace();
                if self.peek() != Some(')') {
                    return Err(self.unbalanced(open));
                }
                self.bump(')');
                Ok(inner)
            }
            Some('1') => {
                self.bump('1');
                Ok(Word::new())
            }
            _ => Err(self.unknown()),
        }
    }

    /// The longest generator name that prefixes the remaining input.
    fn generator(&self) -> Option<usize> {
        let rest = self.rest();
        (0..self.alphabet.len())
            .filter(|&g| rest.starts_with(self.alphabet.name(g)))
            .max_by_key(|&g| self.alphabet.name(g).len())
    }

    fn exponent(&mut self) -> Result<i64, WordError> {
        self.skip_whitespace();
        if self.peek() != Some('^') {
            return Ok(1);
        }
        self.bump('^');
        self.skip_whitespace();
        let start = self.pos;
        if let Some(sign @ ('-' | '+')) = self.peek() {
            self.bump(sign);
        }
        let digits_start = self.pos;
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.bump(c);
        }
        if digits_start == self.pos {
            return Err(WordError::BadExponent {
                text: self.text.to_string(),
                offset: start,
            });
        }
        self.text[start..self.pos]
            .parse::<i64>()
            .map_err(|_| WordError::BadExponent {
                text: self.text.to_string(),
                offset: start,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> Alphabet {
        let mut alphabet = Alphabet::new();
        alphabet.add_involution("a").unwrap();
        alphabet.add_pair("b", "B").unwrap();
        alphabet
    }

    #[test]
    fn test_simple_words() {
        let alphabet = alphabet();
        assert_eq!(alphabet.parse("abB").unwrap(), vec![0, 1, 2]);
        assert_eq!(alphabet.parse("a * b").unwrap(), vec![0, 1]);
        assert_eq!(alphabet.parse("1").unwrap(), Vec::<usize>::new());
        assert_eq!(alphabet.parse("").unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_powers_and_groups() {
        let alphabet = alphabet();
        assert_eq!(alphabet.parse("b^3").unwrap(), vec![1, 1, 1]);
        assert_eq!(alphabet.parse("(ab)^2").unwrap(), vec![0, 1, 0, 1]);
        assert_eq!(alphabet.parse("(ab)^-1").unwrap(), vec![2, 0]);
        assert_eq!(alphabet.parse("b^ -2").unwrap(), vec![2, 2]);
        assert_eq!(alphabet.parse("((a)b)^0 a").unwrap(), vec![0]);
    }

    #[test]
    fn test_longest_name_wins() {
        let mut alphabet = Alphabet::new();
        alphabet.add_pair("x", "X").unwrap();
        alphabet.add_pair("x1", "X1").unwrap();
        assert_eq!(alphabet.parse("x1x").unwrap(), vec![2, 0]);
        assert_eq!(alphabet.parse("X1^2").unwrap(), vec![3, 3]);
    }

    #[test]
    fn test_errors() {
        let alphabet = alphabet();
        assert!(matches!(
            alphabet.parse("ac"),
            Err(WordError::UnknownGenerator { offset: 1, .. })
        ));
        assert!(matches!(
            alphabet.parse("(ab"),
            Err(WordError::UnbalancedParenthesis { offset: 0, .. })
        ));
        assert!(matches!(
            alphabet.parse("ab)"),
            Err(WordError::UnbalancedParenthesis { offset: 2, .. })
        ));
        assert!(matches!(
            alphabet.parse("a^x"),
            Err(WordError::BadExponent { .. })
        ));
    }
}
