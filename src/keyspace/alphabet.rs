use std::collections::HashMap;
use std::fmt;

use crate::error::SearchError;

/// Lowercase letters, uppercase letters, then digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Ordered set of distinct symbols candidates are built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    positions: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `symbols`, in order.
    pub fn new(symbols: &str) -> Result<Self, SearchError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(SearchError::EmptyAlphabet);
        }

        let mut positions = HashMap::with_capacity(symbols.len());
        for (position, &symbol) in symbols.iter().enumerate() {
            if positions.insert(symbol, position).is_some() {
                return Err(SearchError::DuplicateSymbol(symbol));
            }
        }

        Ok(Self { symbols, positions })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; an alphabet cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, position: usize) -> Option<char> {
        self.symbols.get(position).copied()
    }

    pub fn position(&self, symbol: char) -> Option<usize> {
        self.positions.get(&symbol).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_ALPHABET.chars().collect();
        let positions = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, positions }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 62);
        assert_eq!(alphabet.symbol(0), Some('a'));
        assert_eq!(alphabet.symbol(26), Some('A'));
        assert_eq!(alphabet.symbol(61), Some('9'));
        assert_eq!(alphabet.to_string(), DEFAULT_ALPHABET);
        assert_eq!(Alphabet::new(DEFAULT_ALPHABET).unwrap(), alphabet);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(matches!(Alphabet::new(""), Err(SearchError::EmptyAlphabet)));
        assert!(matches!(
            Alphabet::new("abca"),
            Err(SearchError::DuplicateSymbol('a'))
        ));
    }

    #[test]
    fn test_positions_follow_input_order() {
        let alphabet = Alphabet::new("zyx").unwrap();
        assert_eq!(alphabet.position('z'), Some(0));
        assert_eq!(alphabet.position('x'), Some(2));
        assert_eq!(alphabet.position('a'), None);
        assert_eq!(alphabet.symbol(3), None);
    }

    #[test]
    fn test_multibyte_symbols() {
        let alphabet = Alphabet::new("äöü").unwrap();
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.symbol(1), Some('ö'));
    }
}
