//! Keyspace definition and the index <-> candidate codec
//!
//! A keyspace is every string of a fixed length over an alphabet. Each
//! candidate has a dense `u64` index in `[0, base^length)`; index 0 is the
//! first symbol repeated, and the rightmost position varies fastest:
//!
//! ```text
//! alphabet "ab", length 2
//!   0 -> "aa"   1 -> "ab"   2 -> "ba"   3 -> "bb"
//! ```

mod alphabet;

pub use alphabet::{Alphabet, DEFAULT_ALPHABET};

use crate::error::SearchError;

/// An alphabet together with a candidate length, validated to fit `u64`.
#[derive(Debug, Clone)]
pub struct KeySpace {
    alphabet: Alphabet,
    length: usize,
    total: u64,
    // base^(length - 1), the weight of the leftmost position
    leading_place: u64,
}

impl KeySpace {
    pub fn new(alphabet: Alphabet, length: usize) -> Result<Self, SearchError> {
        if length == 0 {
            return Err(SearchError::InvalidLength);
        }

        let base = alphabet.len();
        let overflow = || SearchError::KeyspaceOverflow { base, length };
        let exponent = u32::try_from(length).map_err(|_| overflow())?;
        let total = (base as u64).checked_pow(exponent).ok_or_else(overflow)?;
        let leading_place = total / base as u64;

        tracing::debug!("Keyspace {}^{} = {} candidates", base, length, total);

        Ok(Self {
            alphabet,
            length,
            total,
            leading_place,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of candidates, `base^length`
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn decode(&self, index: u64) -> Option<String> {
        let mut candidate = String::with_capacity(self.length);
        self.decode_into(index, &mut candidate).then_some(candidate)
    }

    /// Write the candidate for `index` into `out`, reusing its allocation.
    ///
    /// Returns false and leaves `out` untouched when `index` is outside the
    /// keyspace.
    pub fn decode_into(&self, index: u64, out: &mut String) -> bool {
        if index >= self.total {
            return false;
        }

        let base = self.alphabet.len() as u64;
        let symbols = self.alphabet.symbols();
        let mut place = self.leading_place;
        let mut rest = index;

        out.clear();
        // Most significant position first. Produces the same string as taking
        // `index % base` repeatedly from the right.
        for _ in 0..self.length {
            let digit = rest / place;
            rest %= place;
            out.push(symbols[digit as usize]);
            place = (place / base).max(1);
        }
        true
    }

    /// Inverse of [`KeySpace::decode`].
    pub fn encode(&self, candidate: &str) -> Option<u64> {
        let base = self.alphabet.len() as u64;
        let mut index = 0u64;
        let mut symbols = 0usize;

        for symbol in candidate.chars() {
            let digit = self.alphabet.position(symbol)? as u64;
            index = index.checked_mul(base)?.checked_add(digit)?;
            symbols += 1;
        }

        (symbols == self.length).then_some(index)
    }
}
