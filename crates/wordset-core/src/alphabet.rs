//! Case-insensitive set of word characters
//!
//! Code points below 256 are answered from a fixed bitmap, everything
//! else from a hash set, so membership never scans a character list.

use ahash::AHashSet;

use crate::error::{Result, WordSetError};

/// Lowercase a single character, one code point in and one out.
///
/// Where the full lowercase mapping expands (only `'İ'` does), the first
/// code point is kept.
#[inline]
pub fn fold_case(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    c.to_lowercase().next().unwrap_or(c)
}

/// The set of characters that make up words. Anything else is a separator.
#[derive(Debug, Clone)]
pub struct Alphabet {
    low: [u64; 4],
    high: AHashSet<char>,
}

impl Alphabet {
    /// Build an alphabet from the given characters.
    ///
    /// Each character is stored through its lowercase mapping, so `'A'`
    /// and `'a'` are equivalent inputs.
    pub fn new<I>(chars: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut alphabet = Self {
            low: [0; 4],
            high: AHashSet::new(),
        };
        for c in chars {
            alphabet.insert(fold_case(c));
        }
        if alphabet.is_empty() {
            return Err(WordSetError::EmptyAlphabet);
        }
        Ok(alphabet)
    }

    /// Build an alphabet from inclusive character ranges
    pub fn from_ranges(ranges: &[(char, char)]) -> Result<Self> {
        Self::new(ranges.iter().flat_map(|&(start, end)| start..=end))
    }

    /// Lowercase English letters `a..z`
    pub fn latin() -> Self {
        let mut alphabet = Self {
            low: [0; 4],
            high: AHashSet::new(),
        };
        for c in 'a'..='z' {
            alphabet.insert(c);
        }
        alphabet
    }

    /// Lowercase Russian letters `а..я` plus `ё`
    pub fn cyrillic() -> Self {
        let mut alphabet = Self {
            low: [0; 4],
            high: AHashSet::with_capacity(33),
        };
        for c in ('а'..='я').chain(std::iter::once('ё')) {
            alphabet.insert(c);
        }
        alphabet
    }

    fn insert(&mut self, c: char) {
        let code = c as u32;
        if code < 256 {
            self.low[(code >> 6) as usize] |= 1u64 << (code & 63);
        } else {
            self.high.insert(c);
        }
    }

    /// Test membership of an already lowercased character
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        let code = c as u32;
        if code < 256 {
            self.low[(code >> 6) as usize] & (1u64 << (code & 63)) != 0
        } else {
            self.high.contains(&c)
        }
    }

    /// Number of distinct member characters
    pub fn len(&self) -> usize {
        let low: u32 = self.low.iter().map(|word| word.count_ones()).sum();
        low as usize + self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_construction() {
        let alphabet = Alphabet::new("ABCxyz".chars()).unwrap();
        assert!(alphabet.contains('a'));
        assert!(alphabet.contains('z'));
        assert!(!alphabet.contains('d'));
        // Membership is tested against lowercased input only
        assert!(!alphabet.contains('A'));
        assert_eq!(alphabet.len(), 6);
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let err = Alphabet::new("".chars()).unwrap_err();
        assert!(matches!(err, WordSetError::EmptyAlphabet));
    }

    #[test]
    fn test_presets() {
        let latin = Alphabet::latin();
        assert_eq!(latin.len(), 26);
        assert!(latin.contains('q'));
        assert!(!latin.contains('1'));

        let cyrillic = Alphabet::cyrillic();
        assert_eq!(cyrillic.len(), 33);
        assert!(cyrillic.contains('ж'));
        assert!(cyrillic.contains('ё'));
        assert!(!cyrillic.contains('a'));
    }

    #[test]
    fn test_bitmap_boundaries() {
        let alphabet = Alphabet::new(['\u{0}', '?', '@', '\u{ff}', '\u{100}'].into_iter()).unwrap();
        assert!(alphabet.contains('\u{0}'));
        assert!(alphabet.contains('?'));
        assert!(alphabet.contains('@'));
        assert!(alphabet.contains('\u{ff}'));
        assert!(alphabet.contains('\u{101}')); // lowercase of U+0100
        assert!(!alphabet.contains('A'));
    }

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case('Q'), 'q');
        assert_eq!(fold_case('Ж'), 'ж');
        assert_eq!(fold_case('İ'), 'i');
        assert_eq!(fold_case('7'), '7');
    }

    #[test]
    fn test_from_ranges() {
        let alphabet = Alphabet::from_ranges(&[('a', 'c'), ('0', '9')]).unwrap();
        assert_eq!(alphabet.len(), 13);
        assert!(alphabet.contains('5'));
        assert!(!alphabet.contains('d'));
    }
}
