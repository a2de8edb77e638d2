//! Symbol-aware pre-segmentation: splits a rune sequence into runs that the
//! word-level segmenters never have to cross.
//!
//! Grounded on cppjieba's `PreFilter.hpp`: a cursor-based iterator that
//! yields a singleton range for every symbol rune, and groups consecutive
//! non-symbol runes into one range up to the next symbol or the end of
//! input.
use ahash::AHashSet;

use crate::unicode::{Rune, RuneStr, WordRange};

/// The default symbol set cppjieba ships with its prefilter: ASCII
/// whitespace and the handful of punctuation runes common enough to
/// appear unseparated from Hanzi text in practice.
pub fn default_symbols() -> AHashSet<Rune> {
    " \t\r\n,.!?;:()[]{}\"'、，。！？；：（）【】《》—…".chars().map(|c| c as Rune).collect()
}

/// Splits `runes` into maximal runs, breaking before and after every
/// symbol rune. A symbol rune always forms its own one-rune range.
pub struct PreFilter<'a> {
    runes: &'a [RuneStr],
    symbols: &'a AHashSet<Rune>,
    cursor: usize,
}

impl<'a> PreFilter<'a> {
    pub fn new(runes: &'a [RuneStr], symbols: &'a AHashSet<Rune>) -> Self {
        PreFilter { runes, symbols, cursor: 0 }
    }

    fn is_symbol(&self, index: usize) -> bool {
        self.symbols.contains(&self.runes[index].rune)
    }
}

impl<'a> Iterator for PreFilter<'a> {
    type Item = WordRange;

    fn next(&mut self) -> Option<WordRange> {
        if self.cursor >= self.runes.len() {
            return None;
        }
        let start = self.cursor;
        if self.is_symbol(start) {
            self.cursor += 1;
            return Some(WordRange::new(start, start));
        }
        let mut end = start;
        while end + 1 < self.runes.len() && !self.is_symbol(end + 1) {
            end += 1;
        }
        self.cursor = end + 1;
        Some(WordRange::new(start, end))
    }
}

/// Collect every run in one pass.
pub fn split(runes: &[RuneStr], symbols: &AHashSet<Rune>) -> Vec<WordRange> {
    PreFilter::new(runes, symbols).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::decode_utf8;

    #[test]
    fn groups_plain_text_into_one_run() {
        let s = decode_utf8("你好世界".as_bytes()).unwrap();
        let symbols = default_symbols();
        let ranges = split(&s, &symbols);
        assert_eq!(ranges, vec![WordRange::new(0, 3)]);
    }

    #[test]
    fn symbol_interrupts_and_is_its_own_singleton() {
        let s = decode_utf8("你好，世界！".as_bytes()).unwrap();
        let symbols = default_symbols();
        let ranges = split(&s, &symbols);
        assert_eq!(
            ranges,
            vec![
                WordRange::new(0, 1),
                WordRange::new(2, 2),
                WordRange::new(3, 4),
                WordRange::new(5, 5),
            ]
        );
    }

    #[test]
    fn leading_and_trailing_symbols() {
        let s = decode_utf8("  hi  ".as_bytes()).unwrap();
        let symbols = default_symbols();
        let ranges = split(&s, &symbols);
        // two leading spaces, "hi", two trailing spaces
        assert_eq!(ranges.len(), 5);
        assert_eq!(ranges[2], WordRange::new(2, 3));
    }

    #[test]
    fn empty_input_yields_no_ranges() {
        let s: Vec<RuneStr> = Vec::new();
        let symbols = default_symbols();
        assert!(split(&s, &symbols).is_empty());
    }
}
