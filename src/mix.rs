//! Mix segmentation: MP segmentation with HMM recovery over runs of
//! unmatched singleton characters.
//!
//! Grounded on cppjieba's `MixSegment::Cut`: run MP first, then sweep its
//! output left to right. Any multi-rune word, or a single rune that is
//! itself a user dictionary word, passes straight through. Everything else
//! is a "plain" singleton; maximal runs of plain singletons are collected
//! and handed to the HMM segmenter instead, and the HMM's output is
//! spliced into the result in place of the run.
use crate::dict::Dictionary;
use crate::hmm::HmmModel;
use crate::mp;
use crate::unicode::{RuneStr, WordRange};

pub fn cut(
    dict: &Dictionary,
    hmm: &HmmModel,
    runes: &[RuneStr],
    begin: usize,
    end: usize,
) -> Vec<WordRange> {
    let mp_ranges = mp::cut(dict, runes, begin, end);
    let mut result = Vec::with_capacity(mp_ranges.len());

    let mut idx = 0;
    while idx < mp_ranges.len() {
        let range = mp_ranges[idx];
        if !is_plain_singleton(dict, runes, range) {
            result.push(range);
            idx += 1;
            continue;
        }
        // absorb every consecutive plain-singleton range into one run
        let run_start = range.left;
        let mut run_end = range.right;
        let mut next = idx + 1;
        while next < mp_ranges.len() && is_plain_singleton(dict, runes, mp_ranges[next]) {
            run_end = mp_ranges[next].right;
            next += 1;
        }
        result.extend(crate::hmm::cut(hmm, runes, run_start, run_end + 1));
        idx = next;
    }

    result
}

fn is_plain_singleton(dict: &Dictionary, runes: &[RuneStr], range: WordRange) -> bool {
    if range.len() != 1 {
        return false;
    }
    !dict.is_single_rune_user_word(runes[range.left].rune)
}
