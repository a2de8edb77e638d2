//! Part-of-speech tagging over a segmentation result.
//!
//! Dictionary words carry their tag straight from the `DictEntry`. Words
//! the dictionary doesn't know about fall back to a small set of rules, the
//! same way cppjieba's `PosTagger` does for untagged OOV words: an
//! all-ASCII-letters word is tagged `"eng"`, an all-ASCII-digit word is
//! tagged `"m"`, and anything else recovered by the HMM segmenter is
//! tagged `"x"` (cppjieba's catch-all for an unrecognized OOV word).
use crate::dict::Dictionary;
use crate::unicode::{RuneStr, Word, WordRange};

pub const ENGLISH_TAG: &str = "eng";
pub const NUMBER_TAG: &str = "m";
pub const UNKNOWN_TAG: &str = "x";

/// A segmented, tagged word.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedWord {
    pub word: Word,
    pub tag: String,
}

/// Tag every range in `ranges` against `dict`, falling back to rule-based
/// tags for anything the dictionary has no entry for.
pub fn tag_ranges(dict: &Dictionary, src: &str, runes: &[RuneStr], ranges: &[WordRange]) -> Vec<TaggedWord> {
    ranges
        .iter()
        .map(|&range| {
            let word = crate::unicode::word_from_range(src, runes, range);
            let key: Vec<_> = runes[range.left..=range.right].iter().map(|r| r.rune).collect();
            let tag = match dict.find(&key) {
                Some(entry) => entry.tag.clone(),
                None => fallback_tag(&word.word).to_string(),
            };
            TaggedWord { word, tag }
        })
        .collect()
}

fn fallback_tag(word: &str) -> &'static str {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) {
        ENGLISH_TAG
    } else if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        NUMBER_TAG
    } else {
        UNKNOWN_TAG
    }
}
