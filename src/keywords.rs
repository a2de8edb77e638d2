//! TF-IDF keyword extraction over Mix segmentation output.
//!
//! Grounded on cppjieba's `KeywordExtractor::Extract`: prefilter the
//! sentence and Mix-cut each non-symbol run (the same `PreFilter` ->
//! `MixSegment::Cut` pipeline `KeywordExtractor` builds on), accumulate
//! per-word term frequency (raw occurrence count) keyed by the word's
//! UTF-8 text, tracking each word's first byte offset by summing
//! already-processed byte lengths rather than re-decoding the source.
//! Single-rune words and stopwords are skipped entirely. Term frequency is
//! then multiplied by the word's IDF weight (or an average IDF for words
//! missing from the table) and the result is sorted descending by that
//! score, truncated to the requested count.
use ahash::{AHashMap, AHashSet};

use crate::dict::Dictionary;
use crate::hmm::HmmModel;
use crate::mix;
use crate::prefilter;
use crate::unicode::{decode_utf8, is_single_word};

/// Inverse-document-frequency table: word -> idf weight, plus the average
/// weight used as a fallback for words the table has never seen
/// (cppjieba's `idfAverage_`).
#[derive(Debug, Clone)]
pub struct IdfTable {
    weights: AHashMap<String, f64>,
    average: f64,
}

impl IdfTable {
    /// Build a table from `word idf` lines, computing the average weight
    /// up front.
    pub fn from_lines<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Self {
        let mut weights = AHashMap::new();
        let mut sum = 0.0;
        let mut count = 0usize;
        for line in lines {
            let mut cols = line.split_whitespace();
            if let (Some(word), Some(idf)) = (cols.next(), cols.next()) {
                if let Ok(idf) = idf.parse::<f64>() {
                    weights.insert(word.to_string(), idf);
                    sum += idf;
                    count += 1;
                }
            }
        }
        let average = if count > 0 { sum / count as f64 } else { 1.0 };
        IdfTable { weights, average }
    }

    fn weight_of(&self, word: &str) -> f64 {
        self.weights.get(word).copied().unwrap_or(self.average)
    }
}

/// A ranked keyword: its text, TF-IDF weight, and every byte offset at
/// which it occurred in the source sentence (cppjieba's
/// `KeywordExtractor::Word::offsets` — a term repeated in the sentence
/// keeps all of its occurrence offsets, not just the first).
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub word: String,
    pub weight: f64,
    pub offsets: Vec<usize>,
}

/// Extract the top `top_n` keywords from `sentence`.
///
/// `sentence` is a raw UTF-8 byte string; malformed UTF-8 yields
/// an empty result rather than a `Result::Err`, matching
/// [`crate::segmenter::Segmenter::cut`]'s no-partial-results contract.
pub fn extract(
    dict: &Dictionary,
    hmm: &HmmModel,
    idf: &IdfTable,
    stopwords: &AHashSet<String>,
    sentence: &[u8],
    top_n: usize,
) -> Vec<Keyword> {
    let runes = match decode_utf8(sentence) {
        Ok(runes) => runes,
        Err(_) => return Vec::new(),
    };
    let text = match std::str::from_utf8(sentence) {
        Ok(text) => text,
        Err(_) => return Vec::new(),
    };
    let symbols = prefilter::default_symbols();
    let mut ranges = Vec::new();
    for run in prefilter::split(&runes, &symbols) {
        if run.len() == 1 && symbols.contains(&runes[run.left].rune) {
            continue;
        }
        ranges.extend(mix::cut(dict, hmm, &runes, run.left, run.right + 1));
    }

    let mut by_word: AHashMap<String, (u32, Vec<usize>)> = AHashMap::new();
    for range in &ranges {
        let word = crate::unicode::word_from_range(text, &runes, *range);
        if is_single_word(word.word.as_bytes()) || stopwords.contains(&word.word) {
            continue;
        }
        let entry = by_word.entry(word.word).or_insert((0, Vec::new()));
        entry.0 += 1;
        entry.1.push(word.byte_offset);
    }

    let mut scored: Vec<Keyword> = by_word
        .into_iter()
        .map(|(word, (count, offsets))| {
            let weight = count as f64 * idf.weight_of(&word);
            Keyword { word, weight, offsets }
        })
        .collect();

    scored.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap().then_with(|| a.word.cmp(&b.word)));
    scored.truncate(top_n);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn dict() -> Dictionary {
        let data = "\
自然语言处理 600 n
人工智能 500 n
的 900 uj
是 850 v
技术 400 n
";
        Dictionary::load_static(Cursor::new(data)).unwrap()
    }

    #[test]
    fn skips_single_rune_words_and_stopwords() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let idf = IdfTable::from_lines(["自然语言处理 12.5", "人工智能 10.2", "技术 5.0"]);
        let mut stop = AHashSet::new();
        stop.insert("是".to_string());
        let keywords = extract(&dict, &hmm, &idf, &stop, "自然语言处理是人工智能技术".as_bytes(), 10);
        assert!(keywords.iter().all(|k| k.word.chars().count() > 1));
        assert!(keywords.iter().all(|k| k.word != "是"));
    }

    #[test]
    fn ranks_by_tfidf_descending() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let idf = IdfTable::from_lines(["自然语言处理 20.0", "人工智能 1.0"]);
        let stop = AHashSet::new();
        let keywords = extract(&dict, &hmm, &idf, &stop, "自然语言处理人工智能".as_bytes(), 10);
        assert_eq!(keywords[0].word, "自然语言处理");
    }

    #[test]
    fn missing_word_falls_back_to_average_idf() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let idf = IdfTable::from_lines(["人工智能 4.0"]);
        let stop = AHashSet::new();
        let keywords = extract(&dict, &hmm, &idf, &stop, "自然语言处理".as_bytes(), 10);
        assert_eq!(keywords[0].weight, 4.0);
    }

    #[test]
    fn top_n_truncates_results() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let idf = IdfTable::from_lines(["自然语言处理 9.0", "人工智能 8.0", "技术 7.0"]);
        let stop = AHashSet::new();
        let keywords = extract(&dict, &hmm, &idf, &stop, "自然语言处理人工智能技术".as_bytes(), 2);
        assert_eq!(keywords.len(), 2);
    }

    #[test]
    fn repeated_term_accumulates_all_occurrence_offsets() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let idf = IdfTable::from_lines(["技术 5.0"]);
        let stop = AHashSet::new();
        // "技术" appears twice; both occurrence offsets should surface,
        // and the term-frequency count should reflect both.
        let keywords = extract(&dict, &hmm, &idf, &stop, "技术技术".as_bytes(), 1);
        assert_eq!(keywords[0].word, "技术");
        assert_eq!(keywords[0].offsets, vec![0, 6]);
        assert_eq!(keywords[0].weight, 10.0);
    }

    #[test]
    fn malformed_utf8_yields_no_keywords() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let idf = IdfTable::from_lines(["技术 5.0"]);
        let stop = AHashSet::new();
        let bad_bytes: &[u8] = &[0xe4, 0x00, 0xe5];
        assert!(extract(&dict, &hmm, &idf, &stop, bad_bytes, 10).is_empty());
    }

    #[test]
    fn punctuation_never_merges_into_an_adjacent_token() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let idf = IdfTable::from_lines(["自然语言处理 12.5", "人工智能 10.2"]);
        let stop = AHashSet::new();
        // the comma and the following Hanzi run must stay on separate sides
        // of the prefilter boundary; none of the surfaced words may
        // straddle the punctuation rune.
        let keywords = extract(&dict, &hmm, &idf, &stop, "自然语言处理，人工智能".as_bytes(), 10);
        assert!(keywords.iter().all(|k| !k.word.contains('，')));
        assert!(keywords.iter().any(|k| k.word == "自然语言处理"));
        assert!(keywords.iter().any(|k| k.word == "人工智能"));
    }
}
