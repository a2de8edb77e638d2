//! Query segmentation: Mix segmentation followed by short-substring
//! re-emission, useful for building search indexes where users search with
//! substrings of a compound word.
//!
//! Grounded on cppjieba's `QuerySegment::Cut`: for every Mix word longer
//! than 2 runes, emit every in-dictionary 2-rune substring; for every word
//! longer than 3 runes, also emit every in-dictionary 3-rune substring;
//! finally emit the original word itself, last.
use crate::dict::Dictionary;
use crate::hmm::HmmModel;
use crate::mix;
use crate::unicode::{RuneStr, WordRange};

pub fn cut(
    dict: &Dictionary,
    hmm: &HmmModel,
    runes: &[RuneStr],
    begin: usize,
    end: usize,
) -> Vec<WordRange> {
    let mix_ranges = mix::cut(dict, hmm, runes, begin, end);
    let mut result = Vec::with_capacity(mix_ranges.len());

    for range in mix_ranges {
        let len = range.len();
        if len > 2 {
            emit_in_dict_substrings(dict, runes, range, 2, &mut result);
        }
        if len > 3 {
            emit_in_dict_substrings(dict, runes, range, 3, &mut result);
        }
        result.push(range);
    }

    result
}

fn emit_in_dict_substrings(
    dict: &Dictionary,
    runes: &[RuneStr],
    range: WordRange,
    width: usize,
    out: &mut Vec<WordRange>,
) {
    if range.len() < width {
        return;
    }
    for start in range.left..=range.right - width + 1 {
        let sub = WordRange::new(start, start + width - 1);
        let key: Vec<_> = runes[sub.left..=sub.right].iter().map(|r| r.rune).collect();
        if dict.contains(&key) {
            out.push(sub);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::decode_utf8;
    use std::io::Cursor;

    fn dict() -> Dictionary {
        let data = "\
中华人民共和国 500 ns
中华 400 ns
华人 300 n
人民 600 n
共和国 350 ns
的 800 uj
";
        Dictionary::load_static(Cursor::new(data)).unwrap()
    }

    #[test]
    fn long_word_expands_into_dictionary_substrings_then_itself() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let s = decode_utf8("中华人民共和国".as_bytes()).unwrap();
        let ranges = cut(&dict, &hmm, &s, 0, s.len());
        // the full word must be last
        assert_eq!(*ranges.last().unwrap(), WordRange::new(0, 6));
        // some in-dictionary substrings were emitted before it
        assert!(ranges.len() > 1);
        assert!(ranges[..ranges.len() - 1].iter().all(|r| r.len() < 7));
    }

    #[test]
    fn short_word_is_emitted_alone() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let s = decode_utf8("的".as_bytes()).unwrap();
        let ranges = cut(&dict, &hmm, &s, 0, s.len());
        assert_eq!(ranges, vec![WordRange::new(0, 0)]);
    }

    #[test]
    fn query_result_is_a_superset_of_mix_result_per_word() {
        let dict = dict();
        let hmm = HmmModel::toy_model();
        let s = decode_utf8("中华人民共和国".as_bytes()).unwrap();
        let mix_ranges = mix::cut(&dict, &hmm, &s, 0, s.len());
        let query_ranges = cut(&dict, &hmm, &s, 0, s.len());
        for r in &mix_ranges {
            assert!(query_ranges.contains(r));
        }
    }
}
