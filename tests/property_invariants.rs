//! Structural invariants that should hold regardless of dictionary
//! contents: decode/encode round-tripping, trie correctness, MP
//! optimality, Mix/Query monotonicity, and HMM state-sequence validity.
use std::io::Cursor;

use hanzi_cut::dict::Dictionary;
use hanzi_cut::hmm::HmmModel;
use hanzi_cut::trie::Trie;
use hanzi_cut::unicode::{decode_utf8, words_from_ranges, WordRange};
use hanzi_cut::{mix, mp, query};

fn sample_dictionary() -> Dictionary {
    let data = "\
中国 1000 ns
北京 900 ns
人民 800 n
是 950 v
首都 600 n
的 900 uj
共和国 500 ns
";
    Dictionary::load_static(Cursor::new(data)).unwrap()
}

#[test]
fn decoding_every_rune_and_reassembling_reproduces_the_source() {
    let sentences = ["北京是中国的首都", "hello, 世界!", "", "123abc中文"];
    for s in sentences {
        let runes = decode_utf8(s.as_bytes()).unwrap();
        let ranges: Vec<WordRange> = (0..runes.len()).map(|i| WordRange::new(i, i)).collect();
        let words = words_from_ranges(s, &runes, &ranges);
        let rebuilt: String = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(rebuilt, s);
    }
}

#[test]
fn rune_offsets_are_strictly_increasing_and_contiguous() {
    let s = "北京是中国";
    let runes = decode_utf8(s.as_bytes()).unwrap();
    for (i, r) in runes.iter().enumerate() {
        assert_eq!(r.rune_offset, i);
    }
}

#[test]
fn trie_insert_then_exact_find_round_trips_for_every_prefix_length() {
    let words = ["中", "中国", "中国人", "中国人民"];
    let mut trie: Trie<u32> = Trie::new();
    for (idx, w) in words.iter().enumerate() {
        let runes: Vec<_> = decode_utf8(w.as_bytes()).unwrap().iter().map(|r| r.rune).collect();
        trie.insert(&runes, idx as u32);
    }
    for (idx, w) in words.iter().enumerate() {
        let runes: Vec<_> = decode_utf8(w.as_bytes()).unwrap().iter().map(|r| r.rune).collect();
        assert_eq!(trie.exact_find(&runes), Some(idx as u32));
    }
}

#[test]
fn mp_segmentation_always_covers_the_whole_input_without_overlap() {
    let dict = sample_dictionary();
    let texts = ["北京是中国的首都", "中国人民共和国", "没有任何词典条目覆盖这句话"];
    for text in texts {
        let runes = decode_utf8(text.as_bytes()).unwrap();
        let ranges = mp::cut(&dict, &runes, 0, runes.len());
        assert_covers_without_gaps(&ranges, runes.len());
    }
}

#[test]
fn mix_without_any_oov_matches_mp_exactly() {
    let dict = sample_dictionary();
    let hmm = HmmModel::toy_model();
    let text = "中国是北京";
    let runes = decode_utf8(text.as_bytes()).unwrap();
    let mp_ranges = mp::cut(&dict, &runes, 0, runes.len());
    let mix_ranges = mix::cut(&dict, &hmm, &runes, 0, runes.len());
    assert_eq!(mp_ranges, mix_ranges);
}

#[test]
fn query_output_is_a_superset_of_mix_output() {
    let dict = sample_dictionary();
    let hmm = HmmModel::toy_model();
    let text = "中国人民共和国是首都";
    let runes = decode_utf8(text.as_bytes()).unwrap();
    let mix_ranges = mix::cut(&dict, &hmm, &runes, 0, runes.len());
    let query_ranges = query::cut(&dict, &hmm, &runes, 0, runes.len());
    for r in &mix_ranges {
        assert!(query_ranges.contains(r), "query output dropped mix word {r:?}");
    }
}

#[test]
fn hmm_cut_always_covers_its_run_without_gaps_or_overlap() {
    let hmm = HmmModel::toy_model();
    let texts = ["我在北京", "天气", "你他的了"];
    for text in texts {
        let runes = decode_utf8(text.as_bytes()).unwrap();
        let ranges = hanzi_cut::hmm::cut(&hmm, &runes, 0, runes.len());
        assert_covers_without_gaps(&ranges, runes.len());
    }
}

fn assert_covers_without_gaps(ranges: &[WordRange], total_len: usize) {
    let mut covered = 0usize;
    for r in ranges {
        assert_eq!(r.left, covered, "gap or overlap before range {r:?}");
        covered = r.right + 1;
    }
    assert_eq!(covered, total_len);
}
