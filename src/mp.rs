//! Maximum-probability segmentation: build a DAG of dictionary-backed word
//! boundaries over a run of runes, then pick the highest-log-weight path
//! through it with a backward dynamic-programming pass.
//!
//! The DAG itself comes from [`crate::trie::Trie::prefix_enumerate`]; this
//! module only does the Viterbi-style path selection, mirroring the shape
//! of cppjieba's `MPSegment::Cut`: walk positions from the end backward, at
//! each position take the max over `route[j+1].weight + weight(i..=j)`
//! across every reachable `j`, breaking ties toward the smaller `j` (the
//! shorter word) to match cppjieba's stable iteration order over its DAG.
use crate::dict::{Dictionary, MIN_WEIGHT};
use crate::trie::{Dag, MAX_WORD_LENGTH};
use crate::unicode::{RuneStr, WordRange};

#[derive(Debug, Clone, Copy)]
struct RouteNode {
    weight: f64,
    next: usize,
}

/// Run MP segmentation over `runes[begin..end]`, returning word ranges in
/// left-to-right order. Allocates a fresh DAG buffer every call; see
/// [`cut_into`] for the scratch-reusing form a caller can drive with a
/// [`crate::segmenter::CutContext`].
pub fn cut(dict: &Dictionary, runes: &[RuneStr], begin: usize, end: usize) -> Vec<WordRange> {
    if begin >= end {
        return Vec::new();
    }
    let mut dag: Dag = vec![Vec::new(); end];
    viterbi(dict, runes, begin, end, &mut dag)
}

/// Same algorithm as [`cut`], but the DAG buffer is caller-owned and reused
/// across calls instead of being reallocated every time, letting a caller
/// doing many cuts in a loop eliminate per-call allocation via a
/// [`crate::segmenter::CutContext`]. `dag` is resized up as needed and only the
/// `[begin, end)` slots touched by this call are cleared; results are
/// appended onto `out` rather than returned, so `out` can be a
/// `CutContext`'s reused output buffer too.
pub fn cut_into(dict: &Dictionary, runes: &[RuneStr], begin: usize, end: usize, dag: &mut Dag, out: &mut Vec<WordRange>) {
    if begin >= end {
        return;
    }
    if dag.len() < end {
        dag.resize_with(end, Vec::new);
    }
    for slot in &mut dag[begin..end] {
        slot.clear();
    }
    out.extend(viterbi(dict, runes, begin, end, dag));
}

/// DAG-build plus backward Viterbi pass over `runes[begin..end]`, given a
/// `dag` buffer already sized to at least `end` (its `[begin, end)` slots
/// must be empty on entry).
fn viterbi(dict: &Dictionary, runes: &[RuneStr], begin: usize, end: usize, dag: &mut Dag) -> Vec<WordRange> {
    dict.trie().prefix_enumerate(runes, begin, end, dag, MAX_WORD_LENGTH);

    // route[i] holds the best path starting at i: its total weight and the
    // index of the next segment boundary. route[end] is the base case.
    let mut route = vec![RouteNode { weight: 0.0, next: end }; end + 1];
    for i in (begin..end).rev() {
        let mut best = RouteNode { weight: f64::NEG_INFINITY, next: i + 1 };
        for &j in &dag[i] {
            let word = &runes[i..=j];
            let weight = word_weight(dict, word);
            let candidate = weight + route[j + 1].weight;
            let is_better = candidate > best.weight
                || (candidate == best.weight && j + 1 < best.next);
            if is_better {
                best = RouteNode { weight: candidate, next: j + 1 };
            }
        }
        route[i] = best;
    }

    let mut ranges = Vec::new();
    let mut i = begin;
    while i < end {
        let next = route[i].next;
        ranges.push(WordRange::new(i, next - 1));
        i = next;
    }
    ranges
}

fn word_weight(dict: &Dictionary, word: &[RuneStr]) -> f64 {
    let runes: Vec<_> = word.iter().map(|r| r.rune).collect();
    match dict.find(&runes) {
        Some(entry) => entry.log_weight,
        None if runes.len() == 1 => MIN_WEIGHT,
        None => f64::NEG_INFINITY,
    }
}
