//! Hidden Markov Model segmentation for out-of-vocabulary runs.
//!
//! B(egin)/M(iddle)/E(nd)/S(ingle) character-position tagging with Viterbi
//! decoding, following the same state machine and legal-transition table
//! cppjieba's `HMMSegment` uses; the model container shape (plain-old-data
//! struct with `ahash` maps, bincode-serializable, bundled `save`/`load`)
//! follows the same convention as this crate's other persisted model types.
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::dict::MIN_WEIGHT;
use crate::error::CoreError;
use crate::unicode::{Rune, RuneStr, WordRange};

/// The four character-position states, in a fixed order matching the
/// model's probability table indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Begin,
    Middle,
    End,
    Single,
}

pub const STATE_COUNT: usize = 4;
const STATES: [State; STATE_COUNT] = [State::Begin, State::Middle, State::End, State::Single];

fn state_index(s: State) -> usize {
    match s {
        State::Begin => 0,
        State::Middle => 1,
        State::End => 2,
        State::Single => 3,
    }
}

/// Legal transitions: a word can only end (`E`) or stand alone (`S`)
/// before a new word can begin (`B`) or stand alone (`S`); `M` may only
/// follow `B` or `M`.
fn legal_prev_states(s: State) -> &'static [State] {
    match s {
        State::Begin => &[State::End, State::Single],
        State::Middle => &[State::Begin, State::Middle],
        State::End => &[State::Begin, State::Middle],
        State::Single => &[State::End, State::Single],
    }
}

/// Emission/transition/start probability table, stored as log-probabilities
/// throughout: the model works entirely in log-space, and `MIN_WEIGHT`
/// stands in for a zero probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmmModel {
    start_prob: [f64; STATE_COUNT],
    trans_prob: [[f64; STATE_COUNT]; STATE_COUNT],
    emit_prob: [AHashMap<Rune, f64>; STATE_COUNT],
}

impl HmmModel {
    fn emit(&self, state: State, rune: Rune) -> f64 {
        self.emit_prob[state_index(state)].get(&rune).copied().unwrap_or(MIN_WEIGHT)
    }

    fn start(&self, state: State) -> f64 {
        self.start_prob[state_index(state)]
    }

    fn trans(&self, from: State, to: State) -> f64 {
        self.trans_prob[state_index(from)][state_index(to)]
    }

    /// A small, self-contained model useful for tests and as a fallback
    /// when no trained model is configured — a bundled minimal model keeps
    /// the crate usable with zero external data.
    pub fn toy_model() -> Self {
        let mut emit_prob: [AHashMap<Rune, f64>; STATE_COUNT] = Default::default();
        // A handful of common single-character function words/particles,
        // enough to exercise B/M/E/S transitions in tests without a real
        // trained corpus.
        for (ch, state, p) in [
            ('我', State::Single, -1.5),
            ('你', State::Single, -1.6),
            ('他', State::Single, -1.6),
            ('的', State::Single, -0.8),
            ('了', State::Single, -1.0),
            ('在', State::Begin, -2.0),
            ('北', State::Begin, -2.5),
            ('京', State::End, -2.5),
            ('天', State::Begin, -3.0),
            ('气', State::End, -3.0),
        ] {
            emit_prob[state_index(state)].insert(ch as Rune, p);
        }
        HmmModel {
            start_prob: [-0.26, MIN_WEIGHT, MIN_WEIGHT, -1.47],
            trans_prob: [
                [MIN_WEIGHT, -0.51, -0.91, MIN_WEIGHT],
                [MIN_WEIGHT, -1.26, -0.34, MIN_WEIGHT],
                [-0.59, MIN_WEIGHT, MIN_WEIGHT, -0.81],
                [-0.72, MIN_WEIGHT, MIN_WEIGHT, -0.67],
            ],
            emit_prob,
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CoreError> {
        let file = std::fs::File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)
            .map_err(|_| CoreError::ModelInvariant("failed to serialize HMM model"))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let file = std::fs::File::open(path)?;
        bincode::deserialize_from(BufReader::new(file))
            .map_err(|_| CoreError::ModelInvariant("failed to deserialize HMM model"))
    }
}

/// Viterbi-decode `runes[begin..end]` into B/M/E/S states, then collapse
/// the state sequence into word ranges.
pub fn cut(model: &HmmModel, runes: &[RuneStr], begin: usize, end: usize) -> Vec<WordRange> {
    let len = end - begin;
    if len == 0 {
        return Vec::new();
    }

    // weight[t][s] / backptr[t][s] index by position-within-run t and
    // state index s.
    let mut weight = vec![[f64::NEG_INFINITY; STATE_COUNT]; len];
    let mut backptr = vec![[0usize; STATE_COUNT]; len];

    for (s_idx, &state) in STATES.iter().enumerate() {
        weight[0][s_idx] = model.start(state) + model.emit(state, runes[begin].rune);
    }

    for t in 1..len {
        let rune = runes[begin + t].rune;
        for &state in &STATES {
            let s_idx = state_index(state);
            let mut best = f64::NEG_INFINITY;
            let mut best_prev = s_idx;
            for &prev in legal_prev_states(state) {
                let prev_idx = state_index(prev);
                let candidate = weight[t - 1][prev_idx] + model.trans(prev, state);
                if candidate > best {
                    best = candidate;
                    best_prev = prev_idx;
                }
            }
            weight[t][s_idx] = best + model.emit(state, rune);
            backptr[t][s_idx] = best_prev;
        }
    }

    // A valid segmentation only ever terminates on End or Single — Begin/
    // Middle mean the run ends mid-word, which the legal-transition table
    // should prevent but the terminal argmax must not reconsider anyway.
    let mut best_last = state_index(State::End);
    if weight[len - 1][state_index(State::Single)] > weight[len - 1][best_last] {
        best_last = state_index(State::Single);
    }

    let mut path = vec![0usize; len];
    path[len - 1] = best_last;
    for t in (1..len).rev() {
        path[t - 1] = backptr[t][path[t]];
    }

    states_to_ranges(begin, &path)
}

fn states_to_ranges(begin: usize, path: &[usize]) -> Vec<WordRange> {
    let mut ranges = Vec::new();
    let mut word_start: Option<usize> = None;
    for (t, &s_idx) in path.iter().enumerate() {
        let absolute = begin + t;
        match STATES[s_idx] {
            State::Begin => word_start = Some(absolute),
            State::Middle => {}
            State::End => {
                let start = word_start.take().unwrap_or(absolute);
                ranges.push(WordRange::new(start, absolute));
            }
            State::Single => {
                ranges.push(WordRange::new(absolute, absolute));
            }
        }
    }
    // A run that ends mid-word (Begin/Middle with no matching End, which
    // the legal-transition table should prevent at the last position but
    // defensive against a pathological 1-rune model) closes out here.
    if let Some(start) = word_start {
        ranges.push(WordRange::new(start, begin + path.len() - 1));
    }
    ranges
}
