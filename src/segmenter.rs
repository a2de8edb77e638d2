//! Public segmentation facade: one entry point selecting among the MP,
//! HMM, Mix, and Query strategies, plus tagging.
//!
//! A single struct wraps the lower-level pieces (dictionary, HMM model,
//! prefilter symbol set) behind a handful of methods, rather than exposing
//! each strategy as a free function the caller has to wire up themselves.
use ahash::AHashSet;

use crate::dict::Dictionary;
use crate::hmm::HmmModel;
use crate::prefilter::{self, default_symbols};
use crate::tag::{self, TaggedWord};
use crate::trie::Dag;
use crate::unicode::{decode_utf8, words_from_ranges, Rune, Word, WordRange};
use crate::{mix, mp, query};

/// Which segmentation strategy to run over each prefiltered run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Dictionary-only maximum-probability segmentation; OOV runs are
    /// left as singletons.
    Mp,
    /// Pure B/M/E/S HMM segmentation, ignoring the dictionary entirely.
    Hmm,
    /// MP with HMM recovery over OOV runs (the default for general text).
    Mix,
    /// Mix plus short-substring re-emission, for search indexing.
    Query,
}

/// Caller-owned scratch space for repeated [`Segmenter::cut_with_context`]
/// calls. Reusing one `CutContext` across many calls avoids reallocating
/// the MP DAG and the output range buffer every time; it carries no
/// dictionary- or sentence-specific state, so segmentation results are
/// identical whether or not a context is supplied. Not `Sync` to share
/// across threads — give each worker its own.
#[derive(Debug, Default)]
pub struct CutContext {
    dag: Dag,
    ranges: Vec<WordRange>,
}

impl CutContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A ready-to-use segmenter bundling a dictionary, an HMM model, and the
/// symbol set used to prefilter runs.
pub struct Segmenter {
    dict: Dictionary,
    hmm: HmmModel,
    symbols: AHashSet<Rune>,
}

impl Segmenter {
    pub fn new(dict: Dictionary, hmm: HmmModel) -> Self {
        Segmenter { dict, hmm, symbols: default_symbols() }
    }

    /// Override the symbol set the prefilter uses to split runs.
    pub fn with_symbols(mut self, symbols: AHashSet<Rune>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    /// Segment `sentence` with the given strategy, prefiltering symbol runs
    /// out first so no segmenter ever has to reason about punctuation or
    /// whitespace.
    ///
    /// `sentence` is a raw UTF-8 byte string, not a `&str`: malformed UTF-8
    /// is a real input this operation must reject gracefully rather than a
    /// case Rust's type system rules out ahead of time. A decode failure
    /// never propagates as an error to the caller — it is logged and
    /// yields an empty word list.
    pub fn cut(&self, sentence: &[u8], mode: Mode) -> Vec<Word> {
        let (text, runes) = match self.decode(sentence) {
            Some(pair) => pair,
            None => return Vec::new(),
        };
        let runs = prefilter::split(&runes, &self.symbols);

        let mut ranges: Vec<WordRange> = Vec::new();
        for run in runs {
            if run.len() == 1 && self.symbols.contains(&runes[run.left].rune) {
                ranges.push(run);
                continue;
            }
            let begin = run.left;
            let end = run.right + 1;
            let run_ranges = match mode {
                Mode::Mp => mp::cut(&self.dict, &runes, begin, end),
                Mode::Hmm => crate::hmm::cut(&self.hmm, &runes, begin, end),
                Mode::Mix => mix::cut(&self.dict, &self.hmm, &runes, begin, end),
                Mode::Query => query::cut(&self.dict, &self.hmm, &runes, begin, end),
            };
            ranges.extend(run_ranges);
        }

        words_from_ranges(text, &runes, &ranges)
    }

    /// Same contract as [`Segmenter::cut`], but `ctx`'s DAG and output
    /// buffers are reused in place of allocating fresh ones this call. Only
    /// `Mode::Mp` reuses `ctx`'s DAG directly, since Mix/Hmm/Query compose
    /// their own sub-algorithms without exposing a buffer-reuse hook;
    /// every mode reuses `ctx`'s output range buffer.
    pub fn cut_with_context(&self, sentence: &[u8], mode: Mode, ctx: &mut CutContext) -> Vec<Word> {
        let (text, runes) = match self.decode(sentence) {
            Some(pair) => pair,
            None => return Vec::new(),
        };
        let runs = prefilter::split(&runes, &self.symbols);

        ctx.ranges.clear();
        for run in runs {
            if run.len() == 1 && self.symbols.contains(&runes[run.left].rune) {
                ctx.ranges.push(run);
                continue;
            }
            let begin = run.left;
            let end = run.right + 1;
            match mode {
                Mode::Mp => mp::cut_into(&self.dict, &runes, begin, end, &mut ctx.dag, &mut ctx.ranges),
                Mode::Hmm => ctx.ranges.extend(crate::hmm::cut(&self.hmm, &runes, begin, end)),
                Mode::Mix => ctx.ranges.extend(mix::cut(&self.dict, &self.hmm, &runes, begin, end)),
                Mode::Query => ctx.ranges.extend(query::cut(&self.dict, &self.hmm, &runes, begin, end)),
            }
        }

        words_from_ranges(text, &runes, &ctx.ranges)
    }

    /// Segment and tag `sentence` in one pass, always running Mix underneath
    /// (tagging an un-recovered OOV run would defeat the point of the
    /// fallback rules in [`crate::tag`]). Same byte-string/no-`Result`
    /// contract as [`Segmenter::cut`].
    pub fn tag(&self, sentence: &[u8]) -> Vec<TaggedWord> {
        let (text, runes) = match self.decode(sentence) {
            Some(pair) => pair,
            None => return Vec::new(),
        };
        let runs = prefilter::split(&runes, &self.symbols);

        let mut ranges: Vec<WordRange> = Vec::new();
        for run in runs {
            if run.len() == 1 && self.symbols.contains(&runes[run.left].rune) {
                ranges.push(run);
                continue;
            }
            ranges.extend(mix::cut(&self.dict, &self.hmm, &runes, run.left, run.right + 1));
        }

        tag::tag_ranges(&self.dict, text, &runes, &ranges)
    }

    /// Validate `sentence` as UTF-8 and decode it to runes in one step,
    /// logging and returning `None` on any failure so callers can produce
    /// the "empty output, error logged" behaviour without duplicating the
    /// log call at every entry point.
    fn decode<'a>(&self, sentence: &'a [u8]) -> Option<(&'a str, crate::unicode::RuneArray)> {
        let runes = decode_utf8(sentence).ok()?;
        let text = match std::str::from_utf8(sentence) {
            Ok(text) => text,
            Err(_) => {
                tracing::error!("UTF-8 validation disagreement between decoder and str::from_utf8");
                return None;
            }
        };
        Some((text, runes))
    }
}
