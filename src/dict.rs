//! Dictionary: static + user word entries, weighted and tagged, addressed
//! through stable handles rather than pointers.
//!
//! Line-oriented loading and bincode persistence follow the same
//! conventions as this crate's other loadable model types; weight
//! conventions (`log(freq / freq_sum)`, the min/median/max treatment for
//! user words inserted without an explicit frequency, and the pointer-
//! stability requirement on dictionary entries) follow cppjieba's
//! `DictTrie.hpp`. Rather than a pointer into a `deque`, entries live in
//! one of two arenas (`static_entries`, `user_entries`) and the trie
//! stores an `EntryHandle` index into the appropriate arena.
use std::collections::HashSet;
use std::io::BufRead;

use crate::error::CoreError;
use crate::trie::Trie;
use crate::unicode::Rune;

/// cppjieba's `MIN_DOUBLE` / `MAX_DOUBLE`: sentinel log-weight bounds used
/// when a word's weight cannot otherwise be computed.
pub const MIN_WEIGHT: f64 = -3.14e100;
pub const MAX_WEIGHT: f64 = 3.14e100;

/// Which arena an [`EntryHandle`] indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arena {
    Static,
    User,
}

/// A stable reference to a [`DictEntry`]. Indices remain valid across
/// insertions because entries are only ever appended, never moved or
/// removed, from their arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHandle {
    arena: Arena,
    index: u32,
}

/// One dictionary word: its rune spelling, log-probability weight, and
/// part-of-speech tag.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub word: Vec<Rune>,
    pub log_weight: f64,
    pub tag: String,
}

/// How to assign a log-weight to a user word inserted without an explicit
/// frequency, mirroring cppjieba's `WordWeightMin` / `WordWeightMedian` /
/// `WordWeightMax` user-word weight policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserWordWeightOption {
    Min,
    Median,
    Max,
}

/// Static dictionary plus an overlay of user-added/removed words, backed
/// by a rune-keyed [`Trie`] of [`EntryHandle`]s.
pub struct Dictionary {
    static_entries: Vec<DictEntry>,
    user_entries: Vec<DictEntry>,
    trie: Trie<EntryHandle>,
    /// Sum of static-entry frequencies the static weights were derived
    /// from; reused so user words without an explicit frequency can be
    /// weighted on the same scale.
    static_freq_sum: f64,
    /// Default log-weight assigned to a user word with no frequency and
    /// no weight-option override (cppjieba's `user_word_default_weight_`).
    pub user_word_default_weight: f64,
    /// Single-rune user words are tracked separately so the Mix segmenter
    /// can tell a plain OOV singleton from a deliberately added one: a
    /// single rune that is itself a user word is emitted as-is rather than
    /// absorbed into an HMM run.
    single_rune_user_words: HashSet<Rune>,
}

impl Dictionary {
    /// Load a static dictionary from `word freq tag` lines, skipping
    /// malformed lines with a logged warning rather than failing the whole
    /// load. A non-positive frequency is treated as malformed, not
    /// zero-weight.
    pub fn load_static<R: BufRead>(reader: R) -> Result<Self, CoreError> {
        let mut raw: Vec<(Vec<Rune>, f64, String)> = Vec::new();
        let mut freq_sum = 0.0f64;
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut cols = trimmed.split_whitespace();
            let (word_str, freq_str, tag) = match (cols.next(), cols.next(), cols.next()) {
                (Some(w), Some(f), Some(t)) => (w, f, t),
                _ => {
                    tracing::warn!(lineno, line = trimmed, "skipping malformed dictionary line");
                    continue;
                }
            };
            let freq: f64 = match freq_str.parse() {
                Ok(f) if f > 0.0 => f,
                _ => {
                    tracing::warn!(lineno, line = trimmed, "skipping non-positive frequency");
                    continue;
                }
            };
            let word = crate::unicode::decode_utf8(word_str.as_bytes())?
                .iter()
                .map(|r| r.rune)
                .collect();
            freq_sum += freq;
            raw.push((word, freq, tag.to_string()));
        }
        if raw.is_empty() {
            return Err(CoreError::ModelInvariant("static dictionary has no usable entries"));
        }

        let static_entries: Vec<DictEntry> = raw
            .into_iter()
            .map(|(word, freq, tag)| DictEntry {
                word,
                log_weight: (freq / freq_sum).ln(),
                tag,
            })
            .collect();

        let mut dict = Dictionary {
            static_entries,
            user_entries: Vec::new(),
            trie: Trie::new(),
            static_freq_sum: freq_sum,
            user_word_default_weight: MIN_WEIGHT,
            single_rune_user_words: HashSet::new(),
        };
        // cppjieba's own default is the minimum observed static weight, so
        // an unweighted user word never outranks a known dictionary word in
        // the MP Viterbi pass; callers that want the Median/Max policy call
        // `finalize_weights` explicitly afterward.
        dict.finalize_weights(UserWordWeightOption::Min);
        dict.reindex();
        Ok(dict)
    }

    /// Recompute the min/median/max order statistics over the static
    /// entries' log-weights and select `user_word_default_weight`
    /// accordingly. The median is the lower median (element at sorted
    /// index `n/2`).
    pub fn finalize_weights(&mut self, option: UserWordWeightOption) {
        self.user_word_default_weight = self.weight_for_option(option);
    }

    fn reindex(&mut self) {
        self.trie = Trie::new();
        for (index, entry) in self.static_entries.iter().enumerate() {
            self.trie.insert(
                &entry.word,
                EntryHandle {
                    arena: Arena::Static,
                    index: index as u32,
                },
            );
        }
        for (index, entry) in self.user_entries.iter().enumerate() {
            self.trie.insert(
                &entry.word,
                EntryHandle {
                    arena: Arena::User,
                    index: index as u32,
                },
            );
            if entry.word.len() == 1 {
                self.single_rune_user_words.insert(entry.word[0]);
            }
        }
    }

    /// Resolve a handle back to its entry.
    pub fn resolve(&self, handle: EntryHandle) -> &DictEntry {
        match handle.arena {
            Arena::Static => &self.static_entries[handle.index as usize],
            Arena::User => &self.user_entries[handle.index as usize],
        }
    }

    pub fn trie(&self) -> &Trie<EntryHandle> {
        &self.trie
    }

    pub fn find(&self, word: &[Rune]) -> Option<&DictEntry> {
        self.trie.exact_find(word).map(|h| self.resolve(h))
    }

    pub fn contains(&self, word: &[Rune]) -> bool {
        self.trie.exact_find(word).is_some()
    }

    pub fn is_single_rune_user_word(&self, rune: Rune) -> bool {
        self.single_rune_user_words.contains(&rune)
    }

    /// Insert a user word with an explicit frequency, weighted on the same
    /// log-scale as the static dictionary (`log(freq / static_freq_sum)`),
    /// matching `DictTrie::InsertUserWord`'s freq-bearing overload.
    pub fn insert_user_word_with_freq_runes(&mut self, word: Vec<Rune>, freq: u64, tag: impl Into<String>) {
        let log_weight = if freq > 0 {
            (freq as f64 / self.static_freq_sum).ln()
        } else {
            self.user_word_default_weight
        };
        self.insert_user_entry(DictEntry {
            word,
            log_weight,
            tag: tag.into(),
        });
    }

    /// Insert a user word with no frequency information, weighted per
    /// `option` against the static dictionary's weight distribution
    /// (cppjieba's `SetStaticWordWeights`).
    pub fn insert_user_word_runes(&mut self, word: Vec<Rune>, tag: impl Into<String>, option: UserWordWeightOption) {
        let log_weight = self.weight_for_option(option);
        self.insert_user_entry(DictEntry {
            word,
            log_weight,
            tag: tag.into(),
        });
    }

    /// Insert a user word given its UTF-8 text directly: decodes `word` to
    /// runes, failing (returning `false`) rather than panicking if it isn't
    /// valid UTF-8. A present `freq` is weighted like a static entry; absent,
    /// it falls back to [`Dictionary::user_word_default_weight`] (the
    /// weight [`Dictionary::finalize_weights`] selected at construction).
    pub fn insert_user_word(&mut self, word: &str, freq: Option<u64>, tag: Option<&str>) -> bool {
        let runes = match crate::unicode::decode_utf8(word.as_bytes()) {
            Ok(runes) => runes.iter().map(|r| r.rune).collect(),
            Err(_) => return false,
        };
        let tag = tag.unwrap_or("").to_string();
        match freq {
            Some(freq) => self.insert_user_word_with_freq_runes(runes, freq, tag),
            None => self.insert_user_entry(DictEntry {
                word: runes,
                log_weight: self.user_word_default_weight,
                tag,
            }),
        }
        true
    }

    /// Parse `word`, `word tag`, or `word freq tag` lines and insert each
    /// as a user word. Empty lines are skipped; a line whose word fails to
    /// decode as UTF-8 is skipped with a logged warning rather than
    /// aborting the whole load. Returns the count of words actually
    /// inserted.
    pub fn load_user<R: BufRead>(&mut self, reader: R) -> usize {
        let mut inserted = 0usize;
        for (lineno, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(lineno, error = %e, "skipping unreadable user-dictionary line");
                    continue;
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let cols: Vec<&str> = trimmed.split_whitespace().collect();
            let (word, freq, tag) = match cols.as_slice() {
                [word] => (*word, None, None),
                [word, tag] => (*word, None, Some(*tag)),
                [word, freq, tag] => (*word, freq.parse::<u64>().ok(), Some(*tag)),
                _ => {
                    tracing::warn!(lineno, line = trimmed, "skipping malformed user-dictionary line");
                    continue;
                }
            };
            if self.insert_user_word(word, freq, tag) {
                inserted += 1;
            } else {
                tracing::warn!(lineno, word, "skipping user-dictionary word with invalid UTF-8");
            }
        }
        inserted
    }

    fn weight_for_option(&self, option: UserWordWeightOption) -> f64 {
        if self.static_entries.is_empty() {
            return self.user_word_default_weight;
        }
        let mut weights: Vec<f64> = self.static_entries.iter().map(|e| e.log_weight).collect();
        weights.sort_by(|a, b| a.partial_cmp(b).unwrap());
        match option {
            UserWordWeightOption::Min => weights[0],
            UserWordWeightOption::Max => weights[weights.len() - 1],
            UserWordWeightOption::Median => weights[weights.len() / 2],
        }
    }

    fn insert_user_entry(&mut self, entry: DictEntry) {
        let index = self.user_entries.len() as u32;
        if entry.word.len() == 1 {
            self.single_rune_user_words.insert(entry.word[0]);
        }
        self.trie.insert(
            &entry.word,
            EntryHandle {
                arena: Arena::User,
                index,
            },
        );
        self.user_entries.push(entry);
    }

    /// Remove a user word by its rune spelling. Nulls the trie's terminal
    /// handle but leaves the structural path reachable, so a longer word
    /// sharing the deleted word's prefix stays intact.
    pub fn delete_user_word_runes(&mut self, word: &[Rune]) -> bool {
        if word.len() == 1 {
            self.single_rune_user_words.remove(&word[0]);
        }
        self.trie.delete(word)
    }

    /// Remove a user word given its UTF-8 text. Decodes `word` to runes,
    /// returning `false` on malformed UTF-8 without touching the
    /// dictionary.
    pub fn delete_user_word(&mut self, word: &str) -> bool {
        match crate::unicode::decode_utf8(word.as_bytes()) {
            Ok(runes) => {
                let runes: Vec<Rune> = runes.iter().map(|r| r.rune).collect();
                self.delete_user_word_runes(&runes)
            }
            Err(_) => false,
        }
    }

    pub fn static_len(&self) -> usize {
        self.static_entries.len()
    }

    pub fn user_len(&self) -> usize {
        self.user_entries.len()
    }
}
