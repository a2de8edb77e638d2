//! Rune-keyed prefix trie over dictionary entries.
//!
//! Node shape (hashmap-of-children, boxed child nodes, a separate terminal
//! payload slot) generalized from `char`-keyed syllables to `Rune`
//! (`u32`)-keyed dictionary words. Terminal payloads are small `Copy`
//! handles rather than raw pointers, so no `unsafe` is needed for
//! pointer-stable references into the dictionary's entry arenas — the
//! handle is resolved against the owning `Dictionary`'s arenas.
use ahash::AHashMap;

use crate::unicode::{Rune, RuneStr};

/// Upper bound on word length (in runes) considered during prefix
/// enumeration, matching cppjieba's `MAX_WORD_LENGTH`.
pub const MAX_WORD_LENGTH: usize = 512;

/// Per-position list of reachable end indices, used by the MP segmenter's
/// DAG-based Viterbi pass. `dag[i]` always contains `i` itself (the
/// single-rune fallback) plus every `j >= i` such that `runes[i..=j]` is a
/// trie entry.
pub type Dag = Vec<Vec<usize>>;

#[derive(Debug, Default)]
struct TrieNode<H> {
    children: AHashMap<Rune, Box<TrieNode<H>>>,
    value: Option<H>,
}

impl<H> TrieNode<H> {
    fn new() -> Self {
        TrieNode {
            children: AHashMap::new(),
            value: None,
        }
    }
}

/// A prefix trie over rune sequences, storing an opaque `Copy` handle `H`
/// at each terminal node.
#[derive(Debug)]
pub struct Trie<H> {
    root: TrieNode<H>,
}

impl<H: Copy> Default for Trie<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy> Trie<H> {
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
        }
    }

    /// Build a trie from an ordered list of `(key, handle)` pairs.
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a [Rune], H)>,
    {
        let mut trie = Trie::new();
        for (key, handle) in entries {
            trie.insert(key, handle);
        }
        trie
    }

    /// Insert `key -> handle`. Last write wins on a repeated key.
    pub fn insert(&mut self, key: &[Rune], handle: H) {
        let mut node = &mut self.root;
        for &rune in key {
            node = node.children.entry(rune).or_insert_with(|| Box::new(TrieNode::new()));
        }
        node.value = Some(handle);
    }

    /// Clear the terminal value for `key` if it exists. Leaves the
    /// structural path (and any longer words sharing the prefix) intact —
    /// deleting a prefix never prunes the subtrie of longer words below it.
    pub fn delete(&mut self, key: &[Rune]) -> bool {
        let mut node = &mut self.root;
        for &rune in key {
            match node.children.get_mut(&rune) {
                Some(child) => node = child,
                None => return false,
            }
        }
        let had_value = node.value.is_some();
        node.value = None;
        had_value
    }

    /// Exact lookup: the handle stored at `key`, if `key` is a terminal.
    pub fn exact_find(&self, key: &[Rune]) -> Option<H> {
        let mut node = &self.root;
        for &rune in key {
            node = node.children.get(&rune)?;
        }
        node.value
    }

    /// For each start index `i` in `[begin, end)`, append every reachable
    /// end index `j` (with `j - i < max_word_len`) such that
    /// `runes[i..=j]` is a trie terminal, plus the mandatory `j == i`
    /// fallback row. `out` must already have length >= `end`.
    pub fn prefix_enumerate(
        &self,
        runes: &[RuneStr],
        begin: usize,
        end: usize,
        out: &mut Dag,
        max_word_len: usize,
    ) {
        for i in begin..end {
            let mut matches = vec![i];
            let mut node = &self.root;
            let mut j = i;
            while j < end && j - i + 1 <= max_word_len {
                let rune = runes[j].rune;
                node = match node.children.get(&rune) {
                    Some(child) => child,
                    None => break,
                };
                if node.value.is_some() {
                    matches.push(j);
                }
                j += 1;
            }
            out[i] = matches;
        }
    }
}
