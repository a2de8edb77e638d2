//! Chinese word segmentation: a rune-keyed trie and dictionary, a
//! DAG/Viterbi maximum-probability segmenter, an HMM-based recovery pass
//! for out-of-vocabulary text, Mix and Query composite strategies, a
//! part-of-speech tagger, and TF-IDF keyword extraction.
//!
//! The [`Segmenter`] facade is the usual entry point; the lower-level
//! modules (`trie`, `dict`, `mp`, `hmm`, `mix`, `query`) are public so
//! callers who need one strategy in isolation — or want to build a custom
//! pipeline over the same dictionary and HMM model — aren't forced through
//! the facade.

pub mod dict;
pub mod error;
pub mod hmm;
pub mod keywords;
pub mod mix;
pub mod mp;
pub mod prefilter;
pub mod query;
pub mod segmenter;
pub mod tag;
pub mod trie;
pub mod unicode;

pub use dict::{Dictionary, UserWordWeightOption};
pub use error::CoreError;
pub use hmm::HmmModel;
pub use keywords::{extract as extract_keywords, IdfTable, Keyword};
pub use segmenter::{CutContext, Mode, Segmenter};
pub use tag::TaggedWord;
pub use unicode::{normalize_nfc, Word};
