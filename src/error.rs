//! Crate-wide error type.
//!
//! Mirrors the four error kinds from the design: decode failures, malformed
//! dictionary lines, dictionary I/O failures, and model invariant violations.
//! `DictionaryFormat` errors are usually *not* propagated — callers skip the
//! offending line and keep loading (see [`crate::dict::Dictionary`]); the
//! variant exists for code paths that want to surface the count/reason.
use std::fmt;

#[derive(Debug)]
pub enum CoreError {
    /// Malformed UTF-8 byte sequence; the input cannot be decoded to runes.
    Decode,
    /// A dictionary or IDF line failed to split into the required columns.
    DictionaryFormat { line: String, reason: &'static str },
    /// The dictionary/model file could not be opened or read.
    DictionaryIo(std::io::Error),
    /// An invariant was violated at construction time (empty dictionary,
    /// non-positive frequency sum, zero status count, etc).
    ModelInvariant(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Decode => write!(f, "malformed UTF-8 input"),
            CoreError::DictionaryFormat { line, reason } => {
                write!(f, "malformed dictionary line ({reason}): {line:?}")
            }
            CoreError::DictionaryIo(e) => write!(f, "dictionary I/O error: {e}"),
            CoreError::ModelInvariant(msg) => write!(f, "model invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::DictionaryIo(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::DictionaryIo(e)
    }
}
