//! Dictionary error types

use thiserror::Error;

/// Errors that can occur while decoding a pronunciation dictionary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    /// Input is not a JSON object of `char -> [reading]`
    #[error("malformed dictionary: {0}")]
    Malformed(String),

    /// Key is not exactly one character
    #[error("dictionary key must be a single character, got {0:?}")]
    InvalidKey(String),

    /// Reading is empty or contains non-ASCII-alphabetic characters
    #[error("invalid reading {reading:?} for character '{ch}'")]
    InvalidReading { ch: char, reading: String },
}

/// Result type for dictionary operations
pub type DictionaryResult<T> = Result<T, DictionaryError>;
