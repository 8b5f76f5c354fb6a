//! Common error types for pyfind hosts.

use pyfind_core::DictionaryError;
use thiserror::Error;

/// Common error type for pyfind operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Dictionary could not be decoded
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A global subscriber was already installed
    #[error("logging error: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using pyfind Error.
pub type Result<T> = std::result::Result<T, Error>;
