//! Configuration errors.
use std::path::PathBuf;

use crate::dictionary::error::DictionaryError;

/// Errors that abort construction of a matcher or tester.
///
/// All of these indicate a setup defect, so none is worth retrying.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Matching strategy identifier is neither `basic` nor `ngram`
    #[error("Unknown matching strategy '{0}' (expected 'basic' or 'ngram')")]
    UnknownMatcher(String),

    /// Language identifier is not a valid language tag
    #[error("Invalid language identifier '{0}': {1}")]
    InvalidLanguage(String, String),

    /// N-gram window must hold at least one character
    #[error("Invalid n-gram size {0}")]
    InvalidNgramSize(usize),

    /// Dictionary could not be located or read
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    /// Configuration file could not be opened
    #[error("Failed to open configuration file '{}'", .0.display())]
    File(PathBuf, #[source] std::io::Error),

    /// Configuration file is not valid JSON for the expected shape
    #[error("Failed to parse configuration")]
    Parse(#[from] serde_json::Error),
}
