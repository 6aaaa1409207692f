//! Dictionary-related errors.
use std::path::PathBuf;

/// Errors that can occur when loading a dictionary file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DictionaryError {
    /// No dictionary file exists at the resolved path
    #[error("Dictionary file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error while opening or reading the dictionary
    #[error("I/O error reading '{}'", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}
