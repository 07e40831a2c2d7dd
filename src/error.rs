//! Error types for the hanzi library.
//!
//! Only the surfaces that touch the outside world can fail: loading records,
//! snapshots and configuration. Resolution, conversion and comparison are
//! total over their input.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the hanzi library.
#[derive(Error, Debug)]
pub enum HanziError {
    /// I/O error with file context
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error on a stream without a path (stdin, in-memory readers)
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// Binary snapshot could not be encoded or decoded
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// JSON configuration error
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// No dictionary file at the resolved location
    #[error("dictionary not found: {0}")]
    DictionaryNotFound(PathBuf),

    /// Absent or empty argument passed to an entry point
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl HanziError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for hanzi operations.
pub type Result<T> = std::result::Result<T, HanziError>;
