//! Registry document errors.
//!
//! These cover the only fallible boundary of the crate: loading and saving
//! the semantic registry document. Rule violations are [`crate::report`]
//! data, and unknown action types degrade to pass/empty results instead of
//! erroring.

use std::path::PathBuf;

/// Failure while loading, parsing, or writing a registry document.
///
/// Parse failures carry the `serde_json` source error, which reports line and
/// column in its message.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The backing document does not exist.
    #[error("registry document not found at {path}")]
    NotFound { path: PathBuf },

    /// The document exists but could not be read.
    #[error("failed to read registry document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid registry JSON.
    #[error("failed to parse registry document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two entries share a key that the registry requires to be unique.
    #[error("duplicate {kind} '{name}' in registry document")]
    Duplicate { kind: &'static str, name: String },

    /// The document could not be written back.
    #[error("failed to write registry document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory document could not be serialized.
    #[error("failed to serialize registry document: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    /// Returns true when the failure is "nothing there yet" rather than
    /// corruption - the case the initial-load bootstrap treats as benign.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
