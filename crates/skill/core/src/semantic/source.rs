//! Where registry documents come from.
//!
//! The registry itself does not care whether its document lives on disk, in
//! memory, or compiled into the binary. Each backing store implements
//! [`DocumentSource`] and the registry reloads through that seam.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::DocumentError;

use super::document::RegistryDocument;

/// A place a [`RegistryDocument`] can be loaded from.
///
/// Implementations must be safe to share across threads because reloads can
/// be triggered from any caller holding the registry.
pub trait DocumentSource: Send + Sync {
    /// Loads a fresh document from the backing store.
    fn load(&self) -> Result<RegistryDocument, DocumentError>;

    /// Human-readable description of the store, used in log lines.
    fn describe(&self) -> String;
}

/// Source that always yields the compiled-in default document.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinSource;

impl DocumentSource for BuiltinSource {
    fn load(&self) -> Result<RegistryDocument, DocumentError> {
        Ok(RegistryDocument::builtin())
    }

    fn describe(&self) -> String {
        "builtin defaults".to_string()
    }
}

/// Source backed by a JSON file on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn load(&self) -> Result<RegistryDocument, DocumentError> {
        let text = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                DocumentError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                DocumentError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        RegistryDocument::from_json_str(&text).map_err(|source| DocumentError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Source holding a fixed in-memory document. Useful for embedding curated
/// data sets and for tests.
#[derive(Clone, Debug)]
pub struct StaticSource {
    document: RegistryDocument,
    label: String,
}

impl StaticSource {
    pub fn new(document: RegistryDocument, label: impl Into<String>) -> Self {
        Self {
            document,
            label: label.into(),
        }
    }
}

impl DocumentSource for StaticSource {
    fn load(&self) -> Result<RegistryDocument, DocumentError> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        format!("static document ({})", self.label)
    }
}
