//! Error kinds raised by the extraction, catalog and rename engine.
//!
//! Every variant carries enough context (path, key, language) to be shown to
//! the user as-is. Callers above the core (CLI, MCP) wrap these in
//! `anyhow::Error` and keep the previous good state on failure.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type LocalizerResult<T> = std::result::Result<T, LocalizerError>;

#[derive(Debug, Error)]
pub enum LocalizerError {
    /// A file or directory could not be read while scanning.
    #[error("Failed to read '{}' while scanning sources: {source}", path.display())]
    ScanIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A catalog file exists but is not a JSON object.
    #[error("Translation file '{}' is not valid JSON: {reason}", path.display())]
    MalformedCatalog { path: PathBuf, reason: String },

    /// Rename requested on a key node that is not linked to a source file.
    #[error("Key \"{key}\" has no source file associated with it.")]
    NoSourceFile { key: String },

    /// A recorded usage span no longer contains the expected key text.
    #[error(
        "The source file '{}' seems to have changed since the last scan (expected \"{key}\" at byte {begin}). Rescan the sources and try again.",
        path.display()
    )]
    StaleSource {
        path: PathBuf,
        key: String,
        begin: usize,
    },

    /// Two usages of the same key in one file overlap.
    #[error(
        "Key \"{key}\" is used more than once in '{}' and the recorded locations overlap. Rename this key manually.",
        path.display()
    )]
    OverlappingUsages { path: PathBuf, key: String },

    /// Old or new key text is used by another key node in the tree.
    #[error("Key \"{key}\" is already used in {count} other place(s).")]
    AmbiguousRename { key: String, count: usize },

    /// A catalog path runs into a scalar, or a scalar would replace an object.
    #[error("Cannot store \"{key}\" in the {language} translation file: {reason}")]
    CatalogPathConflict {
        language: String,
        key: String,
        reason: String,
    },

    #[error("Key \"{key}\" is not a valid translation resource path.")]
    InvalidKey { key: String },

    #[error("\"{key}\" is not a key item; only single text items can be renamed or translated.")]
    NotAKeyNode { key: String },

    #[error("Renaming a key to \"{key}\" is not allowed.")]
    ReservedKey { key: String },

    #[error("New key \"{key}\" must be non-empty and differ from the current key.")]
    UnchangedKey { key: String },

    #[error("Language \"{language}\" is not configured.")]
    UnknownLanguage { language: String },

    /// The change watcher could not subscribe to a folder.
    #[error("Failed to watch '{}' for changes: {source}", path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Write-phase failure; nothing is rolled back, a rescan reconciles state.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LocalizerError {
    pub(crate) fn scan_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ScanIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn path_conflict(
        language: &str,
        key: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::CatalogPathConflict {
            language: language.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors detected before any file was touched.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::ScanIo { .. }
                | Self::MalformedCatalog { .. }
                | Self::Watch { .. }
                | Self::Io { .. }
        )
    }
}
