//! Token extraction: pattern-based scanners that find translation key literals.
//!
//! Scanners work on raw bytes so that every reported offset is a byte offset
//! into the file exactly as it sits on disk. The only preprocessing is
//! [`normalize_line_terminators`], which swaps `\r` for a space and therefore
//! never moves a byte.
//!
//! ## Module Structure
//!
//! - `markup`: `{{ 'KEY' | translate }}` in `*.html` templates
//! - `script`: `translateService.instant('KEY')` / `.get('KEY')` in `*.ts` files

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;

use crate::core::error::{LocalizerError, LocalizerResult};

pub mod markup;
pub mod script;

pub use markup::MarkupExtractor;
pub use script::ScriptExtractor;

/// One occurrence of a key literal inside a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUsage {
    /// The key text between the quotes.
    pub token: String,
    /// Byte offset of the first key byte.
    pub begin: usize,
    /// Length of the key text in bytes.
    pub length: usize,
    pub full_filename: PathBuf,
}

impl TokenUsage {
    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.begin + self.length
    }
}

/// A scanner for one kind of source file.
///
/// The tree builder and rename engine only depend on this trait, so a real
/// parser can replace a regex scanner without touching either.
pub trait TokenExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Glob matched against the bare file name (e.g. `*.html`).
    fn file_pattern(&self) -> &Pattern;

    /// Lazily yield usages found in already-normalized `content`.
    fn extract<'a>(
        &'a self,
        content: &'a [u8],
        path: &'a Path,
    ) -> Box<dyn Iterator<Item = TokenUsage> + 'a>;

    fn applies_to(&self, file_name: &str) -> bool {
        self.file_pattern().matches(file_name)
    }
}

/// The scanners shipped with ngloc, in the order they are applied per folder.
pub fn default_extractors() -> Vec<Box<dyn TokenExtractor>> {
    vec![Box::new(MarkupExtractor), Box::new(ScriptExtractor)]
}

/// Replace every `\r` with a space so CRLF files scan like LF files.
///
/// Length and the position of every other byte are unchanged.
pub fn normalize_line_terminators(content: &[u8]) -> Cow<'_, [u8]> {
    if !content.contains(&b'\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(
        content
            .iter()
            .map(|&b| if b == b'\r' { b' ' } else { b })
            .collect(),
    )
}

/// Read `path` and collect every usage `extractor` finds in it.
pub fn scan_file(extractor: &dyn TokenExtractor, path: &Path) -> LocalizerResult<Vec<TokenUsage>> {
    let raw = fs::read(path).map_err(|e| LocalizerError::scan_io(path, e))?;
    let content = normalize_line_terminators(&raw);
    Ok(extractor.extract(&content, path).collect())
}

/// Decode a matched key. Non UTF-8 bytes are replaced, which makes the key
/// fail later byte comparisons instead of silently matching.
pub(crate) fn token_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
