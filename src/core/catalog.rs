//! Per-language JSON translation catalogs.
//!
//! One file per language at `<i18n_root>/<language>.json`. Keys are
//! dot-separated paths into nested objects, leaves are strings:
//!
//! ```json
//! {
//!   "HOME": {
//!     "TITLE": "Welcome"
//!   }
//! }
//! ```
//!
//! New siblings are inserted case-insensitively sorted; existing order is
//! kept (serde_json's `preserve_order`). A path ends in either a scalar or an
//! object, never both.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::error::{LocalizerError, LocalizerResult};

/// Content written for a catalog file that does not exist yet.
const EMPTY_CATALOG: &str = "{ }";

/// Action taken on a key by [`Catalog::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
        }
    }
}

/// An in-memory catalog for one language.
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    file_path: PathBuf,
    data: Map<String, Value>,
}

impl Catalog {
    /// Parse catalog `content` read from `file_path`.
    pub fn parse(language: &str, file_path: &Path, content: &str) -> LocalizerResult<Self> {
        let malformed = |reason: String| LocalizerError::MalformedCatalog {
            path: file_path.to_path_buf(),
            reason,
        };
        let value: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
        match value {
            Value::Object(data) => Ok(Self {
                language: language.to_string(),
                file_path: file_path.to_path_buf(),
                data,
            }),
            _ => Err(malformed("root must be an object".to_string())),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolve `key` to its scalar text.
    ///
    /// Returns `None` when the path is missing, stops early at a scalar, or
    /// ends at an object.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.data.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        match current {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Store `text` at `key`, creating intermediate objects as needed.
    pub fn set(&mut self, key: &str, text: &str) -> LocalizerResult<KeyAction> {
        let parts = split_key(key)?;
        set_path(
            &mut self.data,
            &parts,
            Value::String(text.to_string()),
            &PathContext {
                language: &self.language,
                key,
            },
            0,
        )
    }

    /// Remove the scalar at `key` and prune ancestors left empty.
    ///
    /// Missing paths are not an error. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let parts: Vec<&str> = key.split('.').collect();
        remove_path(&mut self.data, &parts)
    }

    /// Pretty-printed JSON with 2-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> String {
        let content = serde_json::to_string_pretty(&self.data).unwrap_or_else(|_| "{}".to_string());
        format!("{}\n", content)
    }

    pub fn save(&self) -> LocalizerResult<()> {
        fs::write(&self.file_path, self.to_json_string())
            .map_err(|e| LocalizerError::io(&self.file_path, e))?;
        debug!(language = %self.language, path = %self.file_path.display(), "saved catalog");
        Ok(())
    }
}

struct PathContext<'a> {
    language: &'a str,
    key: &'a str,
}

fn split_key(key: &str) -> LocalizerResult<Vec<&str>> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(LocalizerError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(parts)
}

fn set_path(
    map: &mut Map<String, Value>,
    parts: &[&str],
    value: Value,
    ctx: &PathContext<'_>,
    depth: usize,
) -> LocalizerResult<KeyAction> {
    let (head, rest) = match parts.split_first() {
        Some(split) => split,
        None => {
            return Err(LocalizerError::InvalidKey {
                key: ctx.key.to_string(),
            });
        }
    };

    if rest.is_empty() {
        return match map.get_mut(*head) {
            Some(Value::Object(_) | Value::Array(_)) => Err(LocalizerError::path_conflict(
                ctx.language,
                ctx.key,
                "the path exists but does not lead to a text value; a longer key probably already uses it",
            )),
            Some(existing) => {
                *existing = value;
                Ok(KeyAction::Updated)
            }
            None => {
                sorted_insert(map, head, value);
                Ok(KeyAction::Added)
            }
        };
    }

    if !map.contains_key(*head) {
        sorted_insert(map, head, Value::Object(Map::new()));
    }
    match map.get_mut(*head) {
        Some(Value::Object(child)) => set_path(child, rest, value, ctx, depth + 1),
        _ => {
            let parent = ctx.key.split('.').take(depth + 1).collect::<Vec<_>>().join(".");
            Err(LocalizerError::path_conflict(
                ctx.language,
                ctx.key,
                format!(
                    "{} is a subpath of {} which is used as key of another text item. Rename either of both keys.",
                    ctx.key, parent
                ),
            ))
        }
    }
}

/// Insert before the first sibling whose lower-cased name sorts after `name`.
fn sorted_insert(map: &mut Map<String, Value>, name: &str, value: Value) {
    let name_lower = name.to_lowercase();
    let index = map
        .keys()
        .position(|existing| existing.to_lowercase() > name_lower)
        .unwrap_or(map.len());
    map.shift_insert(index, name.to_string(), value);
}

fn remove_path(map: &mut Map<String, Value>, parts: &[&str]) -> bool {
    let Some((head, rest)) = parts.split_first() else {
        return false;
    };

    if rest.is_empty() {
        return match map.get(*head) {
            Some(Value::Object(_)) | None => false,
            Some(_) => map.shift_remove(*head).is_some(),
        };
    }

    let removed = match map.get_mut(*head) {
        Some(Value::Object(child)) => remove_path(child, rest),
        _ => return false,
    };
    if removed && matches!(map.get(*head), Some(Value::Object(child)) if child.is_empty()) {
        map.shift_remove(*head);
    }
    removed
}

/// Loads and saves catalogs under one i18n folder.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    i18n_root: PathBuf,
}

impl CatalogStore {
    pub fn new(i18n_root: impl Into<PathBuf>) -> Self {
        Self {
            i18n_root: i18n_root.into(),
        }
    }

    pub fn i18n_root(&self) -> &Path {
        &self.i18n_root
    }

    pub fn language_path(&self, language: &str) -> PathBuf {
        self.i18n_root.join(format!("{}.json", language))
    }

    /// Load the catalog for `language`, creating an empty file if absent.
    pub fn load(&self, language: &str) -> LocalizerResult<Catalog> {
        let path = self.language_path(language);
        if !path.exists() {
            fs::create_dir_all(&self.i18n_root).map_err(|e| LocalizerError::io(&self.i18n_root, e))?;
            fs::write(&path, EMPTY_CATALOG).map_err(|e| LocalizerError::io(&path, e))?;
            debug!(language, path = %path.display(), "initialized empty catalog");
        }
        let content = fs::read_to_string(&path).map_err(|e| LocalizerError::scan_io(&path, e))?;
        Catalog::parse(language, &path, &content)
    }

    /// Load catalogs for all `languages`, in order.
    pub fn load_all(&self, languages: &[String]) -> LocalizerResult<Vec<Catalog>> {
        languages.iter().map(|l| self.load(l)).collect()
    }

    /// Write one translation text and save.
    ///
    /// Returns `None` without writing when `text` is `None` or already stored.
    pub fn save_translation(
        &self,
        language: &str,
        key: &str,
        text: Option<&str>,
    ) -> LocalizerResult<Option<KeyAction>> {
        let Some(text) = text else {
            return Ok(None);
        };
        let mut catalog = self.load(language)?;
        if catalog.get(key).as_deref() == Some(text) {
            return Ok(None);
        }
        let action = catalog.set(key, text)?;
        catalog.save()?;
        Ok(Some(action))
    }

    /// Remove one translation and save. Nothing is written when the key
    /// had no text.
    pub fn remove_translation(&self, language: &str, key: &str) -> LocalizerResult<bool> {
        let mut catalog = self.load(language)?;
        let removed = catalog.remove(key);
        if removed {
            catalog.save()?;
        }
        Ok(removed)
    }
}
