//! Renames one key node across its source file and every language catalog.
//!
//! A rename is planned completely in memory before anything is written:
//! the source usages are re-validated against the file on disk and every
//! catalog edit is applied to a copy. Only when all of that succeeds are the
//! source file and the catalogs written, in that order. Write failures are
//! reported but not rolled back.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::core::{
    catalog::{Catalog, CatalogStore},
    error::{LocalizerError, LocalizerResult},
    extract::{TokenUsage, normalize_line_terminators},
    tree::{NEW_KEY, NodeId, Tree, is_valid_key},
};

/// What a successful rename touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub old_key: String,
    pub new_key: String,
    pub source_file: PathBuf,
    /// Occurrences replaced in `source_file`.
    pub replaced: usize,
    /// Catalog files rewritten, in language order.
    pub catalogs: Vec<PathBuf>,
}

pub struct KeyRenamer<'a> {
    store: &'a CatalogStore,
    languages: &'a [String],
}

impl<'a> KeyRenamer<'a> {
    pub fn new(store: &'a CatalogStore, languages: &'a [String]) -> Self {
        Self { store, languages }
    }

    /// Check that `id` may be renamed to `new_key` without touching any file.
    ///
    /// Refuses non-key nodes, reserved or malformed targets, and keys used by
    /// more than one key node: only one file is ever rewritten, so a shared
    /// key would end up half renamed.
    pub fn validate_rename(tree: &Tree, id: NodeId, new_key: &str) -> LocalizerResult<()> {
        let node = tree.node(id);
        let Some(item) = node.key_item() else {
            return Err(LocalizerError::NotAKeyNode {
                key: node.key.clone(),
            });
        };
        if item.full_filename.as_os_str().is_empty() {
            return Err(LocalizerError::NoSourceFile {
                key: node.key.clone(),
            });
        }

        let new_key = new_key.trim();
        if new_key.is_empty() || new_key == node.key {
            return Err(LocalizerError::UnchangedKey {
                key: new_key.to_string(),
            });
        }
        if new_key == NEW_KEY {
            return Err(LocalizerError::ReservedKey {
                key: new_key.to_string(),
            });
        }
        if !is_valid_key(new_key) {
            return Err(LocalizerError::InvalidKey {
                key: new_key.to_string(),
            });
        }

        if !node.is_new() {
            let others = tree.count_keys(&node.key, Some(id));
            if others > 0 {
                return Err(LocalizerError::AmbiguousRename {
                    key: node.key.clone(),
                    count: others,
                });
            }
        }
        let taken = tree.count_keys(new_key, None);
        if taken > 0 {
            return Err(LocalizerError::AmbiguousRename {
                key: new_key.to_string(),
                count: taken,
            });
        }
        Ok(())
    }

    /// Rename key node `id` to `new_key`.
    ///
    /// On success the node carries the new key and usages pointing at the
    /// rewritten file; the rest of the tree is stale until the next scan.
    pub fn rename(&self, tree: &mut Tree, id: NodeId, new_key: &str) -> LocalizerResult<RenameOutcome> {
        Self::validate_rename(tree, id, new_key)?;
        let new_key = new_key.trim();

        let node = tree.node(id);
        let old_key = node.key.clone();
        let Some(item) = node.key_item() else {
            return Err(LocalizerError::NotAKeyNode { key: old_key });
        };
        let source_file = item.full_filename.clone();

        let original = fs::read(&source_file).map_err(|e| LocalizerError::io(&source_file, e))?;
        let usages = sorted_usages(&item.usages);
        validate_usages(&original, &usages, &old_key, &source_file)?;

        let catalogs = self.plan_catalogs(tree, id, &old_key, new_key)?;

        let rewritten = replace_usages(original, &usages, new_key);
        fs::write(&source_file, &rewritten).map_err(|e| LocalizerError::io(&source_file, e))?;
        info!(file = %source_file.display(), from = %old_key, to = %new_key, occurrences = usages.len(), "rewrote source");

        let mut catalog_paths = Vec::with_capacity(catalogs.len());
        for catalog in &catalogs {
            catalog.save()?;
            info!(language = catalog.language(), path = %catalog.file_path().display(), "moved translation");
            catalog_paths.push(catalog.file_path().to_path_buf());
        }

        let node = tree.node_mut(id);
        node.key = new_key.to_string();
        if let Some(item) = node.key_item_mut() {
            item.usages = shifted_usages(&usages, new_key);
        }
        tree.mark_default_keys();

        Ok(RenameOutcome {
            old_key,
            new_key: new_key.to_string(),
            source_file,
            replaced: usages.len(),
            catalogs: catalog_paths,
        })
    }

    /// Load every catalog and apply the move to it in memory.
    fn plan_catalogs(
        &self,
        tree: &Tree,
        id: NodeId,
        old_key: &str,
        new_key: &str,
    ) -> LocalizerResult<Vec<Catalog>> {
        let item = tree.node(id).key_item();
        self.languages
            .iter()
            .map(|language| {
                let mut catalog = self.store.load(language)?;
                catalog.remove(old_key);
                let text = item
                    .and_then(|item| item.translation(language))
                    .and_then(|t| t.text.as_deref());
                if let Some(text) = text {
                    catalog.set(new_key, text)?;
                }
                Ok(catalog)
            })
            .collect()
    }
}

fn sorted_usages(usages: &[TokenUsage]) -> Vec<TokenUsage> {
    let mut sorted = usages.to_vec();
    sorted.sort_by_key(|u| u.begin);
    sorted
}

/// Usages must be ascending, non-overlapping and still hold `key` on disk.
fn validate_usages(
    content: &[u8],
    usages: &[TokenUsage],
    key: &str,
    path: &Path,
) -> LocalizerResult<()> {
    for pair in usages.windows(2) {
        if pair[1].begin < pair[0].end() {
            return Err(LocalizerError::OverlappingUsages {
                path: path.to_path_buf(),
                key: key.to_string(),
            });
        }
    }

    let normalized = normalize_line_terminators(content);
    for usage in usages {
        let found = normalized.get(usage.begin..usage.end());
        if found != Some(key.as_bytes()) {
            return Err(LocalizerError::StaleSource {
                path: path.to_path_buf(),
                key: key.to_string(),
                begin: usage.begin,
            });
        }
    }
    Ok(())
}

/// Replace from the highest offset down so lower offsets stay valid.
fn replace_usages(mut content: Vec<u8>, usages: &[TokenUsage], new_key: &str) -> Vec<u8> {
    for usage in usages.iter().rev() {
        content.splice(usage.begin..usage.end(), new_key.bytes());
    }
    content
}

/// Usages as they sit in the rewritten file.
fn shifted_usages(usages: &[TokenUsage], new_key: &str) -> Vec<TokenUsage> {
    let mut shift: isize = 0;
    usages
        .iter()
        .map(|usage| {
            let begin = (usage.begin as isize + shift) as usize;
            shift += new_key.len() as isize - usage.length as isize;
            TokenUsage {
                token: new_key.to_string(),
                begin,
                length: new_key.len(),
                full_filename: usage.full_filename.clone(),
            }
        })
        .collect()
}
