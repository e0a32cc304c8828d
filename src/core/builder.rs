//! Builds the extraction tree from a source folder and the language catalogs.
//!
//! Folders are visited depth-first. In every folder each extractor is applied
//! to the files matching its glob, usages are grouped per key text, and each
//! key gets one translation per configured language. Files and folders
//! without any key are pruned. Any unreadable entry aborts the whole scan.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use glob::Pattern;
use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::{
    catalog::{Catalog, CatalogStore},
    error::{LocalizerError, LocalizerResult},
    extract::{TokenExtractor, TokenUsage, default_extractors, scan_file},
    tree::{KeyItem, NodeDraft, NodeKind, Translation, Tree},
};

pub struct TreeBuilder {
    source_root: PathBuf,
    languages: Vec<String>,
    extractors: Vec<Box<dyn TokenExtractor>>,
    ignores: Vec<Pattern>,
}

/// Folder listing split into files and sub-folders, both sorted by name.
struct FolderEntries {
    files: Vec<PathBuf>,
    folders: Vec<PathBuf>,
}

struct ScanProgress<'a> {
    folders_total: usize,
    folders_done: usize,
    files_with_keys: usize,
    report: &'a mut dyn FnMut(f32),
}

impl ScanProgress<'_> {
    fn folder_done(&mut self) {
        self.folders_done += 1;
        let fraction = self.folders_done as f32 / self.folders_total.max(1) as f32;
        (self.report)(fraction.min(1.0));
    }
}

impl TreeBuilder {
    pub fn new(source_root: impl Into<PathBuf>, languages: Vec<String>) -> Self {
        Self {
            source_root: source_root.into(),
            languages,
            extractors: default_extractors(),
            ignores: Vec::new(),
        }
    }

    pub fn with_extractors(mut self, extractors: Vec<Box<dyn TokenExtractor>>) -> Self {
        self.extractors = extractors;
        self
    }

    /// Skip files and folders whose full path matches any of `ignores`.
    pub fn with_ignores(mut self, ignores: Vec<Pattern>) -> Self {
        self.ignores = ignores;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn build(&self, store: &CatalogStore) -> LocalizerResult<Tree> {
        self.build_with_progress(store, &mut |_| {})
    }

    /// Build the tree, reporting progress as a fraction of folders visited.
    ///
    /// `progress` always receives `0.0` first and `1.0` last, also on error.
    pub fn build_with_progress(
        &self,
        store: &CatalogStore,
        progress: &mut dyn FnMut(f32),
    ) -> LocalizerResult<Tree> {
        let started = Instant::now();
        progress(0.0);
        let result = self.scan(store, progress);
        progress(1.0);

        let (drafts, files_with_keys) = result?;
        let mut tree = Tree::from_drafts(drafts);
        tree.mark_default_keys();
        tree.recompute_aggregates();

        debug!(
            root = %self.source_root.display(),
            files = files_with_keys,
            keys = tree.node(tree.root()).text_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan finished"
        );
        Ok(tree)
    }

    fn scan(
        &self,
        store: &CatalogStore,
        progress: &mut dyn FnMut(f32),
    ) -> LocalizerResult<(Vec<NodeDraft>, usize)> {
        let catalogs = store.load_all(&self.languages)?;
        let folders_total = self.count_folders()?;
        let mut state = ScanProgress {
            folders_total,
            folders_done: 0,
            files_with_keys: 0,
            report: progress,
        };
        let drafts = self.process_folder(&self.source_root, &catalogs, &mut state)?;
        Ok((drafts, state.files_with_keys))
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.ignores.iter().any(|p| p.matches(&path_str))
    }

    fn count_folders(&self) -> LocalizerResult<usize> {
        let mut count = 0;
        let walker = WalkDir::new(&self.source_root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_ignored(e.path()));
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(&self.source_root, e))?;
            if entry.file_type().is_dir() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn list_folder(&self, dir: &Path) -> LocalizerResult<FolderEntries> {
        let mut entries = FolderEntries {
            files: Vec::new(),
            folders: Vec::new(),
        };
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(dir, e))?;
            if self.is_ignored(entry.path()) {
                continue;
            }
            if entry.file_type().is_dir() {
                entries.folders.push(entry.into_path());
            } else if entry.file_type().is_file() {
                entries.files.push(entry.into_path());
            }
        }
        Ok(entries)
    }

    fn process_folder(
        &self,
        dir: &Path,
        catalogs: &[Catalog],
        state: &mut ScanProgress<'_>,
    ) -> LocalizerResult<Vec<NodeDraft>> {
        let entries = self.list_folder(dir)?;

        let jobs: Vec<(&dyn TokenExtractor, &PathBuf)> = self
            .extractors
            .iter()
            .flat_map(|extractor| {
                entries
                    .files
                    .iter()
                    .filter(move |file| {
                        file.file_name()
                            .and_then(|n| n.to_str())
                            .is_some_and(|n| extractor.applies_to(n))
                    })
                    .map(move |file| (extractor.as_ref(), file))
            })
            .collect();

        let files: Vec<Option<NodeDraft>> = jobs
            .par_iter()
            .map(|(extractor, file)| file_draft(*extractor, file, catalogs))
            .collect::<LocalizerResult<_>>()?;

        let mut items: Vec<NodeDraft> = files.into_iter().flatten().collect();
        state.files_with_keys += items.len();

        for folder in &entries.folders {
            let children = self.process_folder(folder, catalogs, state)?;
            if !children.is_empty() {
                items.push(NodeDraft {
                    key: file_name(folder),
                    kind: NodeKind::Folder,
                    children,
                });
            }
        }

        state.folder_done();

        items.sort_by(|a, b| {
            b.is_folder()
                .cmp(&a.is_folder())
                .then_with(|| a.key.cmp(&b.key))
        });
        Ok(items)
    }
}

fn walk_error(fallback: &Path, err: walkdir::Error) -> LocalizerError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
    LocalizerError::scan_io(path, source)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// A file node with one key node per distinct key, or `None` without keys.
fn file_draft(
    extractor: &dyn TokenExtractor,
    path: &Path,
    catalogs: &[Catalog],
) -> LocalizerResult<Option<NodeDraft>> {
    let usages = scan_file(extractor, path)?;
    if usages.is_empty() {
        return Ok(None);
    }
    debug!(file = %path.display(), extractor = extractor.name(), usages = usages.len(), "extracted");

    let last_source_write = fs::metadata(path).and_then(|m| m.modified()).ok();
    let children = group_by_token(usages)
        .into_iter()
        .map(|(token, usages)| NodeDraft {
            kind: NodeKind::Key(KeyItem {
                full_filename: path.to_path_buf(),
                usages,
                translations: translations_for(&token, catalogs),
            }),
            key: token,
            children: Vec::new(),
        })
        .collect();

    Ok(Some(NodeDraft {
        key: file_name(path),
        kind: NodeKind::File {
            full_filename: path.to_path_buf(),
            last_source_write,
        },
        children,
    }))
}

/// Group usages by key text, keeping first-appearance order.
fn group_by_token(usages: Vec<TokenUsage>) -> Vec<(String, Vec<TokenUsage>)> {
    let mut groups: Vec<(String, Vec<TokenUsage>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for usage in usages {
        match index.get(&usage.token) {
            Some(i) => groups[*i].1.push(usage),
            None => {
                index.insert(usage.token.clone(), groups.len());
                groups.push((usage.token.clone(), vec![usage]));
            }
        }
    }
    groups
}

fn translations_for(key: &str, catalogs: &[Catalog]) -> Vec<Translation> {
    catalogs
        .iter()
        .map(|catalog| Translation {
            language: catalog.language().to_string(),
            text: catalog.get(key),
        })
        .collect()
}
