use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::core::{KeyAction, RenameOutcome, Tree, preview::UsagePreview};

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Extract(ExtractSummary),
    Rename(RenameSummary),
    Translate(TranslateSummary),
    Search(SearchSummary),
    Watch(WatchSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub tree: Tree,
    pub missing_only: bool,
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Distinct keys, sorted.
    pub keys: Vec<String>,
    /// File the keys were written to, `None` for stdout.
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RenameSummary {
    pub outcome: RenameOutcome,
    pub source_root: PathBuf,
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub key: String,
    pub language: String,
    /// `None` when the catalog already held the same text.
    pub action: Option<KeyAction>,
    pub catalog: PathBuf,
}

#[derive(Debug)]
pub struct SearchHit {
    /// Slash-joined position in the key tree.
    pub path: String,
    pub is_key: bool,
    /// Source file relative to the source root, for key hits.
    pub file: Option<String>,
    /// Translations containing the text, as `(language, text)`.
    pub translations: Vec<(String, String)>,
    pub usages: Vec<UsagePreview>,
}

#[derive(Debug)]
pub struct SearchSummary {
    pub text: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug)]
pub struct WatchSummary {
    pub scan_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running an ngloc command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Things the user asked to be told about: missing translations, search
    /// misses, a refused init.
    pub finding_count: usize,
    /// If false, findings are informational and the run still exits with 0.
    pub exit_on_findings: bool,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            finding_count: 0,
            exit_on_findings: false,
        }
    }

    pub fn with_findings(mut self, count: usize) -> Self {
        self.finding_count = count;
        self.exit_on_findings = true;
        self
    }

    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::for_findings(self.finding_count, self.exit_on_findings)
    }
}
