use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetConfigParams {
    /// Absolute path of the project root (the folder holding .nglocrc.json)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ScanKeysParams {
    /// Absolute path of the project root (the folder holding .nglocrc.json)
    pub project_root_path: String,
    /// Only return keys with at least one missing translation
    pub missing_only: Option<bool>,
    /// Only return keys whose text or translations contain this text (case-insensitive)
    pub filter: Option<String>,
    /// Maximum number of keys to return (default 50, max 100)
    pub limit: Option<u32>,
    /// Number of keys to skip
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameKeyParams {
    /// Absolute path of the project root (the folder holding .nglocrc.json)
    pub project_root_path: String,
    /// Current key
    pub key: String,
    /// New key; defaults to the conventional key for the file's folder
    pub new_key: Option<String>,
    /// Source file relative to the source root, required when the key is used in several files
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetTranslationParams {
    /// Absolute path of the project root (the folder holding .nglocrc.json)
    pub project_root_path: String,
    /// Key to translate
    pub key: String,
    /// Configured language code, e.g. "nl"
    pub language: String,
    /// Translation text
    pub text: String,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub project_root: String,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub source_root: String,
    pub i18n_root: String,
    pub languages: Vec<String>,
    pub ignores: Vec<String>,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            languages: c.language_list(),
            source_root: c.source_root,
            i18n_root: c.i18n_root,
            ignores: c.ignores,
        }
    }
}

// ============================================================
// Scan Types (scan_keys)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanKeysResult {
    pub stats: KeyStats,
    pub items: Vec<KeyEntry>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyStats {
    /// Key nodes in the whole tree (a key used in two files counts twice)
    pub total_keys: usize,
    pub missing_translations: usize,
    /// Missing translations per language, languages without any left out
    pub missing_per_language: Vec<LanguageCount>,
    /// Keys left after `missingOnly` and `filter`
    pub matched_keys: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

/// One key as used in one source file
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    pub key: String,
    /// Source file relative to the source root
    pub file_path: String,
    pub usages: Vec<UsageLocation>,
    pub translations: Vec<TranslationEntry>,
    pub missing_languages: Vec<String>,
    /// False when the key does not start with the namespace of its folders
    pub is_default_key: bool,
    /// Conventional key for this file's folder, present when it differs from `key`
    pub suggested_key: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub language: String,
    /// Null when the catalog has no text at the key path
    pub text: Option<String>,
}

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

// ============================================================
// Edit Types (rename_key, set_translation)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameKeyResult {
    pub old_key: String,
    pub new_key: String,
    /// Rewritten source file, relative to the source root
    pub source_file: String,
    pub replaced_usages: usize,
    /// Rewritten catalog files
    pub catalogs: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTranslationResult {
    pub key: String,
    pub language: String,
    /// "added", "updated" or "unchanged"
    pub action: String,
    pub catalog: String,
}
