use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{CatalogStore, ScanController, TreeBuilder};

pub const CONFIG_FILE_NAME: &str = ".nglocrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Folder scanned for `*.html` and `*.ts` files.
    #[serde(default = "default_source_root", alias = "sourceFolder")]
    pub source_root: String,
    /// Folder holding one `<language>.json` catalog per language.
    #[serde(default = "default_i18n_root", alias = "i18nFolder")]
    pub i18n_root: String,
    /// Comma-separated language codes, e.g. `"en,nl,fr"`.
    #[serde(default = "default_languages")]
    pub languages: String,
    /// Glob patterns matched against full paths; matches are not scanned.
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_source_root() -> String {
    "./src".to_string()
}

fn default_i18n_root() -> String {
    "./src/assets/i18n".to_string()
}

fn default_languages() -> String {
    "en".to_string()
}

fn default_ignores() -> Vec<String> {
    vec!["*/node_modules".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            i18n_root: default_i18n_root(),
            languages: default_languages(),
            ignores: default_ignores(),
        }
    }
}

/// Split a comma-separated language list, trimming and lower-casing entries.
///
/// A code listed twice is kept once, at its first position.
pub fn parse_languages(languages: &str) -> Vec<String> {
    let mut parsed: Vec<String> = Vec::new();
    for language in languages.split(',').map(|l| l.trim().to_lowercase()) {
        if !language.is_empty() && !parsed.contains(&language) {
            parsed.push(language);
        }
    }
    parsed
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or no
    /// language is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        if self.language_list().is_empty() {
            bail!("Must have at least one language in 'languages'.");
        }
        Ok(())
    }

    pub fn language_list(&self) -> Vec<String> {
        parse_languages(&self.languages)
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
            .collect()
    }

    /// `source_root` resolved against `project_root` when relative.
    pub fn source_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.source_root)
    }

    pub fn i18n_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.i18n_root)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Folder relative paths are resolved against: the config file's folder,
    /// or the start folder without a config file.
    pub project_root: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let project_root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                project_root,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            project_root: start_dir.to_path_buf(),
        }),
    }
}

/// Values given on the command line, taking precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub source_root: Option<PathBuf>,
    pub i18n_root: Option<PathBuf>,
    pub languages: Option<String>,
}

/// Effective folders and languages for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source_root: PathBuf,
    pub i18n_root: PathBuf,
    pub languages: Vec<String>,
    pub ignores: Vec<Pattern>,
    pub from_file: bool,
}

impl Settings {
    /// Load the config found from `start_dir` and apply `overrides`.
    ///
    /// Overridden folders are relative to `start_dir`, configured ones to the
    /// folder holding the config file.
    pub fn load(start_dir: &Path, overrides: &Overrides) -> Result<Self> {
        let ConfigLoadResult {
            config,
            from_file,
            project_root,
        } = load_config(start_dir)?;

        let languages = match &overrides.languages {
            Some(languages) => parse_languages(languages),
            None => config.language_list(),
        };
        if languages.is_empty() {
            bail!("Must have at least one language in 'languages'.");
        }

        Ok(Self {
            source_root: overrides
                .source_root
                .as_ref()
                .map(|p| start_dir.join(p))
                .unwrap_or_else(|| config.source_path(&project_root)),
            i18n_root: overrides
                .i18n_root
                .as_ref()
                .map(|p| start_dir.join(p))
                .unwrap_or_else(|| config.i18n_path(&project_root)),
            languages,
            ignores: config.ignore_patterns()?,
            from_file,
        })
    }

    pub fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new(&self.source_root, self.languages.clone()).with_ignores(self.ignores.clone())
    }

    pub fn catalog_store(&self) -> CatalogStore {
        CatalogStore::new(&self.i18n_root)
    }

    /// A controller without change notifications, for one-shot commands.
    pub fn controller(&self) -> ScanController {
        ScanController::unwatched(self.tree_builder(), self.catalog_store())
    }
}
