use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod extract;
mod init;
mod rename;
mod scan;
mod translate;

const BIN_NAME: &str = "ngloc";

pub const HOME_HTML: &str = "<h1>{{ 'APP.HOME.TITLE' | translate }}</h1>\n<p>{{ 'WELCOME' | translate }}</p>\n";

pub const APP_TS: &str = "export class AppComponent {\n  ready = this.translateService.instant('APP.READY');\n}\n";

pub const EN_JSON: &str = r#"{
  "APP": {
    "HOME": {
      "TITLE": "Home"
    },
    "READY": "Ready"
  },
  "WELCOME": "Welcome"
}"#;

pub const NL_JSON: &str = r#"{
  "APP": {
    "HOME": {
      "TITLE": "Thuis"
    }
  }
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

/// Captured outcome of one run.
pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A small project: two source files, English and Dutch catalogs.
    pub fn with_project() -> Result<Self> {
        let test = Self::new()?;
        test.write_file(
            ".nglocrc.json",
            r#"{"sourceRoot": "./src", "i18nRoot": "./src/assets/i18n", "languages": "en,nl"}"#,
        )?;
        test.write_file("src/app/home/home.component.html", HOME_HTML)?;
        test.write_file("src/app/app.component.ts", APP_TS)?;
        test.write_file("src/assets/i18n/en.json", EN_JSON)?;
        test.write_file("src/assets/i18n/nl.json", NL_JSON)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<RunOutput> {
        let output = self.command().args(args).output()?;
        Ok(RunOutput {
            code: output.status.code(),
            stdout: String::from_utf8(output.stdout)?,
            stderr: String::from_utf8(output.stderr)?,
        })
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<serde_json::Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}
