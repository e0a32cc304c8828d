use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

pub const HOME_HTML: &str = "<h1>{{ 'APP.HOME.TITLE' | translate }}</h1>\n<p>{{ 'WELCOME' | translate }}</p>\n";

pub const APP_TS: &str = "export class AppComponent {\n  ready = this.translateService.instant('APP.READY');\n}\n";

/// Test fixture for MCP integration tests
///
/// Manages a temporary Angular-like project with sources under src/ and
/// catalogs under src/assets/i18n/
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_root.join(".git"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Two source files and English/Dutch catalogs, Dutch partly missing.
    pub fn with_project() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_config(&serde_json::json!({"languages": "en,nl"}))?;
        fixture.write_file("src/app/home/home.component.html", HOME_HTML)?;
        fixture.write_file("src/app/app.component.ts", APP_TS)?;
        fixture.write_catalog(
            "en",
            &serde_json::json!({
                "APP": {"HOME": {"TITLE": "Home"}, "READY": "Ready"},
                "WELCOME": "Welcome"
            }),
        )?;
        fixture.write_catalog("nl", &serde_json::json!({"APP": {"HOME": {"TITLE": "Thuis"}}}))?;
        Ok(fixture)
    }

    pub fn write_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    /// Write a catalog to src/assets/i18n/<language>.json
    pub fn write_catalog(&self, language: &str, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for language: {}", language))?;
        self.write_file(&format!("src/assets/i18n/{}.json", language), &json_str)
    }

    /// Read a catalog from src/assets/i18n/<language>.json
    pub fn read_catalog(&self, language: &str) -> Result<Value> {
        let path = self
            .project_root
            .join("src/assets/i18n")
            .join(format!("{}.json", language));
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
    }

    pub fn read_file(&self, relative_path: &str) -> Result<String> {
        let path = self.project_root.join(relative_path);
        fs::read_to_string(&path).with_context(|| format!("Failed to read: {}", path.display()))
    }

    /// Write a .nglocrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)?;
        self.write_file(".nglocrc.json", &format!("{}\n", json_str))
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

/// Parse the JSON text content of a successful tool result.
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    // Check for errors using is_error field
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
