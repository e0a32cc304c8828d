//! Helper functions for MCP server operations.

use std::path::Path;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::config::{Overrides, Settings};
use crate::core::{LocalizerError, NodeId, ScanController, Tree};

/// Settings for a project, with nothing overridden.
pub fn load_settings(project_root_path: &str) -> Result<Settings, McpError> {
    Settings::load(Path::new(project_root_path), &Overrides::default())
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))
}

/// A controller holding a freshly built tree.
pub fn scanned_controller(settings: &Settings) -> Result<ScanController, McpError> {
    let mut controller = settings.controller();
    controller.scan().map_err(to_mcp_error)?;
    Ok(controller)
}

/// Refused requests become parameter errors; broken projects and I/O
/// failures become internal errors.
pub fn to_mcp_error(err: LocalizerError) -> McpError {
    if err.is_validation() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// The key node for `key`, narrowed to `file` (relative to the source root).
pub fn find_key_node(
    tree: &Tree,
    source_root: &Path,
    key: &str,
    file: Option<&str>,
) -> Result<NodeId, McpError> {
    let file = file.map(|f| source_root.join(f));
    match tree.find_keys(key, file.as_deref()).as_slice() {
        [id] => Ok(*id),
        [] => Err(McpError::invalid_params(
            format!("Key '{}' is not used in any scanned source file", key),
            None,
        )),
        many => Err(McpError::invalid_params(
            format!(
                "Key '{}' is used in {} files; pass 'file' to select one",
                key,
                many.len()
            ),
            None,
        )),
    }
}

pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
