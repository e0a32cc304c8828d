use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::config::load_config;
use crate::core::{NodeId, Tree, preview::load_preview, search::find_all};

use super::helpers::{
    find_key_node, json_result, load_settings, relative_path, scanned_controller, to_mcp_error,
};
use super::types::{
    ConfigDto, ConfigValues, GetConfigParams, KeyEntry, KeyStats, LanguageCount, Pagination,
    RenameKeyParams, RenameKeyResult, ScanKeysParams, ScanKeysResult, SetTranslationParams,
    SetTranslationResult, TranslationEntry, UsageLocation,
};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 100;

#[derive(Clone)]
pub struct NglocMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for NglocMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl NglocMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the effective project configuration
    #[tool(
        description = "Get ngloc configuration: source root, i18n root, languages and ignore patterns."
    )]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            project_root: result.project_root.to_string_lossy().into_owned(),
            config: ConfigValues::from(result.config),
        })
    }

    /// List keys with their usages and translations
    #[tool(
        description = "Scan source files for translation keys. Returns a paginated list of keys with usage locations, translations per language and missing languages."
    )]
    pub async fn scan_keys(
        &self,
        params: Parameters<ScanKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);
        let missing_only = params.missing_only.unwrap_or(false);

        let settings = load_settings(&params.project_root_path)?;
        let controller = scanned_controller(&settings)?;
        let tree = controller.tree();

        let candidates = match params.filter.as_deref().filter(|f| !f.trim().is_empty()) {
            Some(filter) => find_all(tree, filter)
                .into_iter()
                .filter(|id| tree.node(*id).is_key())
                .collect(),
            None => tree.key_nodes(),
        };
        let matched: Vec<NodeId> = candidates
            .into_iter()
            .filter(|id| !missing_only || tree.node(*id).has_missing_translations())
            .collect();

        let items = matched
            .iter()
            .skip(offset)
            .take(limit)
            .map(|id| key_entry(tree, *id, &settings.source_root))
            .collect::<Result<Vec<_>, McpError>>()?;

        let root = tree.node(tree.root());
        json_result(&ScanKeysResult {
            stats: KeyStats {
                total_keys: root.text_count(),
                missing_translations: root.missing_count(),
                missing_per_language: root
                    .missing_per_language()
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(language, count)| LanguageCount {
                        language: language.clone(),
                        count: *count,
                    })
                    .collect(),
                matched_keys: matched.len(),
            },
            pagination: Pagination {
                offset,
                limit,
                has_more: offset + items.len() < matched.len(),
            },
            items,
        })
    }

    /// Rename a key in its source file and every catalog
    #[tool(
        description = "Rename a translation key in its source file and in every language catalog. Refused when the key is shared by several files, the new key is already in use, or the source changed since the scan."
    )]
    pub async fn rename_key(
        &self,
        params: Parameters<RenameKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let settings = load_settings(&params.project_root_path)?;
        let mut controller = scanned_controller(&settings)?;

        let id = find_key_node(
            controller.tree(),
            &settings.source_root,
            &params.key,
            params.file.as_deref(),
        )?;
        let new_key = match params.new_key {
            Some(new_key) => new_key,
            None => controller
                .tree()
                .default_key_name(id)
                .map_err(to_mcp_error)?,
        };
        let outcome = controller.rename(id, &new_key).map_err(to_mcp_error)?;

        json_result(&RenameKeyResult {
            source_file: relative_path(&outcome.source_file, &settings.source_root),
            replaced_usages: outcome.replaced,
            catalogs: outcome
                .catalogs
                .iter()
                .map(|c| c.to_string_lossy().into_owned())
                .collect(),
            old_key: outcome.old_key,
            new_key: outcome.new_key,
        })
    }

    /// Write one translation text
    #[tool(
        description = "Set the translation text of a key for one configured language. Intermediate objects are created as needed and keys stay sorted."
    )]
    pub async fn set_translation(
        &self,
        params: Parameters<SetTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let settings = load_settings(&params.project_root_path)?;
        let mut controller = scanned_controller(&settings)?;

        let Some(&id) = controller.tree().find_keys(&params.key, None).first() else {
            return Err(McpError::invalid_params(
                format!("Key '{}' is not used in any scanned source file", params.key),
                None,
            ));
        };
        let language = params.language.trim().to_lowercase();
        let action = controller
            .set_translation(id, &language, Some(&params.text))
            .map_err(to_mcp_error)?;

        json_result(&SetTranslationResult {
            key: params.key,
            action: action.map_or("unchanged", |a| a.as_str()).to_string(),
            catalog: controller
                .store()
                .language_path(&language)
                .to_string_lossy()
                .into_owned(),
            language,
        })
    }
}

fn key_entry(tree: &Tree, id: NodeId, source_root: &Path) -> Result<KeyEntry, McpError> {
    let node = tree.node(id);
    let Some(item) = node.key_item() else {
        return Err(McpError::internal_error(
            format!("'{}' is not a key node", node.key),
            None,
        ));
    };

    let usages = item
        .usages
        .iter()
        .map(|usage| {
            load_preview(usage).map(|p| UsageLocation {
                line: p.line,
                column: p.column,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_mcp_error)?;

    Ok(KeyEntry {
        key: node.key.clone(),
        file_path: relative_path(&item.full_filename, source_root),
        usages,
        translations: item
            .translations
            .iter()
            .map(|t| TranslationEntry {
                language: t.language.clone(),
                text: t.text.clone(),
            })
            .collect(),
        missing_languages: item
            .translations
            .iter()
            .filter(|t| t.is_missing())
            .map(|t| t.language.clone())
            .collect(),
        is_default_key: node.is_default_key,
        suggested_key: tree
            .default_key_name(id)
            .ok()
            .filter(|suggested| *suggested != node.key),
    })
}

#[tool_handler]
impl ServerHandler for NglocMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "ngloc MCP keeps translation keys in Angular-style sources consistent with per-language JSON catalogs.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. scan_keys - List keys with usages, translations and missing languages (paginated)\n\
                 3. rename_key - Rename a key in its source file and every catalog\n\
                 4. set_translation - Set the text of a key for one language\n\n\
                 Recommended Workflow:\n\
                 1. Use scan_keys with missingOnly to find untranslated keys\n\
                 2. Rename keys whose suggestedKey differs, so keys follow the folder namespace\n\
                 3. Fill in missing translations with set_translation\n\n\
                 IMPORTANT: Rename before translating. A rename moves existing translations,\n\
                 and every call rescans, so usage locations are always current."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = NglocMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
