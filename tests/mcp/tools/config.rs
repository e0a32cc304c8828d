use ngloc::mcp::{NglocMcpServer, types::GetConfigParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = NglocMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["sourceRoot"], "./src");
    assert_eq!(json_result["config"]["i18nRoot"], "./src/assets/i18n");
    assert_eq!(json_result["config"]["languages"], json!(["en"]));
    assert!(json_result["config"]["ignores"].is_array());
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "sourceFolder": "app",
            "i18nFolder": "app/i18n",
            "languages": "EN, nl ,fr"
        }))
        .unwrap();
    let server = NglocMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["projectRoot"], fixture.root());
    assert_eq!(json_result["config"]["sourceRoot"], "app");
    assert_eq!(json_result["config"]["i18nRoot"], "app/i18n");
    assert_eq!(json_result["config"]["languages"], json!(["en", "nl", "fr"]));
}
