use ngloc::mcp::{NglocMcpServer, types::ScanKeysParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

fn params(fixture: &McpTestFixture) -> ScanKeysParams {
    ScanKeysParams {
        project_root_path: fixture.root(),
        missing_only: None,
        filter: None,
        limit: None,
        offset: None,
    }
}

#[tokio::test]
async fn test_scan_keys_lists_all_keys() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let result = server
        .scan_keys(Parameters(params(&fixture)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["stats"]["totalKeys"], 3);
    assert_eq!(json_result["stats"]["missingTranslations"], 2);
    assert_eq!(
        json_result["stats"]["missingPerLanguage"],
        json!([{"language": "nl", "count": 2}])
    );
    assert_eq!(json_result["stats"]["matchedKeys"], 3);

    let keys: Vec<&str> = json_result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["APP.HOME.TITLE", "WELCOME", "APP.READY"]);
    assert_eq!(json_result["pagination"]["hasMore"], false);
}

#[tokio::test]
async fn test_scan_keys_item_details() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let result = server
        .scan_keys(Parameters(params(&fixture)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["items"][1],
        json!({
            "key": "WELCOME",
            "filePath": "app/home/home.component.html",
            "usages": [{"line": 2, "column": 8}],
            "translations": [
                {"language": "en", "text": "Welcome"},
                {"language": "nl", "text": null}
            ],
            "missingLanguages": ["nl"],
            "isDefaultKey": false,
            "suggestedKey": "APP.HOME.WELCOME"
        })
    );
    assert_eq!(json_result["items"][0]["isDefaultKey"], true);
    assert_eq!(json_result["items"][0]["suggestedKey"], json!(null));
}

#[tokio::test]
async fn test_scan_keys_pagination() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let mut scan = params(&fixture);
    scan.limit = Some(1);
    scan.offset = Some(1);
    let result = server.scan_keys(Parameters(scan)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["items"].as_array().unwrap().len(), 1);
    assert_eq!(json_result["items"][0]["key"], "WELCOME");
    assert_eq!(
        json_result["pagination"],
        json!({"offset": 1, "limit": 1, "hasMore": true})
    );
}

#[tokio::test]
async fn test_scan_keys_limit_is_capped() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let mut scan = params(&fixture);
    scan.limit = Some(1000);
    let result = server.scan_keys(Parameters(scan)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["pagination"]["limit"], 100);
}

#[tokio::test]
async fn test_scan_keys_missing_only_and_filter() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let mut missing = params(&fixture);
    missing.missing_only = Some(true);
    let result = server.scan_keys(Parameters(missing)).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["stats"]["matchedKeys"], 2);
    assert_eq!(json_result["items"][0]["key"], "WELCOME");

    let mut filtered = params(&fixture);
    filtered.filter = Some("THUIS".to_string());
    let result = server.scan_keys(Parameters(filtered)).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["stats"]["matchedKeys"], 1);
    assert_eq!(json_result["items"][0]["key"], "APP.HOME.TITLE");
}

#[tokio::test]
async fn test_scan_keys_malformed_catalog() {
    let fixture = McpTestFixture::with_project().unwrap();
    fixture
        .write_file("src/assets/i18n/nl.json", "[1, 2]")
        .unwrap();
    let server = NglocMcpServer::new();

    let err = server
        .scan_keys(Parameters(params(&fixture)))
        .await
        .unwrap_err();

    assert!(err.message.contains("nl.json"), "message: {}", err.message);
}
