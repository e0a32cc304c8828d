use ngloc::mcp::{
    NglocMcpServer,
    types::{RenameKeyParams, SetTranslationParams},
};
use rmcp::{handler::server::wrapper::Parameters, model::ErrorCode};
use serde_json::json;

use crate::{HOME_HTML, McpTestFixture, extract_tool_result_json};

fn rename(fixture: &McpTestFixture, key: &str, new_key: Option<&str>) -> RenameKeyParams {
    RenameKeyParams {
        project_root_path: fixture.root(),
        key: key.to_string(),
        new_key: new_key.map(String::from),
        file: None,
    }
}

fn translation(fixture: &McpTestFixture, key: &str, language: &str, text: &str) -> SetTranslationParams {
    SetTranslationParams {
        project_root_path: fixture.root(),
        key: key.to_string(),
        language: language.to_string(),
        text: text.to_string(),
    }
}

// ============================================================================
// rename_key tests
// ============================================================================

#[tokio::test]
async fn test_rename_key_to_suggested_key() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let result = server
        .rename_key(Parameters(rename(&fixture, "WELCOME", None)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["oldKey"], "WELCOME");
    assert_eq!(json_result["newKey"], "APP.HOME.WELCOME");
    assert_eq!(json_result["sourceFile"], "app/home/home.component.html");
    assert_eq!(json_result["replacedUsages"], 1);

    assert!(
        fixture
            .read_file("src/app/home/home.component.html")
            .unwrap()
            .contains("{{ 'APP.HOME.WELCOME' | translate }}")
    );
    assert_eq!(
        fixture.read_catalog("en").unwrap(),
        json!({"APP": {"HOME": {"TITLE": "Home", "WELCOME": "Welcome"}, "READY": "Ready"}})
    );
}

#[tokio::test]
async fn test_rename_key_refuses_taken_key() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let err = server
        .rename_key(Parameters(rename(&fixture, "APP.READY", Some("WELCOME"))))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("WELCOME"), "message: {}", err.message);
    assert!(
        fixture
            .read_file("src/app/app.component.ts")
            .unwrap()
            .contains("'APP.READY'")
    );
}

#[tokio::test]
async fn test_rename_key_shared_needs_file() {
    let fixture = McpTestFixture::with_project().unwrap();
    fixture
        .write_file("src/app/other/other.component.html", "{{ 'NEW' | translate }}")
        .unwrap();
    fixture
        .write_file("src/app/more/more.component.html", "{{ 'NEW' | translate }}")
        .unwrap();
    let server = NglocMcpServer::new();

    let err = server
        .rename_key(Parameters(rename(&fixture, "NEW", Some("APP.OTHER.NEW"))))
        .await
        .unwrap_err();
    assert!(err.message.contains("used in 2 files"), "message: {}", err.message);

    let mut params = rename(&fixture, "NEW", Some("APP.OTHER.NEW"));
    params.file = Some("app/other/other.component.html".to_string());
    let result = server.rename_key(Parameters(params)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["newKey"], "APP.OTHER.NEW");
    assert_eq!(
        fixture
            .read_file("src/app/other/other.component.html")
            .unwrap(),
        "{{ 'APP.OTHER.NEW' | translate }}"
    );
    assert_eq!(
        fixture.read_file("src/app/more/more.component.html").unwrap(),
        "{{ 'NEW' | translate }}"
    );
    assert_eq!(
        fixture.read_file("src/app/home/home.component.html").unwrap(),
        HOME_HTML
    );
}

// ============================================================================
// set_translation tests
// ============================================================================

#[tokio::test]
async fn test_set_translation_added_then_unchanged() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let result = server
        .set_translation(Parameters(translation(&fixture, "APP.READY", "nl", "Klaar")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["action"], "added");
    assert_eq!(json_result["language"], "nl");

    let result = server
        .set_translation(Parameters(translation(&fixture, "APP.READY", "NL", "Klaar")))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["action"], "unchanged");

    assert_eq!(
        fixture.read_catalog("nl").unwrap(),
        json!({"APP": {"HOME": {"TITLE": "Thuis"}, "READY": "Klaar"}})
    );
}

#[tokio::test]
async fn test_set_translation_unknown_language() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let err = server
        .set_translation(Parameters(translation(&fixture, "WELCOME", "de", "Willkommen")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Language \"de\" is not configured.");
    assert!(!fixture.root_path().join("src/assets/i18n/de.json").exists());
}

#[tokio::test]
async fn test_set_translation_unused_key() {
    let fixture = McpTestFixture::with_project().unwrap();
    let server = NglocMcpServer::new();

    let err = server
        .set_translation(Parameters(translation(&fixture, "NOT.USED", "en", "x")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}
