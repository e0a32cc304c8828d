use anyhow::{Context, Result};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @"✓ Created .nglocrc.json");

    let content = test.read_file(".nglocrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceRoot"], "./src");
    assert_eq!(parsed["i18nRoot"], "./src/assets/i18n");
    assert_eq!(parsed["languages"], "en");
    assert!(parsed["ignores"].is_array());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".nglocrc.json", "{}")?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(1));
    assert_eq!(output.stdout, "");
    assert_eq!(output.stderr, "Error: .nglocrc.json already exists\n");
    assert_eq!(test.read_file(".nglocrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("src/app/app.component.html", "{{ 'APP.TITLE' | translate }}")?;
    test.write_file("src/assets/i18n/en.json", r#"{"APP": {"TITLE": "Title"}}"#)?;

    let output = test.run(&["scan", "--missing"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_snapshot!(output.stdout, @"✓ 1 key, all translated");
    Ok(())
}
