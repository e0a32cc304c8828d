use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_scan_prints_tree() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["scan"])?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @r"
    app                      3 keys  nl:2
      home                   2 keys  nl:1
        home.component.html  2 keys  nl:1
          TITLE
          WELCOME            nl
      app.component.ts       1 key   nl:1
        READY                nl

    ✘ 2 missing translations in 3 keys (nl:2)
    ");
    Ok(())
}

#[test]
fn test_scan_missing_fails_with_findings() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["scan", "--missing"])?;

    assert_eq!(output.code, Some(1));
    assert!(!output.stdout.contains("TITLE"));
    assert!(output.stdout.contains("WELCOME"));
    assert!(output.stdout.contains("READY"));
    Ok(())
}

#[test]
fn test_scan_missing_passes_when_translated() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["scan", "--missing", "--languages", "en"])?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @"✓ 3 keys, all translated");
    Ok(())
}

#[test]
fn test_scan_counts_repeated_language_once() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["scan", "--missing", "--languages", "en,NL,nl"])?;

    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .contains("✘ 2 missing translations in 3 keys (nl:2)")
    );
    Ok(())
}

#[test]
fn test_scan_creates_missing_catalog() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["scan", "--languages", "en,de"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("de:3"));
    assert_eq!(test.read_file("src/assets/i18n/de.json")?, "{ }");
    Ok(())
}

#[test]
fn test_scan_malformed_catalog_is_an_error() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("src/assets/i18n/nl.json", "{ \"APP\": ")?;

    let output = test.run(&["scan"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("nl.json"), "stderr: {}", output.stderr);
    Ok(())
}

#[test]
fn test_scan_without_config_uses_defaults() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app/app.component.html", "{{ 'APP.OK' | translate }}")?;

    let output = test.run(&["scan"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("OK"));
    assert!(test.root().join("src/assets/i18n/en.json").exists());
    Ok(())
}
