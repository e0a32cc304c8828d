use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::CliTest;

#[test]
fn test_translate_adds_missing_text() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["translate", "WELCOME", "Welkom", "-l", "nl"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(
        output
            .stdout
            .starts_with("✓ Added nl translation for WELCOME\n")
    );
    assert_eq!(
        test.read_json("src/assets/i18n/nl.json")?,
        json!({"APP": {"HOME": {"TITLE": "Thuis"}}, "WELCOME": "Welkom"})
    );

    let output = test.run(&["scan", "--missing"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("1 missing translation in 3 keys (nl:1)"));
    Ok(())
}

#[test]
fn test_translate_updates_and_reports_unchanged() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["translate", "APP.HOME.TITLE", "Startpagina", "-l", "nl"])?;
    assert!(output.stdout.starts_with("✓ Updated nl translation for APP.HOME.TITLE\n"));

    let output = test.run(&["translate", "APP.HOME.TITLE", "Startpagina", "-l", "nl"])?;
    assert!(
        output
            .stdout
            .starts_with("✓ nl translation for APP.HOME.TITLE is unchanged\n")
    );
    assert_eq!(
        test.read_json("src/assets/i18n/nl.json")?,
        json!({"APP": {"HOME": {"TITLE": "Startpagina"}}})
    );
    Ok(())
}

#[test]
fn test_translate_unknown_language() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["translate", "WELCOME", "Bienvenue", "-l", "fr"])?;

    assert_eq!(output.code, Some(2));
    assert_eq!(output.stderr, "Error: Language \"fr\" is not configured.\n");
    assert!(!test.root().join("src/assets/i18n/fr.json").exists());
    Ok(())
}

#[test]
fn test_translate_path_conflict_touches_nothing() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("src/app/home/title.component.html", "{{ 'APP.HOME.TITLE.SUB' | translate }}")?;

    let output = test.run(&["translate", "APP.HOME.TITLE.SUB", "Sub", "-l", "en"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("APP.HOME.TITLE.SUB"), "stderr: {}", output.stderr);
    assert_eq!(
        test.read_json("src/assets/i18n/en.json")?["APP"]["HOME"]["TITLE"],
        json!("Home")
    );
    Ok(())
}
