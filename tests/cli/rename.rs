use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, HOME_HTML};

#[test]
fn test_rename_to_default_key() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["rename", "WELCOME"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let mut lines = output.stdout.lines();
    assert_eq!(lines.next(), Some("✓ Renamed WELCOME -> APP.HOME.WELCOME"));
    assert_eq!(
        lines.next(),
        Some("  --> app/home/home.component.html (1 usage)")
    );

    assert_eq!(
        test.read_file("src/app/home/home.component.html")?,
        "<h1>{{ 'APP.HOME.TITLE' | translate }}</h1>\n<p>{{ 'APP.HOME.WELCOME' | translate }}</p>\n"
    );
    assert_eq!(
        test.read_json("src/assets/i18n/en.json")?,
        json!({"APP": {"HOME": {"TITLE": "Home", "WELCOME": "Welcome"}, "READY": "Ready"}})
    );
    assert_eq!(
        test.read_json("src/assets/i18n/nl.json")?,
        json!({"APP": {"HOME": {"TITLE": "Thuis"}}})
    );
    Ok(())
}

#[test]
fn test_rename_to_explicit_key_keeps_sorted_catalog() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["rename", "APP.READY", "APP.STATUS.READY"])?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(
        test.read_file("src/app/app.component.ts")?
            .contains("instant('APP.STATUS.READY')")
    );
    assert_eq!(
        test.read_json("src/assets/i18n/en.json")?,
        json!({"APP": {"HOME": {"TITLE": "Home"}, "STATUS": {"READY": "Ready"}}, "WELCOME": "Welcome"})
    );
    let en = test.read_file("src/assets/i18n/en.json")?;
    let home = en.find("\"HOME\"").unwrap();
    let status = en.find("\"STATUS\"").unwrap();
    assert!(home < status, "keys should stay sorted: {}", en);
    Ok(())
}

#[test]
fn test_rename_refuses_key_in_use() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["rename", "WELCOME", "APP.HOME.TITLE"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("APP.HOME.TITLE"), "stderr: {}", output.stderr);
    assert_eq!(test.read_file("src/app/home/home.component.html")?, HOME_HTML);
    Ok(())
}

#[test]
fn test_rename_shared_key_is_refused() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("src/app/other/other.component.html", "{{ 'WELCOME' | translate }}")?;

    let output = test.run(&["rename", "WELCOME", "APP.WELCOME"])?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("--file"), "stderr: {}", output.stderr);

    let output = test.run(&[
        "rename",
        "WELCOME",
        "APP.WELCOME",
        "--file",
        "app/other/other.component.html",
    ])?;
    assert_eq!(output.code, Some(2));
    assert!(
        output.stderr.contains("already used in 1 other place"),
        "stderr: {}",
        output.stderr
    );
    assert_eq!(test.read_file("src/app/home/home.component.html")?, HOME_HTML);
    Ok(())
}

#[test]
fn test_rename_unknown_key() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["rename", "MISSING.KEY", "OTHER.KEY"])?;

    assert_eq!(output.code, Some(2));
    assert_eq!(
        output.stderr,
        "Error: Key \"MISSING.KEY\" is not used in any source file\n"
    );
    Ok(())
}
