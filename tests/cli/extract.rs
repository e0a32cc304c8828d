use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_extract_lists_sorted_keys() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["extract"])?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @r"
    APP.HOME.TITLE
    APP.READY
    WELCOME
    ");
    Ok(())
}

#[test]
fn test_extract_writes_output_file() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("src/app/other/other.component.html", "{{ 'WELCOME' | translate }}")?;

    let output = test.run(&["extract", "-o", "keys.txt"])?;

    assert_eq!(output.code, Some(0));
    assert_snapshot!(output.stdout, @"✓ Wrote 3 keys to keys.txt");
    assert_eq!(
        test.read_file("keys.txt")?,
        "APP.HOME.TITLE\nAPP.READY\nWELCOME\n"
    );
    Ok(())
}
