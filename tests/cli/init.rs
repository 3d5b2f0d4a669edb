use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["locales"], serde_json::json!(["en-US"]));
    assert_eq!(parsed["localizationDirectory"], "localization");
    assert_eq!(parsed["locationFormat"], "%locale%/%name%.yaml");
    assert_eq!(parsed["contracts"], "contracts.json");
    assert!(
        parsed.get("defaultLocale").is_none(),
        "defaultLocale should be omitted when unset"
    );

    // 2-space indentation
    assert!(content.contains("\n  \""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\u{2713} Wrote default configuration to .loccatrc.json\n"
    );
    assert!(test.root().join(".loccatrc.json").exists());

    let content = test.read_file(".loccatrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".loccatrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "error: .loccatrc.json already exists; remove it to start from the defaults\n"
    );
    assert_eq!(test.read_file(".loccatrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_into_directory() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir(test.root().join("bot"))?;

    let output = test.command().args(["init", "--path", "bot"]).output()?;

    assert!(output.status.success());
    assert!(test.root().join("bot/.loccatrc.json").exists());
    assert!(!test.root().join(".loccatrc.json").exists());

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "contracts.json",
        r#"{"contracts": [{"name": "Greetings"}]}"#,
    )?;
    test.write_file("localization/en_us/greetings.yaml", "hello: Hi\n")?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = test.render_command("Greetings", "hello").output()?;
    assert_eq!(stdout(&output), "Hi\n");

    Ok(())
}
