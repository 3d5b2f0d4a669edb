use anyhow::Result;

use crate::{CONFIG, CONTRACTS, CliTest, stderr, stdout};

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Compiled 1 contract (1 key) from 3 source files - no issues found\n"
    );
    Ok(())
}

#[test]
fn test_missing_translation() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file("localization/de_de/greetings.yaml", "{}\n")?;

    let output = test.check_command().output()?;
    let root = test.root().display().to_string();
    let report = stdout(&output).replace(&root, "[ROOT]");

    assert_eq!(output.status.code(), Some(0));
    insta::assert_snapshot!(report.trim_end(), @r#"
    warning: "greeting.hello"  missing-translation
      --> [ROOT]/localization/de_de/greetings.yaml
       |
       | greeting.hello
       | ^^^^^^^^^^^^^^
       = note: missing in de-DE

    ✘ 1 problem (0 errors, 1 warning)
    "#);
    Ok(())
}

#[test]
fn test_missing_default() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file(
        "localization/de_de/greetings.yaml",
        "greeting:\n  hello: Hallo {name}\n  bye: Tschüss\n",
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("warning: \"greeting.bye\"  missing-default"));
    assert!(out.contains("= note: missing in default locale en-US, defined in: de-DE"));
    assert!(out.contains("= hint: other locales fall back to de-DE"));
    Ok(())
}

#[test]
fn test_missing_source() -> Result<()> {
    let test = CliTest::with_file(".loccatrc.json", CONFIG)?;
    test.write_file("contracts.json", CONTRACTS)?;
    test.write_file(
        "localization/en_us/greetings.yaml",
        "greeting:\n  hello: Hi {name}\n",
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("warning: no de-DE source for 'greetings'  missing-source"));
    assert!(out.contains("warning: no fr-FR source for 'greetings'  missing-source"));
    assert!(out.contains("2 problems (0 errors, 2 warnings)"));
    Ok(())
}

#[test]
fn test_declared_key_without_template_fails() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file(
        "contracts.json",
        r#"{"contracts": [{"name": "bot.Greetings", "methods": [
            {"name": "farewell", "parameters": [{"name": "locale", "type": "Locale", "role": "locale"}]}
        ]}]}"#,
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"farewell\"  missing-template"));
    assert!(out.contains("= note: declared by bot.Greetings but defined in no locale"));
    Ok(())
}

#[test]
fn test_invalid_declaration_aborts_build() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file(
        "contracts.json",
        r#"{"contracts": [{"name": "bot.Greetings", "methods": [{"name": "farewell"}]}]}"#,
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("expected exactly one locale parameter, found 0"));
    assert!(out.contains("invalid-declaration"));
    Ok(())
}

#[test]
fn test_conflicting_tags_abort_build() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file(
        "localization/en_us/greetings.yaml",
        "farewell: !name:text Bye {name}\n",
    )?;
    test.write_file(
        "localization/de_de/greetings.yaml",
        "farewell: !name:integer Tschüss {name}\n",
    )?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: conflicting parameter lists for 'farewell'"));
    assert!(out.contains("schema-conflict"));
    assert!(out.contains("1 problem (1 error, 0 warnings)"));
    Ok(())
}

#[test]
fn test_default_locale_override() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .check_command()
        .args(["--default-locale", "de-DE"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let output = test
        .check_command()
        .args(["--default-locale", "ja-JP"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    Ok(())
}

#[test]
fn test_path_argument() -> Result<()> {
    let test = CliTest::greetings()?;
    let other = CliTest::new()?;

    let output = other
        .check_command()
        .arg("--path")
        .arg(test.root())
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Compiled 1 contract"));
    Ok(())
}

#[test]
fn test_invalid_contracts_file() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file("contracts.json", "{ not json")?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse contracts file"));
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["check", "render", "generate", "init"] {
        assert!(out.contains(command), "help should list {}", command);
    }
    Ok(())
}
