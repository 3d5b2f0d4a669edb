use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_render_default_locale() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .render_command("bot.Greetings", "greeting.hello")
        .args(["--arg", "name=Ann"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    insta::assert_snapshot!(stdout(&output).trim_end(), @"Hi Ann");
    Ok(())
}

#[test]
fn test_render_locale() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .render_command("bot.Greetings", "greeting.hello")
        .args(["--locale", "fr-FR", "--arg", "name=Ann"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Salut Ann\n");
    Ok(())
}

#[test]
fn test_render_falls_back_to_default() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file("localization/de_de/greetings.yaml", "{}\n")?;

    let output = test
        .render_command("bot.Greetings", "greeting.hello")
        .args(["--locale", "de-DE", "--arg", "name=Ann"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Hi Ann\n");
    Ok(())
}

#[test]
fn test_render_typed_argument() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file(
        "localization/en_us/greetings.yaml",
        "greeting:\n  hello: Hi {name}\nitems: !count:integer You have {count} items\n",
    )?;

    let output = test
        .render_command("bot.Greetings", "items")
        .args(["--arg", "count=3"])
        .output()?;
    assert_eq!(stdout(&output), "You have 3 items\n");

    let output = test
        .render_command("bot.Greetings", "items")
        .args(["--arg", "count=three"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("error: argument 'count' of 'items' expects integer, found text"));
    Ok(())
}

#[test]
fn test_render_unknown_key() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .render_command("bot.Greetings", "greeting.unknown")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("localization 'greeting.unknown' not found in bot.Greetings"));
    Ok(())
}

#[test]
fn test_render_unknown_contract() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test.render_command("bot.Missing", "greeting.hello").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no generated provider for contract 'bot.Missing'"));
    Ok(())
}

#[test]
fn test_render_unsupported_locale() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .render_command("bot.Greetings", "greeting.hello")
        .args(["--locale", "ja-JP", "--arg", "name=Ann"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("locale 'ja-JP' is not part of the generated locale set"));
    Ok(())
}

#[test]
fn test_render_malformed_argument() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .render_command("bot.Greetings", "greeting.hello")
        .args(["--arg", "Ann"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid argument 'Ann': expected NAME=VALUE"));
    Ok(())
}
