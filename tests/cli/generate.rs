use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_generate_to_stdout() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test.generate_command().output()?;
    let code = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(code.starts_with("// @generated by loccat. Do not edit.\n"));
    assert!(code.contains("pub enum Locale {\n    EnUs,\n    DeDe,\n    FrFr,\n}"));
    assert!(code.contains("pub mod bot_greetings {"));
    assert!(code.contains(
        "pub fn greeting_hello(locale: Locale, props: &Properties, name: &str) -> String {"
    ));

    let de = code
        .find(r#"Locale::DeDe => format!(r"Hallo {}", name),"#)
        .unwrap();
    let fr = code
        .find(r#"Locale::FrFr => format!(r"Salut {}", name),"#)
        .unwrap();
    let default = code.find(r#"_ => format!(r"Hi {}", name),"#).unwrap();
    assert!(de < fr && fr < default);
    Ok(())
}

#[test]
fn test_generate_to_file() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .generate_command()
        .args(["--output", "src/generated/catalog.rs"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\u{2713} Generated 1 accessor for 1 contract in src/generated/catalog.rs\n"
    );
    let code = test.read_file("src/generated/catalog.rs")?;
    assert!(code.contains("pub mod bot_greetings {"));
    Ok(())
}

#[test]
fn test_generate_adds_missing_extension() -> Result<()> {
    let test = CliTest::greetings()?;

    let output = test
        .generate_command()
        .args(["--output", "src/catalog"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with(" in src/catalog.rs\n"));
    assert!(test.root().join("src/catalog.rs").is_file());
    assert!(!test.root().join("src/catalog").exists());
    Ok(())
}

#[test]
fn test_generate_reports_to_stderr() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file("localization/de_de/greetings.yaml", "{}\n")?;

    let output = test.generate_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("missing-translation"));
    assert!(stderr(&output).contains("warning: \"greeting.hello\"  missing-translation"));
    Ok(())
}

#[test]
fn test_generate_build_failure_writes_nothing() -> Result<()> {
    let test = CliTest::greetings()?;
    test.write_file(
        "localization/en_us/greetings.yaml",
        "greeting:\n  hello: Hi {name}\n  Hello: Hey {name}\n",
    )?;

    let output = test
        .generate_command()
        .args(["--output", "catalog.rs"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("accessor-collision"));
    assert!(!test.root().join("catalog.rs").exists());
    Ok(())
}
