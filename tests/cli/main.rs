use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod generate;
mod init;
mod render;

const BIN_NAME: &str = "loccat";

pub const CONFIG: &str = r#"{
  "locales": ["en-US", "de-DE", "fr-FR"],
  "defaultLocale": "en-US",
  "botPackage": "bot"
}"#;

pub const CONTRACTS: &str = r#"{
  "contracts": [
    {
      "name": "bot.Greetings",
      "methods": [
        {
          "name": "greetingHello",
          "parameters": [
            { "name": "locale", "type": "Locale", "role": "locale" },
            { "name": "name", "type": "String" }
          ]
        }
      ]
    }
  ]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A project with one contract and a source for every locale.
    pub fn greetings() -> Result<Self> {
        let test = Self::with_file(".loccatrc.json", CONFIG)?;
        test.write_file("contracts.json", CONTRACTS)?;
        test.write_file(
            "localization/en_us/greetings.yaml",
            "greeting:\n  hello: Hi {name}\n",
        )?;
        test.write_file(
            "localization/de_de/greetings.yaml",
            "greeting:\n  hello: Hallo {name}\n",
        )?;
        test.write_file(
            "localization/fr_fr/greetings.yaml",
            "greeting:\n  hello: Salut {name}\n",
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn render_command(&self, contract: &str, key: &str) -> Command {
        let mut cmd = self.command();
        cmd.args(["render", contract, key]);
        cmd
    }

    pub fn generate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
