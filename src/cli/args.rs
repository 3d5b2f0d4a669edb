//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Compile every contract and report diagnostics
//! - `render`: Render one key through the dynamic lookup
//! - `generate`: Emit the compiled catalogs as Rust source
//! - `init`: Initialize loccat configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Render(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

/// Common arguments shared by all compiling commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Default locale (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Qualified contract name (e.g., bot.Greetings)
    pub contract: String,

    /// Logical key (e.g., greeting.hello)
    pub key: String,

    /// Locale to render (defaults to the default locale)
    #[arg(long)]
    pub locale: Option<String>,

    /// Argument as NAME=VALUE; VALUE is read as JSON, else as text.
    /// Can be specified multiple times: --arg name=Ann --arg count=3
    #[arg(long = "arg", value_name = "NAME=VALUE")]
    pub args: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Write the generated module to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to write the configuration file to (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile all contracts and report missing, conflicting or unused catalog entries
    Check(CheckCommand),
    /// Render one localization key
    Render(RenderCommand),
    /// Generate Rust accessors for all contracts
    Generate(GenerateCommand),
    /// Initialize a new .loccatrc.json configuration file
    Init(InitCommand),
}
