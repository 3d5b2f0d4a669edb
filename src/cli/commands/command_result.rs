use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::{error::LookupError, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Render(RenderSummary),
    Generate(GenerateSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct CheckSummary {
    pub contract_count: usize,
    pub key_count: usize,
}

#[derive(Debug, Default)]
pub struct RenderSummary {
    pub text: Option<String>,
    pub error: Option<LookupError>,
}

#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Generated source, when it goes to stdout.
    pub code: Option<String>,
    /// File written, when `--output` was given.
    pub output: Option<PathBuf>,
    pub contract_count: usize,
    pub accessor_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// A configuration file was already there and was left untouched.
    pub existing: bool,
}

/// Result of running loccat commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// All issues found while compiling, sorted.
    pub issues: Vec<Issue>,
    /// Number of localization source files read.
    pub source_files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
