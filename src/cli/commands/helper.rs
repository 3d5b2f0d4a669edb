use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        Contract,
        compile::{CompileOutput, CompileSettings, FsSourceLoader, compile},
        parsers::contracts::load_contracts,
    },
    error::CompileError,
    issues::{BuildFailureIssue, Issue, Severity},
};

/// Configuration and contracts of the project a command runs on.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g., `--default-locale de-DE`)
/// 2. `.loccatrc.json` config file
/// 3. Built-in defaults
pub struct ProjectContext {
    pub config: Config,
    /// Directory the config file was found in.
    pub root: PathBuf,
    pub contracts: Vec<Contract>,
}

impl ProjectContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let start_dir = match &common.path {
            Some(path) => path.clone(),
            None => env::current_dir().context("Failed to read current directory")?,
        };
        let loaded = load_config(&start_dir)?;
        let mut config = loaded.config;
        if !loaded.from_file {
            tracing::debug!(dir = %start_dir.display(), "no config file found, using defaults");
        }

        if let Some(locale) = &common.default_locale {
            config.default_locale = Some(locale.clone());
            config.validate()?;
        }

        let contracts_path = config.contracts_path(&loaded.root);
        let contracts = if contracts_path.exists() {
            load_contracts(&contracts_path)?
        } else {
            tracing::warn!(path = %contracts_path.display(), "contracts file not found");
            Vec::new()
        };
        tracing::debug!(count = contracts.len(), "loaded contracts");

        Ok(Self {
            config,
            root: loaded.root,
            contracts,
        })
    }

    pub fn compile(&self) -> Result<CompileOutput, CompileError> {
        let settings = CompileSettings::from_config(&self.config)?;
        let loader = FsSourceLoader::from_config(&self.config, &self.root);
        compile(settings, &self.contracts, &loader)
    }
}

/// Result for a run whose compilation was aborted.
pub fn build_failure(summary: CommandSummary, error: &CompileError) -> CommandResult {
    finish(
        summary,
        vec![Issue::BuildFailure(BuildFailureIssue::from(error))],
        0,
        true,
    )
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Render(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        source_files_checked,
    }
}
