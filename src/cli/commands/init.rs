use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use super::super::args::InitCommand;
use super::{CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Writes the default configuration, refusing to replace an existing one.
pub fn init(cmd: InitCommand) -> Result<CommandResult> {
    let path = match cmd.path {
        Some(dir) => dir.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };

    let existing = path.exists();
    if existing {
        tracing::debug!(path = %path.display(), "configuration already present");
    } else {
        fs::write(&path, default_config_json()?)
            .with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!(path = %path.display(), "wrote default configuration");
    }

    let mut result = finish(
        CommandSummary::Init(InitSummary { path, existing }),
        Vec::new(),
        0,
        true,
    );
    if existing {
        result.error_count = 1;
    }
    Ok(result)
}
