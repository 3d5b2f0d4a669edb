use std::fs;

use anyhow::{Context, Result};

use super::super::args::GenerateCommand;
use super::{
    CommandResult, CommandSummary, GenerateSummary,
    helper::{ProjectContext, build_failure, finish},
};
use crate::emit::{Emitter, RustEmitter};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;

    let output = match ctx.compile() {
        Ok(output) => output,
        Err(err) => {
            return Ok(build_failure(
                CommandSummary::Generate(GenerateSummary::default()),
                &err,
            ));
        }
    };

    let emitter = RustEmitter;
    let code = output.emit(&emitter);
    let mut summary = GenerateSummary {
        code: None,
        output: None,
        contract_count: output.tables.len(),
        accessor_count: output.tables.iter().map(|t| t.accessors().count()).sum(),
    };

    match cmd.output {
        Some(mut path) => {
            if path.extension().is_none() {
                path.set_extension(emitter.file_extension());
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
            fs::write(&path, code).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!(path = %path.display(), "wrote generated catalog");
            summary.output = Some(path);
        }
        None => summary.code = Some(code),
    }

    Ok(finish(
        CommandSummary::Generate(summary),
        output.issues,
        output.source_files,
        true,
    ))
}
