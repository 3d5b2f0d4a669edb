use anyhow::Result;

use super::super::args::CheckCommand;
use super::{
    CheckSummary, CommandResult, CommandSummary,
    helper::{ProjectContext, build_failure, finish},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;

    let output = match ctx.compile() {
        Ok(output) => output,
        Err(err) => {
            return Ok(build_failure(
                CommandSummary::Check(CheckSummary::default()),
                &err,
            ));
        }
    };

    let summary = CheckSummary {
        contract_count: output.tables.len(),
        key_count: output.tables.iter().map(|t| t.accessors().count()).sum(),
    };

    Ok(finish(
        CommandSummary::Check(summary),
        output.issues,
        output.source_files,
        true,
    ))
}
