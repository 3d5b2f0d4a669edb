use anyhow::{Result, bail};
use serde_json::{Map, Value};

use super::super::args::RenderCommand;
use super::{
    CommandResult, CommandSummary, RenderSummary,
    helper::{ProjectContext, build_failure, finish},
};

pub fn render(cmd: RenderCommand) -> Result<CommandResult> {
    let args = parse_args(&cmd.args)?;
    let ctx = ProjectContext::new(&cmd.common)?;

    let output = match ctx.compile() {
        Ok(output) => output,
        Err(err) => {
            return Ok(build_failure(
                CommandSummary::Render(RenderSummary::default()),
                &err,
            ));
        }
    };
    let source_files = output.source_files;

    let registry = output.into_registry();
    let locale = cmd
        .locale
        .unwrap_or_else(|| registry.default_locale().to_string());

    let rendered = registry
        .get_provider(&cmd.contract)
        .and_then(|provider| provider.render_by_name(&cmd.key, &locale, &args));

    let summary = match rendered {
        Ok(text) => RenderSummary {
            text: Some(text),
            error: None,
        },
        Err(error) => RenderSummary {
            text: None,
            error: Some(error),
        },
    };

    // Compile warnings were already logged; stdout carries only the text.
    Ok(finish(
        CommandSummary::Render(summary),
        Vec::new(),
        source_files,
        true,
    ))
}

/// Parses `NAME=VALUE` pairs. A value that is valid JSON keeps its JSON
/// type, anything else is taken as text.
fn parse_args(raw: &[String]) -> Result<Map<String, Value>> {
    let mut args = Map::new();
    for pair in raw {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("Invalid argument '{}': expected NAME=VALUE", pair);
        };
        if name.is_empty() {
            bail!("Invalid argument '{}': missing name", pair);
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        args.insert(name.to_string(), value);
    }
    Ok(args)
}
