use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, generate::generate, init::init, render::render},
};

/// Dispatches to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Render(cmd)) => render(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
