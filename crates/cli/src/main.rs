use std::io::{stdin, stdout};
use std::process::ExitCode;

use argbind_cli::cli_args::Args;
use argbind_cli::commands::{builtin_commands, describe, find_command};
use argbind_cli::error::{Error, Result};
use argbind_core::pipeline::Cli;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

fn init_logging(args: &Args) {
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn execute(args: &Args) -> Result<()> {
    if args.list {
        for command in builtin_commands() {
            println!("{command}");
        }
        return Ok(());
    }

    let command_id = args.command.as_deref().ok_or(Error::MissingCommand)?;
    let command = find_command(command_id)?;
    debug!("Selected command: {command}");

    if args.describe {
        return describe(command, &mut stdout().lock());
    }

    info!("Running `{}` with arguments {:?}", command.id, args.arguments);
    let cli = Cli::new(command.spec());
    cli.exec_args(args.arguments.as_slice(), &mut stdin().lock(), &mut stdout().lock())?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
