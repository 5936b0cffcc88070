//! Command-line argument parsing.
//!
//! This module defines the outer interface of the `argbind` binary using the
//! `clap` crate. Everything after the command name is handed to the binder
//! untouched.

use clap::Parser;

/// Command-line arguments for the `argbind` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use argbind_cli::cli_args::Args;
///
/// let args = Args::parse_from(["argbind", "greet", "--name", "Mr"]);
/// assert_eq!(args.command.as_deref(), Some("greet"));
/// assert_eq!(args.arguments, vec!["--name", "Mr"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Log binding details (same as `RUST_LOG=debug`).
    #[arg(long, short = 'v', action)]
    pub verbose: bool,

    /// Print the parameter declaration of the command as YAML instead of running it.
    #[arg(long, short = 'd', action)]
    pub describe: bool,

    /// List the built-in commands.
    #[arg(long, short = 'l', action)]
    pub list: bool,

    /// The built-in command to run.
    #[arg(num_args(1))]
    pub command: Option<String>,

    /// Arguments for the command, bound against its declaration.
    ///
    /// A `--` directly after the command is taken by this parser; repeat it to
    /// pass a terminator through to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub arguments: Vec<String>,
}
