//! `completions` command

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};

/// Write a completion script for the chosen shell to stdout.
///
/// The script covers every subcommand, flag and value enum, so `--policy`
/// and `--format` values complete too.
pub fn run(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, bin, &mut std::io::stdout().lock());
}
