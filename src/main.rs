//! `phasetrack` - Milestone payment and delay tracker

use clap::Parser;

use phasetrack::cli::args::Cli;
use phasetrack::cli::commands;
use phasetrack::error::{ConfigError, ExitCode, PhaseTrackError};
use phasetrack::observability::init_logging;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(ExitCode::for_clap_error(&e));
        }
    };

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            if let PhaseTrackError::Config(ConfigError::ValidationError { errors, .. }) = &e {
                for issue in errors {
                    eprintln!("  {issue}");
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}
