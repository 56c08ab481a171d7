//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod plan;
pub mod status;
pub mod validate;
pub mod version;

use std::path::Path;

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigLoader, Plan, builtin_plan};
use crate::error::PhaseTrackError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), PhaseTrackError> {
    match cli.command {
        Commands::Status(args) => status::run(&args),
        Commands::Validate(args) => validate::run(&args),
        Commands::Plan(args) => plan::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Loads the plan at `path`, or the built-in plan when no path is given.
fn load_plan(path: Option<&Path>) -> Result<Plan, PhaseTrackError> {
    let result = match path {
        Some(path) => {
            tracing::info!(file = %path.display(), "loading plan");
            ConfigLoader::with_defaults().load(path)?
        }
        None => {
            tracing::debug!("using built-in plan");
            builtin_plan()?
        }
    };

    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    Ok(result.plan)
}
