//! `plan` command
//!
//! Prints the plan's phases, deadlines and payment split.

use crate::cli::args::{OutputFormat, PlanArgs};
use crate::error::PhaseTrackError;
use crate::report;

use super::load_plan;

/// Print the plan.
///
/// # Errors
///
/// Returns an error if the plan cannot be loaded or serialized.
pub fn run(args: &PlanArgs) -> Result<(), PhaseTrackError> {
    let plan = load_plan(args.plan.as_deref())?;

    match args.format {
        OutputFormat::Human => print!("{}", report::render_plan(&plan)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    Ok(())
}
