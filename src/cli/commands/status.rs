//! `status` command
//!
//! Opens a session on a plan, applies the requested date and payments in
//! order, re-evaluating after each step, and prints the final report.

use std::path::Path;

use tracing::{debug, info};

use crate::cli::args::{OutputFormat, PolicyPreset, StatusArgs};
use crate::clock;
use crate::delay::DelayPolicy;
use crate::error::PhaseTrackError;
use crate::observability::EventEmitter;
use crate::report;
use crate::tracker::TrackerSession;

use super::load_plan;

/// Evaluate and print the plan's status.
///
/// # Errors
///
/// Returns an error if the plan cannot be loaded, the date or a checkpoint
/// is rejected, or the events file cannot be created.
pub fn run(args: &StatusArgs) -> Result<(), PhaseTrackError> {
    let plan = load_plan(args.plan.as_deref())?;
    let mut session = TrackerSession::new(plan)?;

    if let Some(policy) = policy_override(args, session.policy()) {
        info!(policy = policy.label(), "policy overridden");
        session = session.with_policy(policy);
    }

    if let Some(path) = &args.events {
        session = session.with_events(open_events(path, args.format)?);
    }

    if let Some(raw) = &args.date {
        let date = clock::parse_date(raw)?;
        if session.is_simulated() {
            session.set_current_date(date)?;
        } else {
            session.simulate_at(date);
        }
    }

    for key in &args.pay {
        if !session.mark_paid_key(key)? {
            info!(checkpoint = %key, "checkpoint was already paid");
        }
        let step = session.evaluate();
        debug!(
            checkpoint = %key,
            total_shift_days = step.sequence.total_shift_days,
            "re-evaluated after payment"
        );
    }

    let report = session.evaluate();
    match args.format {
        OutputFormat::Human => print!("{}", report::render_human(&report)),
        OutputFormat::Json => println!("{}", report::render_json(&report)?),
    }

    Ok(())
}

/// Applies CLI policy flags on top of the plan's policy, if any were given.
fn policy_override(args: &StatusArgs, base: &DelayPolicy) -> Option<DelayPolicy> {
    if args.policy.is_none() && args.penalty_multiplier.is_none() && !args.no_cascade {
        return None;
    }

    let mut policy = match args.policy {
        Some(PolicyPreset::Cascading) => DelayPolicy::cascading(),
        Some(PolicyPreset::Flat) => DelayPolicy::flat(),
        None => *base,
    };
    if let Some(multiplier) = args.penalty_multiplier {
        policy.penalty_multiplier = multiplier;
    }
    if args.no_cascade {
        policy.enable_cascade = false;
    }
    Some(policy)
}

/// Opens the event stream; `-` shares stdout with a human report only.
fn open_events(path: &Path, format: OutputFormat) -> Result<EventEmitter, PhaseTrackError> {
    if path == Path::new("-") {
        if format == OutputFormat::Json {
            return Err(PhaseTrackError::Usage(
                "--events - cannot be combined with --format json; write events to a file"
                    .to_string(),
            ));
        }
        return Ok(EventEmitter::stdout());
    }
    Ok(EventEmitter::from_file(path)?)
}
