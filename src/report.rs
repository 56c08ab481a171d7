//! Text and JSON renderings of a session evaluation.
//!
//! Rendering reads the engine's output only; statuses and dates are never
//! re-derived here.

use std::fmt::Write as _;

use crate::checkpoint::CheckpointKind;
use crate::config::schema::Plan;
use crate::delay::{DelayPolicy, PhaseStatus, PhaseView};
use crate::tracker::SessionReport;

const SHORT_DATE: &str = "%-d %b %Y";
const LONG_DATE: &str = "%-d %B %Y";

/// Renders a report for a terminal.
#[must_use]
pub fn render_human(report: &SessionReport<'_>) -> String {
    let currency = report.project.currency.as_str();
    let sequence = &report.sequence;
    let mut out = String::new();

    let _ = writeln!(out, "Project Tracker: {}", report.project.name);
    let _ = writeln!(
        out,
        "As of {}{} | policy: {} (x{}, cascade {})",
        sequence.as_of.format(SHORT_DATE),
        if report.simulated { " (simulated)" } else { "" },
        sequence.policy.label(),
        sequence.policy.penalty_multiplier,
        if sequence.policy.enable_cascade { "on" } else { "off" },
    );

    let status = if report.on_track { "On Track" } else { "Delayed" };
    match report.projected_launch {
        Some(launch) if sequence.total_shift_days > 0 => {
            let _ = writeln!(
                out,
                "Status: {status} | Projected launch: {} (+{} days delayed)",
                launch.format(LONG_DATE),
                sequence.total_shift_days
            );
        }
        Some(launch) => {
            let _ = writeln!(
                out,
                "Status: {status} | Projected launch: {}",
                launch.format(LONG_DATE)
            );
        }
        None => {
            let _ = writeln!(out, "Status: {status}");
        }
    }

    let payments = &report.payments;
    let total = payments.paid_amount.saturating_add(payments.outstanding_amount);
    let _ = write!(
        out,
        "Paid {} of {}",
        format_amount(currency, payments.paid_amount),
        format_amount(currency, total)
    );
    match (payments.next_payment, payments.next_payment_amount) {
        (Some(next), Some(amount)) => {
            let _ = writeln!(
                out,
                " | Next payment: {}% of Phase {} ({})",
                next.kind.share_percent(),
                next.phase_id,
                format_amount(currency, amount)
            );
        }
        _ => {
            let _ = writeln!(out, " | All payments received");
        }
    }

    for view in &sequence.phases {
        out.push('\n');
        render_phase(&mut out, view, &sequence.policy, currency);
    }

    out
}

fn render_phase(out: &mut String, view: &PhaseView<'_>, policy: &DelayPolicy, currency: &str) {
    const INDENT: &str = "            ";
    let phase = view.phase;

    let _ = writeln!(out, "{:<12}{}", status_badge(view.status), phase.title);

    let _ = write!(
        out,
        "{INDENT}Target: {} | Total: {}",
        view.display_deadline.format(SHORT_DATE),
        format_amount(currency, phase.cost_total)
    );
    if view.shift_days > 0 {
        let _ = write!(out, " | shifted +{} days", view.shift_days);
    }
    if view.status == PhaseStatus::Late && view.penalty_days > 0 {
        let _ = write!(out, " | +{} days shift", view.penalty_days);
    }
    out.push('\n');

    match view.status {
        PhaseStatus::Completed => {
            let _ = writeln!(out, "{INDENT}Paid & Shipped");
            return;
        }
        PhaseStatus::Buffer => {
            if let Some(remaining) = view.buffer_days_remaining() {
                let _ = writeln!(
                    out,
                    "{INDENT}Buffer period active: {remaining} days remaining before timeline penalty"
                );
            }
        }
        PhaseStatus::Late => {
            let outcome = if policy.enable_cascade {
                "days added to launch date"
            } else {
                "penalty days, not carried to later phases"
            };
            let _ = writeln!(
                out,
                "{INDENT}Buffer exceeded by {} days: {} x {} = {} {outcome}",
                view.days_late, view.days_late, policy.penalty_multiplier, view.penalty_days
            );
        }
        PhaseStatus::Active => {}
    }

    let start = CheckpointKind::Start;
    let finish = CheckpointKind::Finish;
    let _ = writeln!(
        out,
        "{INDENT}Payments: {}% {}, {}% {}",
        start.share_percent(),
        if view.start_paid { "paid" } else { "due" },
        finish.share_percent(),
        if view.finish_paid { "paid" } else { "due" },
    );
}

/// Renders a report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &SessionReport<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Renders a plan's phases and payment split for a terminal.
#[must_use]
pub fn render_plan(plan: &Plan) -> String {
    let currency = plan.project.currency.as_str();
    let mut out = String::new();

    let _ = writeln!(out, "Plan: {}", plan.project.name);
    for phase in plan.ordered_phases() {
        let _ = writeln!(
            out,
            "\n{} (due {})",
            phase.title,
            phase.base_deadline.format(SHORT_DATE)
        );
        if !phase.purpose.is_empty() {
            let _ = writeln!(out, "  {}", phase.purpose);
        }
        let _ = writeln!(
            out,
            "  Cost: {} ({} at start, {} at finish)",
            format_amount(currency, phase.cost_total),
            format_amount(currency, phase.amount_for(CheckpointKind::Start)),
            format_amount(currency, phase.amount_for(CheckpointKind::Finish)),
        );
        for (i, step) in phase.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {step}", i + 1);
        }
        if !phase.demo_link.is_empty() {
            let _ = writeln!(out, "  Demo: {}", phase.demo_link);
        }
    }

    out
}

const fn status_badge(status: PhaseStatus) -> &'static str {
    match status {
        PhaseStatus::Completed => "[DONE]",
        PhaseStatus::Active => "[ACTIVE]",
        PhaseStatus::Buffer => "[BUFFER]",
        PhaseStatus::Late => "[LATE]",
    }
}

/// Formats an amount with thousands separators, e.g. `₹20,000`.
#[must_use]
pub fn format_amount(currency: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{currency}{grouped}")
}
