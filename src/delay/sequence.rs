//! Sequence evaluation: classification folded over the ordered phases.
//!
//! A single shift accumulator threads left to right. A late phase adds its
//! penalty to the accumulator only after its own display date has been
//! computed, so a phase is pushed out by the lateness of earlier phases
//! only, never by its own.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::checkpoint::{CheckpointKind, PaidCheckpoints};
use crate::config::schema::Phase;

use super::classify::{Assessment, BUFFER_DAYS, PhaseStatus, classify_phase};
use super::policy::DelayPolicy;

/// Everything the presentation layer needs to show one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseView<'a> {
    /// The phase as configured.
    pub phase: &'a Phase,
    /// Derived status.
    pub status: PhaseStatus,
    /// Base deadline shifted by the penalties of earlier phases.
    pub display_deadline: NaiveDate,
    /// Shift applied to this phase's deadline.
    pub shift_days: u64,
    /// Days past the buffer end; zero unless late.
    pub days_late: u64,
    /// Penalty this phase contributes; zero unless late.
    pub penalty_days: u64,
    /// Days into the buffer window, only while in it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_into_buffer: Option<u64>,
    /// Whether the start checkpoint is paid.
    pub start_paid: bool,
    /// Whether the finish checkpoint is paid.
    pub finish_paid: bool,
}

impl PhaseView<'_> {
    /// Buffer days left before penalties begin, while in the buffer.
    #[must_use]
    pub fn buffer_days_remaining(&self) -> Option<u64> {
        self.days_into_buffer
            .map(|days| BUFFER_DAYS.saturating_sub(days))
    }
}

/// Result of evaluating the whole phase sequence for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceReport<'a> {
    /// Date the sequence was evaluated for.
    pub as_of: NaiveDate,
    /// Policy in force.
    pub policy: DelayPolicy,
    /// One view per phase, ascending by id.
    pub phases: Vec<PhaseView<'a>>,
    /// Accumulated shift after the final phase.
    pub total_shift_days: u64,
}

impl SequenceReport<'_> {
    /// Final phase's base deadline pushed out by the total shift.
    #[must_use]
    pub fn projected_launch(&self) -> Option<NaiveDate> {
        self.phases
            .last()
            .map(|view| shift_date(view.phase.base_deadline, self.total_shift_days))
    }

    /// No accumulated shift.
    #[must_use]
    pub const fn on_track(&self) -> bool {
        self.total_shift_days == 0
    }

    /// Ids of phases currently classified late.
    #[must_use]
    pub fn late_phase_ids(&self) -> Vec<u32> {
        self.phases
            .iter()
            .filter(|view| view.status == PhaseStatus::Late)
            .map(|view| view.phase.id)
            .collect()
    }
}

/// Evaluates every phase in ascending id order as of `today`.
///
/// `phases` may arrive in any order; they are visited by id. The function is
/// pure: the same inputs always produce the same report.
#[must_use]
pub fn evaluate_sequence<'a>(
    phases: &'a [Phase],
    today: NaiveDate,
    paid: &PaidCheckpoints,
    policy: &DelayPolicy,
) -> SequenceReport<'a> {
    let mut ordered: Vec<&Phase> = phases.iter().collect();
    ordered.sort_by_key(|phase| phase.id);

    let (views, total_shift_days) = ordered.into_iter().fold(
        (Vec::with_capacity(phases.len()), 0u64),
        |(mut views, shift), phase| {
            let assessment = classify_phase(phase, today, paid, policy);
            views.push(view_for(phase, &assessment, shift, paid));

            let next_shift = match assessment {
                Assessment::Late { penalty_days, .. } if policy.enable_cascade => {
                    shift.saturating_add(penalty_days)
                }
                _ => shift,
            };
            (views, next_shift)
        },
    );

    debug!(
        %today,
        phases = views.len(),
        total_shift_days,
        policy = policy.label(),
        "sequence evaluated"
    );

    SequenceReport {
        as_of: today,
        policy: *policy,
        phases: views,
        total_shift_days,
    }
}

fn view_for<'a>(
    phase: &'a Phase,
    assessment: &Assessment,
    shift_days: u64,
    paid: &PaidCheckpoints,
) -> PhaseView<'a> {
    PhaseView {
        phase,
        status: assessment.status(),
        display_deadline: shift_date(phase.base_deadline, shift_days),
        shift_days,
        days_late: assessment.days_late(),
        penalty_days: assessment.penalty_days(),
        days_into_buffer: assessment.days_into_buffer(),
        start_paid: paid.is_paid(phase.id, CheckpointKind::Start),
        finish_paid: paid.is_paid(phase.id, CheckpointKind::Finish),
    }
}

/// Adds whole days, clamping at the latest representable date.
fn shift_date(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}
