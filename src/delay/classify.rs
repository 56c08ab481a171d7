//! Per-phase delay classification.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::trace;

use crate::checkpoint::{CheckpointKind, PaidCheckpoints};
use crate::config::schema::Phase;

use super::policy::DelayPolicy;

/// Grace window after a deadline during which no penalty applies.
pub const BUFFER_DAYS: u64 = 7;

/// Status classification of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    /// Finish checkpoint paid.
    Completed,
    /// On or before the deadline.
    Active,
    /// Past the deadline, within the buffer window.
    Buffer,
    /// Past the buffer window.
    Late,
}

impl PhaseStatus {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Active => "active",
            Self::Buffer => "buffer",
            Self::Late => "late",
        }
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one phase against a date and the paid ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    /// Finish checkpoint paid; terminal.
    Completed,
    /// Deadline not yet passed.
    Active,
    /// Inside the grace window.
    Buffer {
        /// Whole days past the deadline, in `1..=BUFFER_DAYS`.
        days_into_buffer: u64,
    },
    /// Grace window exceeded.
    Late {
        /// Whole days past the end of the buffer, at least 1.
        days_late: u64,
        /// Days this phase pushes later phases out.
        penalty_days: u64,
    },
}

impl Assessment {
    /// Status without the accompanying counters.
    #[must_use]
    pub const fn status(&self) -> PhaseStatus {
        match self {
            Self::Completed => PhaseStatus::Completed,
            Self::Active => PhaseStatus::Active,
            Self::Buffer { .. } => PhaseStatus::Buffer,
            Self::Late { .. } => PhaseStatus::Late,
        }
    }

    /// Days past the buffer end; zero unless late.
    #[must_use]
    pub const fn days_late(&self) -> u64 {
        match self {
            Self::Late { days_late, .. } => *days_late,
            _ => 0,
        }
    }

    /// Penalty days; zero unless late.
    #[must_use]
    pub const fn penalty_days(&self) -> u64 {
        match self {
            Self::Late { penalty_days, .. } => *penalty_days,
            _ => 0,
        }
    }

    /// Days into the buffer window, when in it.
    #[must_use]
    pub const fn days_into_buffer(&self) -> Option<u64> {
        match self {
            Self::Buffer { days_into_buffer } => Some(*days_into_buffer),
            _ => None,
        }
    }
}

/// Classifies a phase as of `today`.
///
/// Only the phase id and base deadline are consulted. A paid finish
/// checkpoint wins over any date. Both bounds are inclusive: the deadline
/// itself is still `Active`, and `deadline + BUFFER_DAYS` is still `Buffer`.
#[must_use]
pub fn classify_phase(
    phase: &Phase,
    today: NaiveDate,
    paid: &PaidCheckpoints,
    policy: &DelayPolicy,
) -> Assessment {
    if paid.is_paid(phase.id, CheckpointKind::Finish) {
        return Assessment::Completed;
    }

    let deadline = phase.base_deadline;
    if today <= deadline {
        return Assessment::Active;
    }

    let days_past_deadline = whole_days_between(deadline, today);
    let assessment = if days_past_deadline <= BUFFER_DAYS {
        Assessment::Buffer {
            days_into_buffer: days_past_deadline,
        }
    } else {
        let days_late = days_past_deadline - BUFFER_DAYS;
        Assessment::Late {
            days_late,
            penalty_days: policy.penalty_for(days_late),
        }
    };

    trace!(phase_id = phase.id, %deadline, %today, ?assessment, "phase classified");
    assessment
}

/// Whole days from `earlier` to `later`; zero if `later` is not after `earlier`.
fn whole_days_between(earlier: NaiveDate, later: NaiveDate) -> u64 {
    u64::try_from(later.signed_duration_since(earlier).num_days()).unwrap_or(0)
}
