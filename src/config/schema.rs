//! Plan schema types.
//!
//! A plan file describes the project, its ordered phases, the delay policy,
//! where "today" comes from, and which checkpoints start out paid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checkpoint::CheckpointKind;
use crate::delay::DelayPolicy;

// ============================================================================
// Root Plan
// ============================================================================

/// A complete project plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Project metadata.
    pub project: ProjectInfo,

    /// Penalty and cascade policy.
    #[serde(default)]
    pub policy: DelayPolicy,

    /// Source of the current date.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Checkpoint keys (e.g. `1_start`) already paid when a session opens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paid: Vec<String>,

    /// Phases; evaluated in ascending `id` order.
    pub phases: Vec<Phase>,
}

impl Plan {
    /// Phases sorted by ascending id.
    #[must_use]
    pub fn ordered_phases(&self) -> Vec<Phase> {
        let mut phases = self.phases.clone();
        phases.sort_by_key(|p| p.id);
        phases
    }

    /// Looks up a phase by id.
    #[must_use]
    pub fn phase(&self, id: u32) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }
}

/// Project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectInfo {
    /// Project name shown in report headers.
    pub name: String,

    /// Currency symbol prefixed to amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "₹".to_string()
}

// ============================================================================
// Clock
// ============================================================================

/// Where a session's current date comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClockConfig {
    /// Today's local date; cannot be changed during a session.
    #[default]
    System,

    /// A user-adjustable date, starting at `start`.
    Simulated {
        /// Initial simulated date.
        start: NaiveDate,
    },
}

// ============================================================================
// Phase
// ============================================================================

/// One phase of the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Phase {
    /// Unique, positive; defines sequence order.
    pub id: u32,

    /// Display title.
    pub title: String,

    /// What the phase delivers.
    #[serde(default)]
    pub purpose: String,

    /// Total cost in whole currency units.
    #[serde(default)]
    pub cost_total: u64,

    /// Deadline before any shift is applied.
    pub base_deadline: NaiveDate,

    /// Acceptance steps, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,

    /// Demo environment for the phase.
    #[serde(default)]
    pub demo_link: String,
}

impl Phase {
    /// Amount due at the given checkpoint.
    ///
    /// The start share is rounded down; the finish payment takes the
    /// remainder so the two always add up to `cost_total`.
    #[must_use]
    pub const fn amount_for(&self, kind: CheckpointKind) -> u64 {
        let start = self.cost_total / 100 * CheckpointKind::Start.share_percent()
            + self.cost_total % 100 * CheckpointKind::Start.share_percent() / 100;
        match kind {
            CheckpointKind::Start => start,
            CheckpointKind::Finish => self.cost_total - start,
        }
    }
}
