//! Penalty and cascade policy for the delay engine.
//!
//! Presets: cascading (each late day costs three days, pushed into every
//! later phase) and flat (lateness is reported but never shifts dates).

use serde::{Deserialize, Serialize};

/// Multiplier applied to late days under the cascading preset.
pub const DEFAULT_PENALTY_MULTIPLIER: u32 = 3;

/// How lateness turns into penalty days and date shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayPolicy {
    /// Penalty days charged per late day.
    #[serde(default = "default_multiplier")]
    pub penalty_multiplier: u32,

    /// Whether a late phase's penalty shifts the display dates of later phases.
    #[serde(rename = "cascade", default = "default_cascade")]
    pub enable_cascade: bool,
}

const fn default_multiplier() -> u32 {
    DEFAULT_PENALTY_MULTIPLIER
}

const fn default_cascade() -> bool {
    true
}

impl DelayPolicy {
    /// Late days cost three penalty days each and cascade forward.
    #[must_use]
    pub const fn cascading() -> Self {
        Self {
            penalty_multiplier: DEFAULT_PENALTY_MULTIPLIER,
            enable_cascade: true,
        }
    }

    /// Lateness is classified but carries no penalty and no shift.
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            penalty_multiplier: 0,
            enable_cascade: false,
        }
    }

    /// Penalty days for the given number of days past the buffer.
    #[must_use]
    pub fn penalty_for(&self, days_late: u64) -> u64 {
        days_late.saturating_mul(u64::from(self.penalty_multiplier))
    }

    /// Short label used in logs and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match (self.penalty_multiplier, self.enable_cascade) {
            (0, false) => "flat",
            (DEFAULT_PENALTY_MULTIPLIER, true) => "cascading",
            _ => "custom",
        }
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::cascading()
    }
}
