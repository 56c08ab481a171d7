//! Payment checkpoints and the append-only paid ledger.
//!
//! Every phase has two checkpoints: `start` (25% of the phase cost, due at
//! kickoff) and `finish` (the remaining 75%, due at completion). A
//! checkpoint is addressed by the string key `<phase id>_<kind>`, e.g.
//! `1_start`.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::config::schema::Phase;
use crate::error::InputError;

/// Which of the two payments of a phase a checkpoint stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointKind {
    /// Kickoff payment.
    Start,
    /// Completion payment.
    Finish,
}

impl CheckpointKind {
    /// Both kinds, in the order they fall due.
    pub const ALL: [Self; 2] = [Self::Start, Self::Finish];

    /// Key fragment used in checkpoint identifiers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Finish => "finish",
        }
    }

    /// Share of the phase cost due at this checkpoint, in percent.
    #[must_use]
    pub const fn share_percent(self) -> u64 {
        match self {
            Self::Start => 25,
            Self::Finish => 75,
        }
    }
}

impl std::fmt::Display for CheckpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckpointKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "finish" => Ok(Self::Finish),
            other => Err(InputError::UnknownCheckpointKind(other.to_string())),
        }
    }
}

/// A (phase id, kind) pair naming one payment.
///
/// Orders by phase id first, then `start` before `finish`, which is the
/// order payments fall due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckpointId {
    /// Phase the payment belongs to.
    pub phase_id: u32,
    /// Start or finish payment.
    pub kind: CheckpointKind,
}

impl CheckpointId {
    /// Creates a checkpoint identifier.
    #[must_use]
    pub const fn new(phase_id: u32, kind: CheckpointKind) -> Self {
        Self { phase_id, kind }
    }

    /// The kickoff checkpoint of `phase_id`.
    #[must_use]
    pub const fn start(phase_id: u32) -> Self {
        Self::new(phase_id, CheckpointKind::Start)
    }

    /// The completion checkpoint of `phase_id`.
    #[must_use]
    pub const fn finish(phase_id: u32) -> Self {
        Self::new(phase_id, CheckpointKind::Finish)
    }
}

impl std::fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.phase_id, self.kind)
    }
}

impl FromStr for CheckpointId {
    type Err = InputError;

    /// Parses `<phase id>_<kind>`.
    ///
    /// A well-formed key with an unrecognised kind is reported as
    /// [`InputError::UnknownCheckpointKind`]; anything else that does not
    /// fit the shape is [`InputError::MalformedCheckpoint`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let malformed = || InputError::MalformedCheckpoint(s.to_string());

        let (id, kind) = trimmed.split_once('_').ok_or_else(malformed)?;
        let phase_id: u32 = id.parse().map_err(|_| malformed())?;
        if phase_id == 0 || kind.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(phase_id, kind.parse()?))
    }
}

impl Serialize for CheckpointId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Append-only set of paid checkpoints.
///
/// Checkpoints are never un-marked; marking an already-paid checkpoint is a
/// no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaidCheckpoints {
    paid: BTreeSet<CheckpointId>,
}

impl PaidCheckpoints {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a checkpoint paid.
    ///
    /// Returns `true` if it was not already paid.
    pub fn mark(&mut self, id: CheckpointId) -> bool {
        self.paid.insert(id)
    }

    /// Returns whether the checkpoint has been paid.
    #[must_use]
    pub fn contains(&self, id: CheckpointId) -> bool {
        self.paid.contains(&id)
    }

    /// Returns whether the given payment of `phase_id` has been made.
    #[must_use]
    pub fn is_paid(&self, phase_id: u32, kind: CheckpointKind) -> bool {
        self.contains(CheckpointId::new(phase_id, kind))
    }

    /// Number of paid checkpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paid.len()
    }

    /// Returns `true` if nothing has been paid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paid.is_empty()
    }

    /// Paid checkpoints in due order.
    pub fn iter(&self) -> impl Iterator<Item = &CheckpointId> {
        self.paid.iter()
    }
}

impl FromIterator<CheckpointId> for PaidCheckpoints {
    fn from_iter<I: IntoIterator<Item = CheckpointId>>(iter: I) -> Self {
        Self {
            paid: iter.into_iter().collect(),
        }
    }
}

/// Money paid and owed across a plan, plus the next payment due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    /// Sum of all paid checkpoint amounts.
    pub paid_amount: u64,
    /// Sum of all unpaid checkpoint amounts.
    pub outstanding_amount: u64,
    /// First unpaid checkpoint in due order, if any.
    pub next_payment: Option<CheckpointId>,
    /// Amount due at `next_payment`.
    pub next_payment_amount: Option<u64>,
}

impl PaymentSummary {
    /// Tallies the ledger against the plan's phases.
    ///
    /// `phases` must already be in ascending id order.
    #[must_use]
    pub fn compute(phases: &[Phase], paid: &PaidCheckpoints) -> Self {
        let mut summary = Self {
            paid_amount: 0,
            outstanding_amount: 0,
            next_payment: None,
            next_payment_amount: None,
        };

        for phase in phases {
            for kind in CheckpointKind::ALL {
                let amount = phase.amount_for(kind);
                if paid.is_paid(phase.id, kind) {
                    summary.paid_amount = summary.paid_amount.saturating_add(amount);
                } else {
                    summary.outstanding_amount = summary.outstanding_amount.saturating_add(amount);
                    if summary.next_payment.is_none() {
                        summary.next_payment = Some(CheckpointId::new(phase.id, kind));
                        summary.next_payment_amount = Some(amount);
                    }
                }
            }
        }

        summary
    }
}
