//! Tracker session
//!
//! Owns the plan, the paid ledger, the clock and the policy for one run.
//! Every [`evaluate`](TrackerSession::evaluate) re-runs the whole sequence
//! from scratch; nothing is cached between calls, so a payment on an early
//! phase is reflected in every later phase's dates on the next evaluation.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::checkpoint::{CheckpointId, CheckpointKind, PaidCheckpoints, PaymentSummary};
use crate::clock::{self, Clock, SimulatedClock};
use crate::config::schema::{Phase, Plan, ProjectInfo};
use crate::delay::{DelayPolicy, SequenceReport, evaluate_sequence};
use crate::error::InputError;
use crate::observability::{Event, EventEmitter};

/// In-memory state of one tracker run.
#[derive(Debug)]
pub struct TrackerSession {
    project: ProjectInfo,
    phases: Vec<Phase>,
    paid: PaidCheckpoints,
    clock: Box<dyn Clock>,
    policy: DelayPolicy,
    events: Option<EventEmitter>,
}

/// A full evaluation: engine output plus payment totals.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport<'a> {
    /// Project metadata.
    pub project: &'a ProjectInfo,
    /// Whether the session date is simulated.
    pub simulated: bool,
    /// Engine output.
    #[serde(flatten)]
    pub sequence: SequenceReport<'a>,
    /// Final deadline after the shift.
    pub projected_launch: Option<NaiveDate>,
    /// No accumulated shift.
    pub on_track: bool,
    /// Paid and outstanding totals.
    pub payments: PaymentSummary,
}

impl TrackerSession {
    /// Opens a session on `plan`.
    ///
    /// The clock and policy come from the plan; the plan's `paid` list seeds
    /// the ledger.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if a seeded checkpoint is malformed or
    /// names a phase that is not in the plan.
    pub fn new(plan: Plan) -> Result<Self, InputError> {
        let phases = plan.ordered_phases();
        let mut session = Self {
            project: plan.project,
            phases,
            paid: PaidCheckpoints::new(),
            clock: clock::from_config(&plan.clock),
            policy: plan.policy,
            events: None,
        };

        for key in &plan.paid {
            let id: CheckpointId = key.parse()?;
            session.ensure_known(id.phase_id)?;
            session.paid.mark(id);
        }

        debug!(
            project = %session.project.name,
            phases = session.phases.len(),
            paid = session.paid.len(),
            "session opened"
        );
        Ok(session)
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DelayPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attaches an event stream and records the session start on it.
    #[must_use]
    pub fn with_events(mut self, emitter: EventEmitter) -> Self {
        emitter.emit(Event::SessionStarted {
            timestamp: Utc::now(),
            project: self.project.name.clone(),
            as_of: self.clock.today(),
            simulated: self.clock.is_simulated(),
            policy: self.policy.label().to_string(),
        });
        self.events = Some(emitter);
        self
    }

    /// Marks a checkpoint paid.
    ///
    /// Returns `true` if it was newly paid, `false` if it already was.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownPhase`] if `phase_id` is not in the plan.
    pub fn mark_paid(&mut self, phase_id: u32, kind: CheckpointKind) -> Result<bool, InputError> {
        let phase = self.ensure_known(phase_id)?;
        let amount = phase.amount_for(kind);
        let id = CheckpointId::new(phase_id, kind);

        let newly_paid = self.paid.mark(id);
        if newly_paid {
            info!(checkpoint = %id, amount, "checkpoint paid");
            self.emit(Event::CheckpointPaid {
                timestamp: Utc::now(),
                checkpoint: id.to_string(),
                amount,
            });
        } else {
            debug!(checkpoint = %id, "checkpoint already paid");
        }
        Ok(newly_paid)
    }

    /// Marks a checkpoint paid by its key, e.g. `2_finish`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the key is malformed, names an unknown
    /// kind, or references a phase not in the plan.
    pub fn mark_paid_key(&mut self, key: &str) -> Result<bool, InputError> {
        let id: CheckpointId = key.parse()?;
        self.mark_paid(id.phase_id, id.kind)
    }

    /// Moves the session date.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ClockFixed`] when the session follows real time.
    pub fn set_current_date(&mut self, date: NaiveDate) -> Result<(), InputError> {
        let from = self.clock.today();
        self.clock.set_today(date)?;
        self.emit(Event::ClockChanged {
            timestamp: Utc::now(),
            from,
            to: date,
        });
        Ok(())
    }

    /// Replaces the clock with a simulated one starting at `date`.
    ///
    /// Works on any session, including one that follows real time, and is
    /// recorded as a clock change.
    pub fn simulate_at(&mut self, date: NaiveDate) {
        let from = self.clock.today();
        self.clock = Box::new(SimulatedClock::new(date));
        debug!(%from, to = %date, "clock switched to simulated date");
        self.emit(Event::ClockChanged {
            timestamp: Utc::now(),
            from,
            to: date,
        });
    }

    /// The date evaluations run against.
    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether the session date can be moved.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.clock.is_simulated()
    }

    /// Paid ledger.
    #[must_use]
    pub const fn paid(&self) -> &PaidCheckpoints {
        &self.paid
    }

    /// Phases in ascending id order.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Policy in force.
    #[must_use]
    pub const fn policy(&self) -> &DelayPolicy {
        &self.policy
    }

    /// Project metadata.
    #[must_use]
    pub const fn project(&self) -> &ProjectInfo {
        &self.project
    }

    /// Evaluates the full sequence as of the current session date.
    #[must_use]
    pub fn evaluate(&self) -> SessionReport<'_> {
        let sequence = evaluate_sequence(
            &self.phases,
            self.clock.today(),
            &self.paid,
            &self.policy,
        );
        let projected_launch = sequence.projected_launch();
        let on_track = sequence.on_track();

        self.emit(Event::SequenceEvaluated {
            timestamp: Utc::now(),
            as_of: sequence.as_of,
            total_shift_days: sequence.total_shift_days,
            late_phases: sequence.late_phase_ids(),
            projected_launch,
        });

        SessionReport {
            project: &self.project,
            simulated: self.clock.is_simulated(),
            payments: PaymentSummary::compute(&self.phases, &self.paid),
            sequence,
            projected_launch,
            on_track,
        }
    }

    fn ensure_known(&self, phase_id: u32) -> Result<&Phase, InputError> {
        self.phases
            .iter()
            .find(|p| p.id == phase_id)
            .ok_or(InputError::UnknownPhase(phase_id))
    }

    fn emit(&self, event: Event) {
        if let Some(emitter) = &self.events {
            emitter.emit(event);
        }
    }
}
