//! `phasetrack` - Milestone payment and delay tracker
//!
//! Tracks a fixed, ordered list of project phases against their deadlines
//! and payment checkpoints. The [`delay`] engine classifies each phase as
//! active, in its buffer, late or completed, and cascades late penalties
//! into the displayed deadlines of every later phase.

pub mod checkpoint;
pub mod cli;
pub mod clock;
pub mod config;
pub mod delay;
pub mod error;
pub mod observability;
pub mod report;
pub mod tracker;

pub use checkpoint::{CheckpointId, CheckpointKind, PaidCheckpoints};
pub use delay::{DelayPolicy, PhaseStatus, evaluate_sequence};
pub use tracker::TrackerSession;
