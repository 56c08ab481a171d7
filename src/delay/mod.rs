//! Delay engine
//!
//! Pure functions that turn a plan, a date and the paid ledger into a
//! status per phase and a cascading date shift.
//!
//! # Architecture
//!
//! - [`DelayPolicy`] — penalty multiplier and whether penalties cascade
//! - [`classify_phase`] — status of a single phase
//! - [`evaluate_sequence`] — fold over the ordered phases threading the shift

pub mod classify;
pub mod policy;
pub mod sequence;

pub use classify::{Assessment, BUFFER_DAYS, PhaseStatus, classify_phase};
pub use policy::DelayPolicy;
pub use sequence::{PhaseView, SequenceReport, evaluate_sequence};
