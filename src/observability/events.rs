//! Structured session event stream.
//!
//! Discrete, typed events emitted while a tracker session runs. Events are
//! serialized as newline-delimited JSON (JSONL) and carry a monotonically
//! increasing sequence number.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// A discrete event emitted during a tracker session.
///
/// Each variant is tagged with `"type"` when serialized to JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A session was opened on a plan.
    SessionStarted {
        /// Wall-clock time of the event.
        timestamp: DateTime<Utc>,
        /// Project name from the plan.
        project: String,
        /// Session date at start.
        as_of: NaiveDate,
        /// Whether the session date can be moved.
        simulated: bool,
        /// Policy label (`cascading`, `flat`, `custom`).
        policy: String,
    },

    /// A checkpoint went from unpaid to paid.
    CheckpointPaid {
        /// Wall-clock time of the event.
        timestamp: DateTime<Utc>,
        /// Checkpoint key, e.g. `1_finish`.
        checkpoint: String,
        /// Amount due at that checkpoint.
        amount: u64,
    },

    /// The simulated date was moved.
    ClockChanged {
        /// Wall-clock time of the event.
        timestamp: DateTime<Utc>,
        /// Previous session date.
        from: NaiveDate,
        /// New session date.
        to: NaiveDate,
    },

    /// The phase sequence was evaluated.
    SequenceEvaluated {
        /// Wall-clock time of the event.
        timestamp: DateTime<Utc>,
        /// Date evaluated for.
        as_of: NaiveDate,
        /// Accumulated shift after the final phase.
        total_shift_days: u64,
        /// Ids of late phases.
        late_phases: Vec<u32>,
        /// Final deadline after the shift.
        projected_launch: Option<NaiveDate>,
    },
}

// ---------------------------------------------------------------------------
// Envelope (adds sequence number via serde flatten)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct EventEnvelope {
    sequence: u64,
    #[serde(flatten)]
    event: Event,
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Buffered JSONL event writer.
///
/// Each call to [`emit`](Self::emit) increments the sequence counter,
/// serializes the event as a single JSON line, and flushes. Serialization
/// or I/O failures are dropped; events never fail a session.
pub struct EventEmitter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

// Box<dyn Write> is not Debug
impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl EventEmitter {
    /// Creates an emitter that writes to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates an emitter that writes to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Creates an emitter that writes to a file at `path`, truncating it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// Emits an event as a single JSONL line.
    pub fn emit(&self, event: Event) {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let envelope = EventEnvelope {
            sequence: seq,
            event,
        };

        if let Ok(mut w) = self.writer.lock() {
            if let Ok(line) = serde_json::to_string(&envelope) {
                let _ = writeln!(w, "{line}");
                let _ = w.flush();
            }
        }
    }

    /// Returns the number of events emitted so far.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
