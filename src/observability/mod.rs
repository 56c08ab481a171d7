//! Observability module
//!
//! Logging setup and the JSONL session event stream.

pub mod events;
pub mod logging;

pub use events::{Event, EventEmitter};
pub use logging::init_logging;
