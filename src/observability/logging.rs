//! Diagnostic logging for the `phasetrack` binary.
//!
//! stdout belongs to command output: status reports, plan listings, validate
//! results, and `--events -`. Diagnostics (plan warnings, payments recorded,
//! clock moves, per-phase classification at trace level) go to stderr, as
//! text or JSON lines.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{ColorChoice, LogFormat};

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber for one CLI run.
///
/// `-v` raises the level one step at a time from `warn`. A
/// `PHASETRACK_LOG_LEVEL` filter such as `phasetrack::delay=trace` replaces
/// the `-v` level entirely. A second call is a no-op.
pub fn init_logging(format: LogFormat, verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env("PHASETRACK_LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    // Module paths only help once per-phase debug output is on.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder
            .with_ansi(ansi_enabled(color, std::io::stderr().is_terminal()))
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Whether human logs get ANSI colors; `auto` needs a terminal and no `NO_COLOR`.
fn ansi_enabled(color: ColorChoice, stderr_is_terminal: bool) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stderr_is_terminal && std::env::var_os("NO_COLOR").is_none(),
    }
}
