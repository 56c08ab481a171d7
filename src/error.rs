//! Error types for `phasetrack`
//!
//! Boundary errors are raised before anything reaches the delay engine;
//! the engine itself assumes validated input and never fails.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `phasetrack` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Plan configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Rejected user input (bad date, unknown checkpoint)
    pub const INPUT_ERROR: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Exit code for a failed command-line parse.
    ///
    /// Help and version requests surface as clap errors but are successes.
    #[must_use]
    pub fn for_clap_error(err: &clap::Error) -> i32 {
        match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                Self::SUCCESS
            }
            _ => Self::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `phasetrack` operations.
#[derive(Debug, Error)]
pub enum PhaseTrackError {
    /// Plan loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input rejected at the session boundary
    #[error(transparent)]
    Input(#[from] InputError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Flags that are individually valid but cannot be combined
    #[error("{0}")]
    Usage(String),
}

impl PhaseTrackError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Input(_) => ExitCode::INPUT_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
        }
    }
}

// ============================================================================
// Input Errors
// ============================================================================

/// Input rejected before it reaches the delay engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Date string is not a valid `YYYY-MM-DD` calendar date
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// Checkpoint references a phase id that is not in the plan
    #[error("unknown phase id {0}")]
    UnknownPhase(u32),

    /// Checkpoint kind is neither `start` nor `finish`
    #[error("unknown checkpoint kind '{0}': expected 'start' or 'finish'")]
    UnknownCheckpointKind(String),

    /// Checkpoint key is not of the form `<phase id>_<kind>`
    #[error("malformed checkpoint '{0}': expected <phase id>_<start|finish>")]
    MalformedCheckpoint(String),

    /// The session clock follows real time and cannot be moved
    #[error("clock is fixed to the system date and cannot be set")]
    ClockFixed,
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Plan loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the plan file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Plan validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path (or label) of the plan
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced plan file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Plan file exists but could not be read
    #[error("cannot read {path}: {source}")]
    ReadError {
        /// Path to the plan file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Environment variable referenced in the plan is not set
    #[error("environment variable '{var}' not set (referenced at {location})")]
    EnvVarNotSet {
        /// Name of the environment variable
        var: String,
        /// Location in the plan where it was referenced
        location: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during plan validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "phases[2].base_deadline")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Prevents the plan from being used
    Error,
    /// Reported, but the plan still loads
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `phasetrack` operations.
pub type Result<T> = std::result::Result<T, PhaseTrackError>;

// ============================================================================
// Tests
// ============================================================================
