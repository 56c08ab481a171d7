//! CLI argument definitions
//!
//! All Clap derive structs for `phasetrack` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Milestone payment and delay tracker for phased project plans.
#[derive(Parser, Debug)]
#[command(name = "phasetrack", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "PHASETRACK_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the plan and show per-phase status.
    Status(StatusArgs),

    /// Validate plan files.
    Validate(ValidateArgs),

    /// Show the plan's phases and payment split.
    Plan(PlanArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Status Command
// ============================================================================

/// Arguments for `status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Plan file; the built-in plan is used when omitted.
    #[arg(short, long, env = "PHASETRACK_PLAN")]
    pub plan: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD); simulates the clock.
    #[arg(short, long, env = "PHASETRACK_DATE")]
    pub date: Option<String>,

    /// Mark a checkpoint paid before evaluating (e.g. `1_finish`). Repeatable.
    #[arg(long = "pay", value_name = "CHECKPOINT")]
    pub pay: Vec<String>,

    /// Penalty policy preset, overriding the plan.
    #[arg(long, env = "PHASETRACK_POLICY")]
    pub policy: Option<PolicyPreset>,

    /// Penalty days charged per late day.
    #[arg(long)]
    pub penalty_multiplier: Option<u32>,

    /// Keep penalties from shifting later phases.
    #[arg(long)]
    pub no_cascade: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Write session events as JSONL to this file (`-` for stdout).
    #[arg(long, env = "PHASETRACK_EVENTS")]
    pub events: Option<PathBuf>,
}

/// Penalty policy presets.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyPreset {
    /// Three penalty days per late day, cascading forward.
    Cascading,
    /// No penalty, no shift.
    Flat,
}

// ============================================================================
// Validate Command
// ============================================================================

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Plan files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// Plan Command
// ============================================================================

/// Arguments for `plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Plan file; the built-in plan is used when omitted.
    #[arg(short, long, env = "PHASETRACK_PLAN")]
    pub plan: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Utility Commands
// ============================================================================

/// Arguments for `completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    pub shell: clap_complete::Shell,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Shared Enums
// ============================================================================

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// JSON.
    Json,
}

/// Color output control.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// Log output format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}
