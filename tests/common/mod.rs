//! Shared test harness for running the `phasetrack` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Variables that would leak host configuration into a test run.
const ISOLATED_VARS: [&str; 6] = [
    "PHASETRACK_PLAN",
    "PHASETRACK_DATE",
    "PHASETRACK_POLICY",
    "PHASETRACK_EVENTS",
    "PHASETRACK_COLOR",
    "PHASETRACK_LOG_LEVEL",
];

/// Runs the compiled binary for end-to-end tests.
pub struct PhaseTrackProcess;

impl PhaseTrackProcess {
    /// Runs a one-shot command and collects its output.
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_command_with_env(args, &[])
    }

    /// Runs a one-shot command with extra environment variables.
    pub fn spawn_command_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_phasetrack"));
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.envs(env.iter().copied())
            .args(args)
            .output()
            .expect("failed to run phasetrack")
    }

    /// Runs a command that must succeed and parses its stdout as JSON.
    pub fn json(args: &[&str]) -> serde_json::Value {
        let output = Self::spawn_command(args);
        assert!(
            output.status.success(),
            "phasetrack {args:?} should exit 0: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
    }
}

/// Path to a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// [`fixture_path`] as a string for argument lists.
pub fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}
