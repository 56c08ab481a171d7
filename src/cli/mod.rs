//! Command-line interface
//!
//! Argument definitions and command handlers for the `phasetrack` binary.

pub mod args;
pub mod commands;
