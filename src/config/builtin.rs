//! Built-in plan shipped with the binary.
//!
//! Six phases, a simulated clock starting on 2024-12-05, the cascading
//! policy, and phase 1's kickoff payment already made.

use std::path::Path;

use crate::config::loader::{ConfigLoader, LoadResult};
use crate::error::ConfigError;

const BUILTIN_PLAN: &str = include_str!("builtin.yaml");

/// Label used in place of a file path for the built-in plan.
pub const BUILTIN_SOURCE: &str = "<builtin>";

/// Loads the built-in plan through the regular loader.
///
/// # Errors
///
/// Only if the embedded document itself is broken.
pub fn builtin_plan() -> Result<LoadResult, ConfigError> {
    ConfigLoader::with_defaults().load_str(BUILTIN_PLAN, Path::new(BUILTIN_SOURCE))
}
