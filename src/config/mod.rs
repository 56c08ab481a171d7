//! Plan configuration
//!
//! Plan schema, the built-in plan, the YAML loader and the validator.

pub mod builtin;
pub mod loader;
pub mod schema;
pub mod validation;

pub use builtin::{BUILTIN_SOURCE, builtin_plan};
pub use loader::{ConfigLoader, LoadResult, LoadWarning, LoaderOptions, PlanLimits};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
