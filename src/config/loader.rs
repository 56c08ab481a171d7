//! Plan loader
//!
//! Loading pipeline:
//! 1. Size limit check
//! 2. Environment variable expansion (pre-parse, on raw text)
//! 3. YAML parsing
//! 4. Deserialization to a typed [`Plan`]
//! 5. Validation

use crate::config::schema::Plan;
use crate::config::validation::Validator;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};
use tracing::debug;

// ============================================================================
// Public API
// ============================================================================

/// Options for the plan loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for plan size.
    pub limits: PlanLimits,
}

/// Limits on plan size.
#[derive(Debug, Clone)]
pub struct PlanLimits {
    /// Maximum number of phases.
    pub max_phases: usize,

    /// Maximum plan file size in bytes.
    pub max_plan_size: usize,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            max_phases: env_or("PHASETRACK_MAX_PHASES", 100),
            max_plan_size: env_or("PHASETRACK_MAX_PLAN_SIZE", 1024 * 1024),
        }
    }
}

/// Result of loading a plan.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated plan.
    pub plan: Plan,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during plan loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} at {location}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Plan loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads and validates a plan file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - A required environment variable is unset
    /// - YAML parsing or deserialization fails
    /// - Validation fails
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|e| read_error(path, e))?;

        let max = self.options.limits.max_plan_size;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > max {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {max} bytes"),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;

        debug!(path = %path.display(), bytes = raw.len(), "loading plan");
        self.load_str(&raw, path)
    }

    /// Loads and validates a plan from text; `source` labels errors.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus the file access failures.
    pub fn load_str(&self, raw: &str, source: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        // Handle UTF-8 BOM
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(raw, source)?;
        warnings.extend(env_sub.warnings);

        let root: serde_yaml::Value =
            serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
                path: source.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        if root.is_null() {
            return Err(ConfigError::ParseError {
                path: source.to_path_buf(),
                line: None,
                message: "Plan file is empty".to_string(),
            });
        }

        let plan: Plan = serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
            path: source.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: format!("Failed to deserialize plan: {e}"),
        })?;

        let mut validator = Validator::new();
        let result = validator.validate(&plan, &self.options.limits);

        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: source.display().to_string(),
                errors: result.errors,
            });
        }

        for issue in result.warnings {
            warnings.push(LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            });
        }

        Ok(LoadResult { plan, warnings })
    }
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Pre-parse environment variable substitution.
struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw YAML text.
    ///
    /// Supports:
    /// - `${VAR}` - expand to value (empty string if unset with warning)
    /// - `${VAR:-default}` - expand to default if unset
    /// - `${VAR:?message}` - fail if unset
    /// - `$$` - literal `$`
    fn substitute(&mut self, raw_yaml: &str, source_path: &Path) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw_yaml.len());
        let mut chars = raw_yaml.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    result.push('$');
                }
                Some('{') => {
                    chars.next();
                    let spec = Self::parse_var_spec(&mut chars, source_path)?;
                    match std::env::var(&spec.name) {
                        Ok(value) => result.push_str(&value),
                        Err(_) => {
                            if let Some(default) = spec.default {
                                result.push_str(&default);
                            } else if let Some(message) = spec.required {
                                return Err(ConfigError::EnvVarNotSet {
                                    var: spec.name,
                                    location: message,
                                });
                            } else {
                                self.warnings.push(LoadWarning {
                                    message: format!(
                                        "Environment variable '{}' is not set, using empty string",
                                        spec.name
                                    ),
                                    location: Some(source_path.display().to_string()),
                                });
                            }
                        }
                    }
                }
                _ => result.push(c),
            }
        }

        Ok(result)
    }

    /// Parses the inside of `${...}`; the opening brace is already consumed.
    fn parse_var_spec(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
    ) -> Result<VarSpec, ConfigError> {
        let mut name = String::new();

        while let Some(c) = chars.next() {
            match c {
                '}' => {
                    return Ok(VarSpec {
                        name,
                        default: None,
                        required: None,
                    });
                }
                ':' => match chars.peek() {
                    Some('-') => {
                        chars.next();
                        let default = Self::read_until_close(chars, source_path)?;
                        return Ok(VarSpec {
                            name,
                            default: Some(default),
                            required: None,
                        });
                    }
                    Some('?') => {
                        chars.next();
                        let message = Self::read_until_close(chars, source_path)?;
                        return Ok(VarSpec {
                            name,
                            default: None,
                            required: Some(message),
                        });
                    }
                    _ => name.push(':'),
                },
                _ => name.push(c),
            }
        }

        Err(unclosed(source_path, &name))
    }

    /// Reads content until the matching `}`, allowing nested braces.
    fn read_until_close(
        chars: &mut std::iter::Peekable<std::str::Chars>,
        source_path: &Path,
    ) -> Result<String, ConfigError> {
        let mut value = String::new();
        let mut depth = 1;

        for c in chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                }
                _ => {}
            }
            value.push(c);
        }

        Err(unclosed(source_path, &value))
    }
}

/// A parsed `${...}` reference.
struct VarSpec {
    name: String,
    default: Option<String>,
    required: Option<String>,
}

fn unclosed(source_path: &Path, fragment: &str) -> ConfigError {
    ConfigError::ParseError {
        path: PathBuf::from(source_path),
        line: None,
        message: format!("Unclosed environment variable reference: ${{{fragment}"),
    }
}

/// Only a missing file is reported as missing; anything else keeps its cause.
fn read_error(path: &Path, err: std::io::Error) -> ConfigError {
    match err.kind() {
        std::io::ErrorKind::NotFound => ConfigError::MissingFile {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::InvalidData => ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: "Plan file is not valid UTF-8".to_string(),
        },
        _ => ConfigError::ReadError {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
