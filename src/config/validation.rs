//! Plan validation
//!
//! Semantic checks run on a deserialized [`Plan`]. Validation collects ALL
//! issues rather than stopping at the first one.

use crate::checkpoint::CheckpointId;
use crate::config::loader::PlanLimits;
use crate::config::schema::{Phase, Plan};
use crate::error::{Severity, ValidationIssue};

use std::collections::HashSet;

// ============================================================================
// Public API
// ============================================================================

/// Result of plan validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Plan validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a plan and returns every issue found.
    pub fn validate(&mut self, plan: &Plan, limits: &PlanLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_project(plan);
        self.validate_phases(&plan.phases);
        self.validate_paid(plan);
        self.validate_policy(plan);
        self.validate_limits(plan, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_project(&mut self, plan: &Plan) {
        if plan.project.name.trim().is_empty() {
            self.add_error("project.name", "Project name is required and cannot be empty");
        }
        if plan.project.name.len() > 100 {
            self.add_warning(
                "project.name",
                "Project name is unusually long (> 100 characters)",
            );
        }
    }

    fn validate_phases(&mut self, phases: &[Phase]) {
        if phases.is_empty() {
            self.add_error("phases", "At least one phase is required");
            return;
        }

        let mut seen = HashSet::new();
        for (i, phase) in phases.iter().enumerate() {
            let path = format!("phases[{i}]");

            if phase.id == 0 {
                self.add_error(&format!("{path}.id"), "Phase id must be positive");
            } else if !seen.insert(phase.id) {
                self.add_error(
                    &format!("{path}.id"),
                    &format!("Duplicate phase id {}", phase.id),
                );
            }

            if phase.title.trim().is_empty() {
                self.add_error(&format!("{path}.title"), "Phase title cannot be empty");
            }

            if !phase.demo_link.is_empty()
                && !phase.demo_link.starts_with("https://")
                && !phase.demo_link.starts_with("http://")
            {
                self.add_warning(
                    &format!("{path}.demo_link"),
                    "Demo link is not an http(s) URL",
                );
            }
        }

        if phases.windows(2).any(|w| w[0].id >= w[1].id) {
            self.add_warning(
                "phases",
                "Phases are not listed in ascending id order; they are evaluated by id",
            );
        }

        let mut ordered: Vec<&Phase> = phases.iter().collect();
        ordered.sort_by_key(|p| p.id);
        for pair in ordered.windows(2) {
            if pair[1].base_deadline < pair[0].base_deadline {
                self.add_warning(
                    "phases",
                    &format!(
                        "Phase {} is due before phase {} ({} < {})",
                        pair[1].id, pair[0].id, pair[1].base_deadline, pair[0].base_deadline
                    ),
                );
            }
        }
    }

    fn validate_paid(&mut self, plan: &Plan) {
        let mut seen = HashSet::new();
        for (i, key) in plan.paid.iter().enumerate() {
            let path = format!("paid[{i}]");
            match key.parse::<CheckpointId>() {
                Ok(id) => {
                    if plan.phase(id.phase_id).is_none() {
                        self.add_error(
                            &path,
                            &format!("Checkpoint '{key}' references unknown phase {}", id.phase_id),
                        );
                    } else if !seen.insert(id) {
                        self.add_warning(&path, &format!("Checkpoint '{key}' is listed twice"));
                    }
                }
                Err(e) => self.add_error(&path, &e.to_string()),
            }
        }
    }

    fn validate_policy(&mut self, plan: &Plan) {
        if plan.policy.enable_cascade && plan.policy.penalty_multiplier == 0 {
            self.add_warning(
                "policy.cascade",
                "Cascade has no effect with a penalty multiplier of 0",
            );
        }
    }

    fn validate_limits(&mut self, plan: &Plan, limits: &PlanLimits) {
        if plan.phases.len() > limits.max_phases {
            self.add_error(
                "phases",
                &format!(
                    "Plan has {} phases, exceeding the limit of {}",
                    plan.phases.len(),
                    limits.max_phases
                ),
            );
        }
    }

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}
