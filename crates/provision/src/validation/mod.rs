//! Spec validation with structured errors and suggestions.
//!
//! Advisory pre-flight over parsed documents: collects every problem in one
//! pass (schedule, naming, targets, cross-spec duplicates) so an operator
//! can fix a file once instead of replaying the pipeline error by error.
//! The pipeline's `ProvisionError` taxonomy remains the authoritative gate.

mod naming_checks;
mod schedule_checks;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cronbind_core::config::NamingConfig;

use crate::binder::derive_rule_name;
use crate::resolver;
use crate::schema::ScheduleSpec;

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location, e.g. `"schedule.localTime"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }

    fn merge(&mut self, other: ValidationResult) {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a single parsed [`ScheduleSpec`].
pub fn validate_spec(spec: &ScheduleSpec, naming: &NamingConfig) -> ValidationResult {
    let mut result = ValidationResult::new();
    schedule_checks::validate_schedule(spec, &mut result);
    naming_checks::validate_naming(spec, naming, &mut result);
    naming_checks::validate_target(spec, &mut result);
    result
}

/// Validate a batch: per-spec checks plus cross-spec duplicate detection.
///
/// Duplicate ids, colliding derived rule names, and semantically-equivalent
/// schedules for one function are all reported here — the same conditions
/// the pipeline rejects, surfaced before it runs.
pub fn validate_batch(specs: &[ScheduleSpec], naming: &NamingConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    for spec in specs {
        result.merge(validate_spec(spec, naming));
    }

    let mut ids: HashMap<&str, &str> = HashMap::new();
    let mut rule_names: HashMap<String, &str> = HashMap::new();
    let mut schedules: HashMap<(String, String), (&str, String)> = HashMap::new();

    for spec in specs {
        let id = spec.metadata.id.as_str();
        if let Some(first) = ids.insert(id, id) {
            result.error(
                "metadata.id",
                format!("Spec id '{}' is defined more than once", first),
            );
        }

        let rule_name = derive_rule_name(naming, &spec.purpose);
        if let Some(first) = rule_names.insert(rule_name.clone(), id) {
            result.error(
                "purpose",
                format!(
                    "Specs '{}' and '{}' both resolve to rule name '{}'",
                    first, id, rule_name
                ),
            );
        }

        if let Ok(cron) = resolver::resolve(&spec.schedule.local_time, &spec.schedule.utc_offset) {
            let key = (spec.target.function_arn.clone(), cron.expression());
            if let Some((first, first_rule)) = schedules.insert(key, (id, rule_name.clone())) {
                if first_rule != rule_name {
                    result.error(
                        "schedule",
                        format!(
                            "Specs '{}' and '{}' schedule the same function at the same time under different rule names",
                            first, id
                        ),
                    );
                }
            }
        }
    }

    result
}

/// Parse raw YAML and validate. Returns parse errors merged with validation errors.
pub fn validate_yaml(yaml: &str, naming: &NamingConfig) -> ValidationResult {
    match serde_yaml::from_str::<ScheduleSpec>(yaml) {
        Ok(spec) => validate_spec(&spec, naming),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", format!("YAML parse error: {e}"));
            result
        }
    }
}
