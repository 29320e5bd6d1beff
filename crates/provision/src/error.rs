//! Provisioning error taxonomy.
//!
//! All variants are validation failures detected before any external side
//! effect; none are retryable without corrected input. Each carries the
//! offending identifiers so a batch report can point at the exact spec.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    /// `local_time` is not a valid 24-hour `HH:MM` value.
    #[error("invalid local time '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    /// The UTC offset is fractional-hour, out of range, or unparseable.
    #[error("unsupported UTC offset '{value}': {reason}")]
    UnsupportedOffset { value: String, reason: String },

    /// Two specs in one deployment scope resolve to the same rule name.
    #[error("duplicate rule name '{rule_name}': specs '{first_spec_id}' and '{second_spec_id}' both resolve to it")]
    DuplicateRuleName {
        rule_name: String,
        first_spec_id: String,
        second_spec_id: String,
    },

    /// The same function is already granted under a different rule with a
    /// semantically-equivalent schedule.
    #[error("ambiguous grant for function '{function_name}': rule '{rule_name}' repeats the schedule already granted under rule '{existing_rule}'")]
    AmbiguousGrant {
        function_name: String,
        rule_name: String,
        existing_rule: String,
    },
}

/// Result alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;
