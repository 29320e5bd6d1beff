//! Naming and target validation: purpose charset, derived rule-name
//! limits, and ARN shape.

use cronbind_core::config::NamingConfig;
use cronbind_core::Arn;

use super::ValidationResult;
use crate::binder::{derive_rule_name, sanitize, MAX_NAME_LEN};
use crate::schema::ScheduleSpec;

pub(super) fn validate_naming(
    spec: &ScheduleSpec,
    naming: &NamingConfig,
    result: &mut ValidationResult,
) {
    if spec.metadata.id.trim().is_empty() {
        result.error("metadata.id", "Spec id must not be empty");
    }

    let purpose = spec.purpose.trim();
    if purpose.is_empty() {
        result.error("purpose", "Purpose must not be empty");
        return;
    }

    let sanitized = sanitize(&spec.purpose);
    if sanitized != spec.purpose {
        result.warn(
            "purpose",
            format!("Purpose '{}' will be sanitized to '{}'", spec.purpose, sanitized),
        );
    }

    let rule_name = derive_rule_name(naming, &spec.purpose);
    let raw_len = naming.prefix.len() + naming.client.len() + naming.environment.len()
        + spec.purpose.trim().len()
        + 3;
    if raw_len > MAX_NAME_LEN {
        result.warn(
            "purpose",
            format!(
                "Derived rule name exceeds {} characters and is truncated to '{}'",
                MAX_NAME_LEN, rule_name
            ),
        );
    }

    if !spec.metadata.enabled {
        result.warn(
            "metadata.enabled",
            format!("Spec is disabled; rule '{}' will be created in DISABLED state", rule_name),
        );
    }
}

pub(super) fn validate_target(spec: &ScheduleSpec, result: &mut ValidationResult) {
    if spec.target.function_name.trim().is_empty() {
        result.error("target.functionName", "Function name must not be empty");
    }

    match Arn::parse(&spec.target.function_arn) {
        Err(e) => result.error("target.functionArn", e.to_string()),
        Ok(arn) => {
            if arn.service != "lambda" {
                result.warn(
                    "target.functionArn",
                    format!("ARN points at service '{}', expected 'lambda'", arn.service),
                );
            }
        }
    }

    if let Some(role_arn) = &spec.target.role_arn {
        if let Err(e) = Arn::parse(role_arn) {
            result.error("target.roleArn", e.to_string());
        }
    }
}
