//! Trigger binder: associates a resolved cron rule with exactly one
//! invocation target under a deterministically derived rule name.

mod registry;

pub use registry::DeploymentRegistry;

use serde::Serialize;

use cronbind_core::config::{DeployConfig, NamingConfig};
use cronbind_core::events_rule_arn;

use crate::error::{ProvisionError, Result};
use crate::resolver::UtcCron;
use crate::schema::{FunctionRef, ScheduleSpec};

/// Scheduling-service limit on rule and target identifiers.
pub const MAX_NAME_LEN: usize = 64;

/// A cron rule bound to exactly one invocation target.
///
/// One rule maps to exactly one binding in this design; there is no
/// fan-out. `rule_name` is globally unique within the deployment scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerBinding {
    pub rule_name: String,
    pub rule_arn: String,
    /// Identifier of the target within the rule's target set.
    pub target_id: String,
    pub target: FunctionRef,
    pub cron: UtcCron,
    pub enabled: bool,
    pub description: String,
}

/// Derive the deployment-scoped rule name:
/// `{prefix}-{client}-{environment}-{purpose}`.
///
/// A pure function of its inputs — no randomness, no timestamps — so
/// re-invocation is idempotent. Components are sanitized to the scheduling
/// service's charset and the result is capped at [`MAX_NAME_LEN`].
pub fn derive_rule_name(naming: &NamingConfig, purpose: &str) -> String {
    let name = format!(
        "{}-{}-{}-{}",
        sanitize(&naming.prefix),
        sanitize(&naming.client),
        sanitize(&naming.environment),
        sanitize(purpose),
    );
    cap(&name)
}

/// Lowercase and replace anything outside `[a-z0-9._-]`.
pub(crate) fn sanitize(part: &str) -> String {
    part.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn cap(name: &str) -> String {
    let mut capped: String = name.chars().take(MAX_NAME_LEN).collect();
    while capped.ends_with('-') {
        capped.pop();
    }
    capped
}

/// Bind a spec's resolved schedule to its target.
///
/// Fails eagerly with `DuplicateRuleName` when the derived name is already
/// registered in this deployment scope — detected here, not at apply time.
pub fn bind(
    spec: &ScheduleSpec,
    cron: UtcCron,
    config: &DeployConfig,
    registry: &DeploymentRegistry,
) -> Result<TriggerBinding> {
    let rule_name = derive_rule_name(&config.naming, &spec.purpose);

    if let Some(existing_spec) = registry.spec_for_rule(&rule_name) {
        return Err(ProvisionError::DuplicateRuleName {
            rule_name,
            first_spec_id: existing_spec.to_string(),
            second_spec_id: spec.metadata.id.clone(),
        });
    }

    let target = spec.target.function_ref();
    let description = spec.metadata.description.clone().unwrap_or_else(|| {
        format!(
            "Invokes {} daily at {} local time ({})",
            target.identifier,
            spec.schedule.local_time.trim(),
            cron.expression()
        )
    });

    Ok(TriggerBinding {
        rule_arn: events_rule_arn(&config.aws, &rule_name),
        target_id: cap(&format!("{}-lambda", sanitize(&spec.purpose))),
        target,
        cron,
        enabled: spec.metadata.enabled,
        rule_name,
        description,
    })
}
