//! Permission grantor: derives the least-privilege invoke grant for a
//! trigger binding.

use serde::Serialize;

use crate::binder::{DeploymentRegistry, TriggerBinding};
use crate::error::{ProvisionError, Result};

/// The action every grant authorizes.
pub const INVOKE_ACTION: &str = "lambda:InvokeFunction";

/// The event-scheduling service identity grants are issued to.
pub const EVENTS_PRINCIPAL: &str = "events.amazonaws.com";

/// A permission statement authorizing the scheduling service to invoke one
/// target, scoped to the originating rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvokeGrant {
    pub statement_id: String,
    pub action: String,
    pub principal: String,
    pub function_name: String,
    /// The exact ARN of the originating rule. Never a wildcard, never
    /// another rule's ARN: an unrelated scheduled rule must not be able to
    /// invoke this function through a loose grant.
    pub source_arn: String,
}

/// Emit exactly one grant for the binding.
///
/// Fails with `AmbiguousGrant` when the same function already holds a grant
/// under a different rule with a semantically-equivalent schedule — the
/// duplicated-rule drift where one logical schedule is redefined under
/// multiple names.
pub fn grant(binding: &TriggerBinding, registry: &DeploymentRegistry) -> Result<InvokeGrant> {
    if let Some(existing) = registry.find_equivalent(&binding.target.arn, binding.cron) {
        if existing.binding.rule_name != binding.rule_name {
            return Err(ProvisionError::AmbiguousGrant {
                function_name: binding.target.identifier.clone(),
                rule_name: binding.rule_name.clone(),
                existing_rule: existing.binding.rule_name.clone(),
            });
        }
    }

    Ok(InvokeGrant {
        // Unique per target because rule names are unique per deployment.
        statement_id: format!("allow-{}", binding.rule_name),
        action: INVOKE_ACTION.to_string(),
        principal: EVENTS_PRINCIPAL.to_string(),
        function_name: binding.target.identifier.clone(),
        source_arn: binding.rule_arn.clone(),
    })
}
