//! Caller-owned registry of provisioned triggers for one deployment scope.

use indexmap::IndexMap;

use crate::pipeline::ProvisionedTrigger;
use crate::resolver::UtcCron;

/// Everything provisioned in one deployment scope, keyed by rule name.
///
/// This replaces the implicit "already-defined resources" state that the
/// duplicated source definitions relied on: duplicate detection becomes an
/// explicit lookup against an object the caller owns. Every pipeline run
/// starts from an empty registry; nothing persists across runs.
///
/// Insertion order is preserved so that plan output is stable run to run.
#[derive(Debug, Default)]
pub struct DeploymentRegistry {
    triggers: IndexMap<String, ProvisionedTrigger>,
}

impl DeploymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_rule(&self, rule_name: &str) -> bool {
        self.triggers.contains_key(rule_name)
    }

    /// The spec that registered the given rule name, if any.
    pub fn spec_for_rule(&self, rule_name: &str) -> Option<&str> {
        self.triggers.get(rule_name).map(|t| t.spec_id.as_str())
    }

    /// A committed trigger for the same function with the same schedule,
    /// registered under a *different* rule name.
    pub fn find_equivalent(&self, function_arn: &str, cron: UtcCron) -> Option<&ProvisionedTrigger> {
        self.triggers
            .values()
            .find(|t| t.binding.target.arn == function_arn && t.binding.cron == cron)
    }

    /// Register a fully-granted trigger. The pipeline calls this once per
    /// spec, after all three entities exist (all-or-nothing).
    pub(crate) fn commit(&mut self, trigger: ProvisionedTrigger) {
        debug_assert!(!self.contains_rule(&trigger.binding.rule_name));
        self.triggers
            .insert(trigger.binding.rule_name.clone(), trigger);
    }

    /// Remove a trigger by rule name.
    ///
    /// Binding and grant live in one record, so removal cascades: no grant
    /// can outlive its binding.
    pub fn remove(&mut self, rule_name: &str) -> Option<ProvisionedTrigger> {
        self.triggers.shift_remove(rule_name)
    }

    pub fn get(&self, rule_name: &str) -> Option<&ProvisionedTrigger> {
        self.triggers.get(rule_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProvisionedTrigger> {
        self.triggers.values()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
