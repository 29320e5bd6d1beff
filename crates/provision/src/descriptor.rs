//! Output descriptors consumed by external collaborators: the scheduling
//! service, the target-binding layer, and the permission layer.

use serde::{Deserialize, Serialize};

use crate::pipeline::{BatchOutcome, ProvisionedTrigger};

/// Rule descriptor for the cloud scheduling service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub name: String,
    pub schedule_expression: String,
    pub description: String,
    /// `ENABLED` or `DISABLED`.
    pub state: String,
}

/// Target binding descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub rule_name: String,
    pub target_id: String,
    pub target_arn: String,
}

/// Grant descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantDescriptor {
    pub statement_id: String,
    pub action: String,
    pub principal: String,
    pub function_name: String,
    pub source_arn: String,
}

/// The three descriptors of one provisioned spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerPlan {
    pub spec_id: String,
    pub rule: RuleDescriptor,
    pub target: TargetDescriptor,
    pub grant: GrantDescriptor,
}

impl From<&ProvisionedTrigger> for TriggerPlan {
    fn from(trigger: &ProvisionedTrigger) -> Self {
        let binding = &trigger.binding;
        let state = if binding.enabled { "ENABLED" } else { "DISABLED" };
        Self {
            spec_id: trigger.spec_id.clone(),
            rule: RuleDescriptor {
                name: binding.rule_name.clone(),
                schedule_expression: binding.cron.expression(),
                description: binding.description.clone(),
                state: state.to_string(),
            },
            target: TargetDescriptor {
                rule_name: binding.rule_name.clone(),
                target_id: binding.target_id.clone(),
                target_arn: binding.target.arn.clone(),
            },
            grant: GrantDescriptor {
                statement_id: trigger.grant.statement_id.clone(),
                action: trigger.grant.action.clone(),
                principal: trigger.grant.principal.clone(),
                function_name: trigger.grant.function_name.clone(),
                source_arn: trigger.grant.source_arn.clone(),
            },
        }
    }
}

/// A failed spec as it appears in plan output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFailure {
    pub spec_id: String,
    pub state_reached: String,
    pub error: String,
}

/// The full plan for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub triggers: Vec<TriggerPlan>,
    pub failures: Vec<PlanFailure>,
}

impl From<&BatchOutcome> for Plan {
    fn from(outcome: &BatchOutcome) -> Self {
        Self {
            triggers: outcome.provisioned.iter().map(TriggerPlan::from).collect(),
            failures: outcome
                .failures
                .iter()
                .map(|f| PlanFailure {
                    spec_id: f.spec_id.clone(),
                    state_reached: f.state_reached.to_string(),
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::DeploymentRegistry;
    use crate::pipeline::provision_all;
    use crate::schema::{OffsetValue, ScheduleBlock, ScheduleSpec, SpecMetadata, TargetBlock};
    use cronbind_core::DeployConfig;

    fn spec(enabled: bool) -> ScheduleSpec {
        ScheduleSpec {
            api_version: "v1".into(),
            kind: "ScheduleSpec".into(),
            metadata: SpecMetadata {
                id: "daily-report".into(),
                name: "Daily report".into(),
                description: Some("Morning report run".into()),
                tags: None,
                enabled,
            },
            schedule: ScheduleBlock {
                local_time: "08:50".into(),
                utc_offset: OffsetValue::Hours(-3),
            },
            target: TargetBlock {
                function_name: "report-generator".into(),
                function_arn: "arn:aws:lambda:sa-east-1:123456789012:function:report-generator"
                    .into(),
                role_arn: None,
            },
            purpose: "daily-report".into(),
        }
    }

    #[test]
    fn plan_carries_all_three_descriptors() {
        let mut cfg = DeployConfig::for_profile("");
        cfg.aws.partition = "aws".into();
        cfg.aws.account_id = "123456789012".into();
        cfg.aws.region = "sa-east-1".into();
        let mut registry = DeploymentRegistry::new();
        let specs = [spec(true)];
        let outcome = provision_all(specs.iter(), &cfg, &mut registry);
        let plan = Plan::from(&outcome);

        assert_eq!(plan.triggers.len(), 1);
        assert!(plan.failures.is_empty());

        let t = &plan.triggers[0];
        assert_eq!(t.rule.schedule_expression, "cron(50 11 * * ? *)");
        assert_eq!(t.rule.state, "ENABLED");
        assert_eq!(t.rule.description, "Morning report run");
        assert_eq!(t.target.rule_name, t.rule.name);
        assert_eq!(t.grant.source_arn, format!(
            "arn:aws:events:sa-east-1:123456789012:rule/{}",
            t.rule.name
        ));
    }

    #[test]
    fn disabled_spec_plans_a_disabled_rule() {
        let mut cfg = DeployConfig::for_profile("");
        cfg.aws.account_id = "123456789012".into();
        let mut registry = DeploymentRegistry::new();
        let specs = [spec(false)];
        let outcome = provision_all(specs.iter(), &cfg, &mut registry);
        let plan = Plan::from(&outcome);
        assert_eq!(plan.triggers[0].rule.state, "DISABLED");
    }

    #[test]
    fn plan_serializes_to_json_and_yaml() {
        let mut cfg = DeployConfig::for_profile("");
        cfg.aws.account_id = "123456789012".into();
        let mut registry = DeploymentRegistry::new();
        let specs = [spec(true)];
        let outcome = provision_all(specs.iter(), &cfg, &mut registry);
        let plan = Plan::from(&outcome);

        let json = serde_json::to_string_pretty(&plan).unwrap();
        assert!(json.contains("cron(50 11 * * ? *)"));
        let yaml = serde_yaml::to_string(&plan).unwrap();
        assert!(yaml.contains("statement_id: allow-"));
    }
}
