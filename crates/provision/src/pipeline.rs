//! The provisioning pipeline: resolve → bind → grant, per spec, with
//! all-or-nothing commits and per-spec failure reporting.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use cronbind_core::DeployConfig;

use crate::binder::{self, DeploymentRegistry, TriggerBinding};
use crate::error::{ProvisionError, Result};
use crate::grantor::{self, InvokeGrant};
use crate::resolver;
use crate::schema::ScheduleSpec;

/// Pipeline stages, one-way. A failed resolution returns to `Draft` for
/// operator correction; there are no retries within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerState {
    Draft,
    Validated,
    Bound,
    Granted,
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriggerState::Draft => "draft",
            TriggerState::Validated => "validated",
            TriggerState::Bound => "bound",
            TriggerState::Granted => "granted",
        };
        f.write_str(s)
    }
}

/// The three entities of one spec, created together and removed together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionedTrigger {
    pub spec_id: String,
    pub state: TriggerState,
    pub binding: TriggerBinding,
    pub grant: InvokeGrant,
}

/// Run one spec through the full pipeline and commit it to the registry.
///
/// Nothing is registered until the grant exists: either all three entities
/// for the spec are produced, or none are.
pub fn provision(
    spec: &ScheduleSpec,
    config: &DeployConfig,
    registry: &mut DeploymentRegistry,
) -> Result<ProvisionedTrigger> {
    // Draft → Validated
    let cron = resolver::resolve(&spec.schedule.local_time, &spec.schedule.utc_offset)?;
    // Validated → Bound
    let binding = binder::bind(spec, cron, config, registry)?;
    // Bound → Granted
    let grant = grantor::grant(&binding, registry)?;

    let trigger = ProvisionedTrigger {
        spec_id: spec.metadata.id.clone(),
        state: TriggerState::Granted,
        binding,
        grant,
    };
    registry.commit(trigger.clone());

    info!(
        spec_id = %trigger.spec_id,
        rule = %trigger.binding.rule_name,
        cron = %trigger.binding.cron,
        "provisioned trigger"
    );
    Ok(trigger)
}

/// The last stage a spec completed before the given error stopped it.
pub fn state_reached(error: &ProvisionError) -> TriggerState {
    match error {
        ProvisionError::InvalidTime { .. } | ProvisionError::UnsupportedOffset { .. } => {
            TriggerState::Draft
        }
        ProvisionError::DuplicateRuleName { .. } => TriggerState::Validated,
        ProvisionError::AmbiguousGrant { .. } => TriggerState::Bound,
    }
}

/// One spec's failure within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFailure {
    pub spec_id: String,
    pub state_reached: TriggerState,
    pub error: ProvisionError,
}

/// Outcome of a batch run: independent specs succeed or fail on their own.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub provisioned: Vec<ProvisionedTrigger>,
    pub failures: Vec<SpecFailure>,
}

impl BatchOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every spec through the pipeline against one shared registry.
///
/// A failed spec is reported individually and does not stop the batch;
/// name registration stays serialized through the registry so duplicate
/// detection is deterministic in input order.
pub fn provision_all<'a, I>(
    specs: I,
    config: &DeployConfig,
    registry: &mut DeploymentRegistry,
) -> BatchOutcome
where
    I: IntoIterator<Item = &'a ScheduleSpec>,
{
    let mut outcome = BatchOutcome::default();

    for spec in specs {
        match provision(spec, config, registry) {
            Ok(trigger) => outcome.provisioned.push(trigger),
            Err(error) => {
                warn!(spec_id = %spec.metadata.id, error = %error, "spec failed to provision");
                outcome.failures.push(SpecFailure {
                    spec_id: spec.metadata.id.clone(),
                    state_reached: state_reached(&error),
                    error,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{OffsetValue, ScheduleBlock, SpecMetadata, TargetBlock};

    fn config() -> DeployConfig {
        let mut cfg = DeployConfig::for_profile("");
        cfg.naming.prefix = "crb".into();
        cfg.naming.client = "acme".into();
        cfg.naming.environment = "prd".into();
        cfg.aws.region = "sa-east-1".into();
        cfg.aws.account_id = "123456789012".into();
        cfg
    }

    fn spec(id: &str, purpose: &str, local_time: &str, function: &str) -> ScheduleSpec {
        ScheduleSpec {
            api_version: "v1".into(),
            kind: "ScheduleSpec".into(),
            metadata: SpecMetadata {
                id: id.into(),
                name: format!("Spec {}", id),
                description: None,
                tags: None,
                enabled: true,
            },
            schedule: ScheduleBlock {
                local_time: local_time.into(),
                utc_offset: OffsetValue::Hours(-3),
            },
            target: TargetBlock {
                function_name: function.into(),
                function_arn: format!(
                    "arn:aws:lambda:sa-east-1:123456789012:function:{}",
                    function
                ),
                role_arn: None,
            },
            purpose: purpose.into(),
        }
    }

    #[test]
    fn full_pipeline_produces_all_three_entities() {
        let cfg = config();
        let mut registry = DeploymentRegistry::new();
        let trigger = provision(&spec("a", "daily-report", "08:50", "report-generator"), &cfg, &mut registry).unwrap();

        assert_eq!(trigger.state, TriggerState::Granted);
        assert_eq!(trigger.binding.cron.expression(), "cron(50 11 * * ? *)");
        assert_eq!(trigger.grant.source_arn, trigger.binding.rule_arn);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_rule_name_is_detected_eagerly() {
        let cfg = config();
        let mut registry = DeploymentRegistry::new();
        provision(&spec("a", "daily-report", "08:50", "report-generator"), &cfg, &mut registry).unwrap();

        // Different spec id and time, same purpose: same derived name.
        let err = provision(&spec("b", "daily-report", "10:00", "other-fn"), &cfg, &mut registry)
            .unwrap_err();
        match err {
            ProvisionError::DuplicateRuleName {
                rule_name,
                first_spec_id,
                second_spec_id,
            } => {
                assert_eq!(rule_name, "crb-acme-prd-daily-report");
                assert_eq!(first_spec_id, "a");
                assert_eq!(second_spec_id, "b");
            }
            other => panic!("expected DuplicateRuleName, got {:?}", other),
        }
        // Failed spec left nothing behind.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn equivalent_schedule_for_same_function_is_ambiguous() {
        let cfg = config();
        let mut registry = DeploymentRegistry::new();
        provision(&spec("a", "morning-report", "08:50", "report-generator"), &cfg, &mut registry)
            .unwrap();

        // Same function, same local time, different purpose → different rule
        // name but semantically the same schedule.
        let err = provision(&spec("b", "morning-report-copy", "08:50", "report-generator"), &cfg, &mut registry)
            .unwrap_err();
        match err {
            ProvisionError::AmbiguousGrant {
                function_name,
                rule_name,
                existing_rule,
            } => {
                assert_eq!(function_name, "report-generator");
                assert_eq!(rule_name, "crb-acme-prd-morning-report-copy");
                assert_eq!(existing_rule, "crb-acme-prd-morning-report");
            }
            other => panic!("expected AmbiguousGrant, got {:?}", other),
        }
        // All-or-nothing: the failed spec registered nothing.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn batch_reports_failures_individually() {
        let cfg = config();
        let mut registry = DeploymentRegistry::new();
        let specs = vec![
            spec("good-1", "daily-report", "08:50", "report-generator"),
            spec("bad-time", "metrics", "25:99", "metrics-calculator"),
            spec("good-2", "metrics-dashboard", "09:00", "metrics-calculator"),
        ];

        let outcome = provision_all(specs.iter(), &cfg, &mut registry);
        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.provisioned.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].spec_id, "bad-time");
        assert_eq!(outcome.failures[0].state_reached, TriggerState::Draft);
        assert!(matches!(
            outcome.failures[0].error,
            ProvisionError::InvalidTime { .. }
        ));
    }

    #[test]
    fn rerun_from_empty_registry_is_idempotent() {
        let cfg = config();
        let specs = vec![
            spec("a", "daily-report", "08:50", "report-generator"),
            spec("b", "metrics-dashboard", "09:00", "metrics-calculator"),
        ];

        let mut first_registry = DeploymentRegistry::new();
        let first = provision_all(specs.iter(), &cfg, &mut first_registry);
        let mut second_registry = DeploymentRegistry::new();
        let second = provision_all(specs.iter(), &cfg, &mut second_registry);

        assert_eq!(first.provisioned, second.provisioned);
    }

    #[test]
    fn removal_cascades_binding_and_grant() {
        let cfg = config();
        let mut registry = DeploymentRegistry::new();
        let trigger = provision(&spec("a", "daily-report", "08:50", "report-generator"), &cfg, &mut registry).unwrap();

        let removed = registry.remove(&trigger.binding.rule_name).unwrap();
        assert_eq!(removed.grant.source_arn, removed.binding.rule_arn);
        assert!(registry.is_empty());
        // No grant can reference the removed binding anymore.
        assert!(registry
            .find_equivalent(&removed.binding.target.arn, removed.binding.cron)
            .is_none());
    }

    #[test]
    fn state_display_names() {
        assert_eq!(TriggerState::Draft.to_string(), "draft");
        assert_eq!(TriggerState::Granted.to_string(), "granted");
    }
}
