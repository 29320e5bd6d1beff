//! The `ScheduleSpec` document: one scheduled trigger.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SpecMetadata;

/// One scheduled trigger: a local firing time, a target function, and the
/// purpose string that feeds the rule-name scheme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSpec {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: SpecMetadata,
    pub schedule: ScheduleBlock,
    pub target: TargetBlock,
    /// Last segment of the derived rule name
    /// (`{prefix}-{client}-{environment}-{purpose}`).
    pub purpose: String,
}

/// Wall-clock firing time in a fixed civil timezone (no DST rules).
///
/// `local_time` stays a raw string here; the resolver owns parsing so that
/// an invalid value surfaces as a provisioning error with the offending
/// text, not as an opaque deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ScheduleBlock {
    /// 24-hour `HH:MM`.
    pub local_time: String,
    /// Offset from UTC: integer hours (`-3`) or text (`"-03:00"`, `"UTC-3"`).
    pub utc_offset: OffsetValue,
}

/// UTC offset as written in the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OffsetValue {
    Hours(i32),
    Text(String),
}

impl fmt::Display for OffsetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetValue::Hours(h) => write!(f, "{}", h),
            OffsetValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The invocable unit this trigger dispatches to, owned externally by the
/// packaging/deployment system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TargetBlock {
    pub function_name: String,
    pub function_arn: String,
    /// Execution role of the function, supplied by the IAM-provisioning
    /// system. Passed through opaquely; the planner never inspects it.
    #[serde(default)]
    pub role_arn: Option<String>,
}

impl TargetBlock {
    /// The `{identifier, arn}` pair downstream components bind against.
    pub fn function_ref(&self) -> FunctionRef {
        FunctionRef {
            identifier: self.function_name.clone(),
            arn: self.function_arn.clone(),
        }
    }
}

/// Reference to an invocable unit: opaque identifier plus ARN.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionRef {
    pub identifier: String,
    pub arn: String,
}
