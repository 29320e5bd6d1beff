//! `SpecDocument`: enum over all spec kinds.

use serde::{Deserialize, Serialize};

use super::{ScheduleSpec, SpecKind, SpecMetadata};

/// A fully-parsed spec document of any kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SpecDocument {
    Schedule(ScheduleSpec),
}

impl SpecDocument {
    /// Common metadata regardless of kind.
    pub fn metadata(&self) -> &SpecMetadata {
        match self {
            SpecDocument::Schedule(spec) => &spec.metadata,
        }
    }

    pub fn kind(&self) -> SpecKind {
        match self {
            SpecDocument::Schedule(_) => SpecKind::ScheduleSpec,
        }
    }

    /// The contained schedule spec, if this document is one.
    pub fn as_schedule(&self) -> Option<&ScheduleSpec> {
        match self {
            SpecDocument::Schedule(spec) => Some(spec),
        }
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        match self {
            SpecDocument::Schedule(spec) => serde_yaml::to_string(spec),
        }
    }
}
