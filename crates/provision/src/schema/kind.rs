//! Spec kind enum for two-pass deserialization dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported spec kinds for two-pass deserialization dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecKind {
    ScheduleSpec,
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecKind::ScheduleSpec => write!(f, "ScheduleSpec"),
        }
    }
}

impl FromStr for SpecKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ScheduleSpec" => Ok(SpecKind::ScheduleSpec),
            other => Err(format!("unknown spec kind: '{}'", other)),
        }
    }
}
