//! Spec envelope for lightweight first-pass deserialization.

use serde::{Deserialize, Serialize};

use super::{ScheduleSpec, SpecDocument, SpecKind, SpecMetadata};

/// Lightweight first-pass deserializer that reads only the header fields.
///
/// Used during two-pass loading: first extract `kind` to determine the
/// concrete type, then deserialize the full document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecEnvelope {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: SpecMetadata,
    /// Remaining fields captured as raw YAML for second-pass deserialization.
    #[serde(flatten)]
    pub rest: serde_yaml::Value,
}

impl SpecEnvelope {
    /// Parse the `kind` field into a typed [`SpecKind`].
    pub fn spec_kind(&self) -> std::result::Result<SpecKind, String> {
        self.kind.parse()
    }

    /// Two-pass: reconstruct the full YAML and deserialize into the concrete type.
    pub fn parse_full(&self) -> std::result::Result<SpecDocument, String> {
        match self.spec_kind()? {
            SpecKind::ScheduleSpec => {
                let yaml = serde_yaml::to_string(self).map_err(|e| e.to_string())?;
                let spec: ScheduleSpec = serde_yaml::from_str(&yaml).map_err(|e| e.to_string())?;
                Ok(SpecDocument::Schedule(spec))
            }
        }
    }
}
