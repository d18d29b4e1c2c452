//! Typed view of a schema-validated constraints document

use serde::Deserialize;

/// The only supported value of the top-level `version` field
pub const SUPPORTED_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintsDocument {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependency_constraints: Vec<ConstraintRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintRecord {
    pub group: String,
    pub name: String,
    pub suggested_version: String,
    #[serde(default)]
    pub rejected_versions: Vec<String>,
    pub because: BecauseRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BecauseRecord {
    #[serde(default)]
    pub advisory_identifiers: Vec<String>,
    /// Informational only; never folded into the reason
    #[serde(default)]
    pub more_information_urls: Vec<String>,
    pub reason: String,
}

impl ConstraintsDocument {
    pub fn is_supported_version(&self) -> bool {
        self.version.as_deref() == Some(SUPPORTED_VERSION)
    }
}
