use serde::{Deserialize, Serialize};

pub const LIFECYCLE_POLICY_TYPE_NAME: &str = "AWS::OpenSearchServerless::LifecyclePolicy";
pub const SECURITY_POLICY_TYPE_NAME: &str = "AWS::OpenSearchServerless::SecurityPolicy";

pub const RETENTION_POLICY_TYPE: &str = "retention";
pub const ENCRYPTION_POLICY_TYPE: &str = "encryption";
pub const NETWORK_POLICY_TYPE: &str = "network";

/// Model shared by lifecycle and security policies.
///
/// Identified by `Type` + `Name`; both are create-only. `Policy` is the JSON
/// document as the template author wrote it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

impl Policy {
    pub fn identifier(&self) -> String {
        format!(
            "{}|{}",
            self.policy_type.as_deref().unwrap_or_default(),
            self.name.as_deref().unwrap_or_default()
        )
    }
}
