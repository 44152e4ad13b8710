use serde::{Deserialize, Serialize};

/// Account-scoped singleton; the identity is the owning account id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_limits: Option<CapacityLimits>,
}

impl AccountSettings {
    pub const TYPE_NAME: &'static str = "AWS::OpenSearchServerless::AccountSettings";
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityLimits {
    #[serde(
        rename = "MaxIndexingCapacityInOCU",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_indexing_capacity_in_ocu: Option<i32>,
    #[serde(
        rename = "MaxSearchCapacityInOCU",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_search_capacity_in_ocu: Option<i32>,
}

impl CapacityLimits {
    pub fn is_empty(&self) -> bool {
        self.max_indexing_capacity_in_ocu.is_none() && self.max_search_capacity_in_ocu.is_none()
    }
}
