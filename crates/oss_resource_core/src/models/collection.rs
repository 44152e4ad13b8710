use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Collection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standby_replicas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<CollectionTag>>,
}

impl Collection {
    pub const TYPE_NAME: &'static str = "AWS::OpenSearchServerless::Collection";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CollectionTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StabilizationStage {
    AwaitingActive,
    AwaitingDeletion,
}

/// State carried between ticks while a collection is being created or
/// deleted. The default value means the mutating call has not been issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCallbackContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<StabilizationStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub attempts: u32,
}

impl CollectionCallbackContext {
    pub fn awaiting(stage: StabilizationStage, collection_id: impl Into<String>) -> Self {
        Self {
            stage: Some(stage),
            collection_id: Some(collection_id.into()),
            attempts: 0,
        }
    }

    pub fn next_attempt(&self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            ..self.clone()
        }
    }
}
