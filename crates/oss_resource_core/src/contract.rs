use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HandlerError;

pub const DEFAULT_CALLBACK_DELAY_SECONDS: u32 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::List => "LIST",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    InProgress,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandlerErrorCode {
    InvalidRequest,
    NotFound,
    InternalFailure,
    #[serde(rename = "GeneralServiceException")]
    GeneralServiceError,
    AlreadyExists,
    ResourceConflict,
    ServiceLimitExceeded,
    NotUpdatable,
    NotStabilized,
}

impl HandlerErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "InvalidRequest",
            Self::NotFound => "NotFound",
            Self::InternalFailure => "InternalFailure",
            Self::GeneralServiceError => "GeneralServiceException",
            Self::AlreadyExists => "AlreadyExists",
            Self::ResourceConflict => "ResourceConflict",
            Self::ServiceLimitExceeded => "ServiceLimitExceeded",
            Self::NotUpdatable => "NotUpdatable",
            Self::NotStabilized => "NotStabilized",
        }
    }
}

/// Raw handler request as delivered by CloudFormation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerEvent<M> {
    pub aws_account_id: String,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub action: Action,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub request_data: RequestData<M>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub callback_context: Option<Value>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData<M> {
    #[serde(default)]
    pub logical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Option<M>,
    #[serde(default)]
    pub previous_resource_properties: Option<M>,
    #[serde(default)]
    pub stack_tags: Option<BTreeMap<String, String>>,
}

impl<M> Default for RequestData<M> {
    fn default() -> Self {
        Self {
            logical_resource_id: None,
            resource_properties: None,
            previous_resource_properties: None,
            stack_tags: None,
        }
    }
}

impl<M> HandlerEvent<M> {
    /// Splits the raw event into the action, the decoded request, and the
    /// still-encoded callback context.
    pub fn into_parts(self) -> (Action, ResourceHandlerRequest<M>, Option<Value>) {
        let request = ResourceHandlerRequest {
            aws_account_id: self.aws_account_id,
            region: self.region,
            client_request_token: self.bearer_token,
            desired_state: self.request_data.resource_properties,
            previous_state: self.request_data.previous_resource_properties,
            logical_resource_identifier: self.request_data.logical_resource_id,
            stack_id: self.stack_id,
            next_token: self.next_token,
        };
        (self.action, request, self.callback_context)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceHandlerRequest<M> {
    pub aws_account_id: String,
    pub region: Option<String>,
    pub client_request_token: Option<String>,
    pub desired_state: Option<M>,
    pub previous_state: Option<M>,
    pub logical_resource_identifier: Option<String>,
    pub stack_id: Option<String>,
    pub next_token: Option<String>,
}

impl<M> ResourceHandlerRequest<M> {
    pub fn new(aws_account_id: impl Into<String>, desired_state: Option<M>) -> Self {
        Self {
            aws_account_id: aws_account_id.into(),
            region: None,
            client_request_token: None,
            desired_state,
            previous_state: None,
            logical_resource_identifier: None,
            stack_id: None,
            next_token: None,
        }
    }
}

/// Callback context for resources that finish within a single tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmptyCallbackContext {}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M, C> {
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<C>,
    #[serde(skip_serializing_if = "is_zero")]
    pub callback_delay_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<M>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<M, C> ProgressEvent<M, C> {
    fn empty(status: OperationStatus) -> Self {
        Self {
            status,
            error_code: None,
            message: None,
            callback_context: None,
            callback_delay_seconds: 0,
            resource_model: None,
            resource_models: None,
            next_token: None,
        }
    }

    pub fn success(model: M) -> Self {
        Self {
            resource_model: Some(model),
            ..Self::empty(OperationStatus::Success)
        }
    }

    /// Terminal success for a delete; CloudFormation expects no model back.
    pub fn deleted() -> Self {
        Self::empty(OperationStatus::Success)
    }

    pub fn listed(models: Vec<M>, next_token: Option<String>) -> Self {
        Self {
            resource_models: Some(models),
            next_token,
            ..Self::empty(OperationStatus::Success)
        }
    }

    pub fn in_progress(model: Option<M>, context: C, delay_seconds: u32) -> Self {
        Self {
            resource_model: model,
            callback_context: Some(context),
            callback_delay_seconds: delay_seconds,
            ..Self::empty(OperationStatus::InProgress)
        }
    }

    pub fn failed(error: &HandlerError) -> Self {
        Self {
            error_code: Some(error.code()),
            message: Some(error.to_string()),
            ..Self::empty(OperationStatus::Failed)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
