//! Lambda-facing handler entry points, one provider per resource type.

pub mod account_settings;
pub mod collection;
pub mod lifecycle_policy;
pub mod policy;
pub mod security_policy;

use oss_resource_core::contract::{Action, HandlerEvent, ProgressEvent, ResourceHandlerRequest};
use oss_resource_core::error::HandlerError;
use oss_resource_core::models::policy::{LIFECYCLE_POLICY_TYPE_NAME, SECURITY_POLICY_TYPE_NAME};
use oss_resource_core::models::{AccountSettings, Collection};
use oss_resource_core::provider::{dispatch, ResourceProvider};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::adapters::serverless_api::ServerlessApi;
use crate::config::HandlerConfig;

use self::account_settings::AccountSettingsProvider;
use self::collection::CollectionProvider;
use self::lifecycle_policy::LifecyclePolicyProvider;
use self::security_policy::SecurityPolicyProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    AccountSettings,
    Collection,
    LifecyclePolicy,
    SecurityPolicy,
}

impl ResourceKind {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::AccountSettings => AccountSettings::TYPE_NAME,
            Self::Collection => Collection::TYPE_NAME,
            Self::LifecyclePolicy => LIFECYCLE_POLICY_TYPE_NAME,
            Self::SecurityPolicy => SECURITY_POLICY_TYPE_NAME,
        }
    }
}

/// Handles one raw CloudFormation handler request and returns the encoded
/// progress event. Never fails; every problem is reported as a FAILED event.
pub fn handle_event(
    kind: ResourceKind,
    api: &dyn ServerlessApi,
    config: &HandlerConfig,
    event: Value,
) -> Value {
    match kind {
        ResourceKind::AccountSettings => {
            handle_provider_event(&AccountSettingsProvider::new(api), event)
        }
        ResourceKind::Collection => {
            handle_provider_event(&CollectionProvider::new(api, config), event)
        }
        ResourceKind::LifecyclePolicy => {
            handle_provider_event(&LifecyclePolicyProvider::new(api, config), event)
        }
        ResourceKind::SecurityPolicy => {
            handle_provider_event(&SecurityPolicyProvider::new(api, config), event)
        }
    }
}

pub fn handle_provider_event<P>(provider: &P, event: Value) -> Value
where
    P: ResourceProvider,
    P::Model: DeserializeOwned + Serialize + Default,
    P::Context: DeserializeOwned + Serialize,
{
    let progress = match decode_event(provider, event) {
        Ok((action, request, context)) => dispatch(provider, action, request, context),
        Err(error) => {
            warn!(
                resource_type = provider.type_name(),
                error = %error,
                "rejected handler request"
            );
            ProgressEvent::failed(&error)
        }
    };
    encode_progress(&progress)
}

type DecodedEvent<P> = (
    Action,
    ResourceHandlerRequest<<P as ResourceProvider>::Model>,
    <P as ResourceProvider>::Context,
);

fn decode_event<P>(provider: &P, event: Value) -> Result<DecodedEvent<P>, HandlerError>
where
    P: ResourceProvider,
    P::Model: DeserializeOwned + Default,
    P::Context: DeserializeOwned,
{
    let event: HandlerEvent<P::Model> = serde_json::from_value(event)
        .map_err(|error| HandlerError::InvalidRequest(format!("Malformed handler request: {error}")))?;

    if let Some(resource_type) = event.resource_type.as_deref() {
        if resource_type != provider.type_name() {
            return Err(HandlerError::InvalidRequest(format!(
                "handler for '{}' cannot serve resource type '{resource_type}'",
                provider.type_name()
            )));
        }
    }

    let (action, request, context) = event.into_parts();
    let context = match context {
        None | Some(Value::Null) => P::Context::default(),
        Some(raw) => serde_json::from_value(raw).map_err(|error| {
            HandlerError::InvalidRequest(format!("Malformed callback context: {error}"))
        })?,
    };

    Ok((action, request, context))
}

fn encode_progress<M: Serialize, C: Serialize>(progress: &ProgressEvent<M, C>) -> Value {
    serde_json::to_value(progress).unwrap_or_else(|error| {
        json!({
            "status": "FAILED",
            "errorCode": "InternalFailure",
            "message": format!("Failed to encode progress event: {error}"),
        })
    })
}
