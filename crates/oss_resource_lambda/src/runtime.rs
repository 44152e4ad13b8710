//! Lambda runtime loop shared by the per-resource handler binaries.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use crate::adapters::sdk::SdkServerlessApi;
use crate::config::HandlerConfig;
use crate::handlers::{handle_event, ResourceKind};
use crate::logging::init_tracing;

/// Serves handler requests for one resource type until the runtime stops.
///
/// Configuration is read once per cold start; the SDK client is built per
/// invocation because CloudFormation names the target region in the payload.
pub async fn serve(kind: ResourceKind) -> Result<(), Error> {
    init_tracing();
    let config = HandlerConfig::from_env().map_err(|error| Error::from(error.to_string()))?;
    info!(
        resource_type = kind.type_name(),
        callback_delay_seconds = config.callback_delay_seconds,
        "starting resource handler"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let config = config.clone();
        async move { handle_request(kind, &config, event).await }
    }))
    .await
}

async fn handle_request(
    kind: ResourceKind,
    config: &HandlerConfig,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let api = SdkServerlessApi::connect(config, invocation_region(&event.payload)).await;
    Ok(handle_event(kind, &api, config, event.payload))
}

fn invocation_region(payload: &Value) -> Option<String> {
    payload
        .get("region")
        .and_then(Value::as_str)
        .filter(|region| !region.trim().is_empty())
        .map(str::to_string)
}
