//! `ServerlessApi` backed by `aws-sdk-opensearchserverless`.
//!
//! Handlers are synchronous; every call blocks the current worker thread on
//! the async SDK future, so the Lambda runtime must be multi-threaded.

use std::future::Future;

use aws_sdk_opensearchserverless::config::retry::RetryConfig;
use aws_sdk_opensearchserverless::config::Region;
use aws_sdk_opensearchserverless::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_opensearchserverless::types as sdk;
use aws_sdk_opensearchserverless::Client;
use aws_smithy_types::{Document, Number};
use oss_resource_core::error::{ServiceError, ServiceErrorKind};
use serde_json::Value;

use crate::adapters::serverless_api::{
    AccountSettingsDetail, BatchGetCollectionRequest, BatchGetCollectionResponse,
    BatchGetErrorDetail, BatchGetLifecyclePolicyResponse, CapacityLimitsDetail, CollectionDetail,
    CollectionSummary, CreateCollectionRequest, CreatePolicyRequest, DeleteCollectionRequest,
    DeletePolicyRequest, ListCollectionsRequest, ListCollectionsResponse, ListPoliciesRequest,
    ListPoliciesResponse, PolicyDetail, PolicyIdentifier, PolicySummary, ResourceTag,
    ServerlessApi, ServiceResult, UpdateAccountSettingsRequest, UpdateCollectionRequest,
    UpdatePolicyRequest,
};
use crate::config::HandlerConfig;

#[derive(Debug, Clone)]
pub struct SdkServerlessApi {
    client: Client,
}

impl SdkServerlessApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the default credential chain, pinned to the
    /// invocation's region when CloudFormation supplies one.
    pub async fn connect(config: &HandlerConfig, region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_opensearchserverless::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        if let Some(max_attempts) = config.sdk_max_attempts {
            builder = builder.retry_config(RetryConfig::standard().with_max_attempts(max_attempts));
        }

        Self::new(Client::from_conf(builder.build()))
    }
}

impl ServerlessApi for SdkServerlessApi {
    fn get_account_settings(&self) -> ServiceResult<AccountSettingsDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .get_account_settings()
                .send()
                .await
                .map(|output| account_settings_detail(output.account_settings_detail()))
                .map_err(service_error)
        })
    }

    fn update_account_settings(
        &self,
        request: UpdateAccountSettingsRequest,
    ) -> ServiceResult<AccountSettingsDetail> {
        let client = self.client.clone();
        let capacity_limits = request.capacity_limits.map(|limits| {
            sdk::CapacityLimits::builder()
                .set_max_indexing_capacity_in_ocu(limits.max_indexing_capacity_in_ocu)
                .set_max_search_capacity_in_ocu(limits.max_search_capacity_in_ocu)
                .build()
        });

        block_on(async move {
            client
                .update_account_settings()
                .set_capacity_limits(capacity_limits)
                .send()
                .await
                .map(|output| account_settings_detail(output.account_settings_detail()))
                .map_err(service_error)
        })
    }

    fn create_collection(&self, request: CreateCollectionRequest) -> ServiceResult<CollectionDetail> {
        let client = self.client.clone();
        let tags = request
            .tags
            .into_iter()
            .map(|tag| {
                sdk::Tag::builder()
                    .key(tag.key)
                    .value(tag.value)
                    .build()
                    .map_err(build_error)
            })
            .collect::<Result<Vec<_>, _>>()?;

        block_on(async move {
            client
                .create_collection()
                .name(request.name)
                .set_description(request.description)
                .set_type(request.collection_type.as_deref().map(sdk::CollectionType::from))
                .set_standby_replicas(
                    request
                        .standby_replicas
                        .as_deref()
                        .map(sdk::StandbyReplicas::from),
                )
                .set_tags((!tags.is_empty()).then_some(tags))
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|output| {
                    output
                        .create_collection_detail()
                        .map(|detail| CollectionDetail {
                            id: owned(detail.id()),
                            name: owned(detail.name()),
                            status: detail.status().map(|value| value.as_str().to_string()),
                            collection_type: detail.r#type().map(|value| value.as_str().to_string()),
                            description: owned(detail.description()),
                            arn: owned(detail.arn()),
                            kms_key_arn: owned(detail.kms_key_arn()),
                            standby_replicas: detail
                                .standby_replicas()
                                .map(|value| value.as_str().to_string()),
                            ..CollectionDetail::default()
                        })
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn batch_get_collection(
        &self,
        request: BatchGetCollectionRequest,
    ) -> ServiceResult<BatchGetCollectionResponse> {
        let client = self.client.clone();
        block_on(async move {
            client
                .batch_get_collection()
                .set_ids(Some(request.ids))
                .send()
                .await
                .map(|output| BatchGetCollectionResponse {
                    collection_details: output
                        .collection_details()
                        .iter()
                        .map(collection_detail)
                        .collect(),
                    collection_error_details: output
                        .collection_error_details()
                        .iter()
                        .map(|detail| BatchGetErrorDetail {
                            identifier: owned(detail.id()),
                            error_code: owned(detail.error_code()),
                            error_message: owned(detail.error_message()),
                        })
                        .collect(),
                })
                .map_err(service_error)
        })
    }

    fn update_collection(&self, request: UpdateCollectionRequest) -> ServiceResult<CollectionDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .update_collection()
                .id(request.id)
                .set_description(request.description)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|output| {
                    output
                        .update_collection_detail()
                        .map(|detail| CollectionDetail {
                            id: owned(detail.id()),
                            name: owned(detail.name()),
                            status: detail.status().map(|value| value.as_str().to_string()),
                            collection_type: detail.r#type().map(|value| value.as_str().to_string()),
                            description: owned(detail.description()),
                            arn: owned(detail.arn()),
                            ..CollectionDetail::default()
                        })
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn delete_collection(&self, request: DeleteCollectionRequest) -> ServiceResult<CollectionDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .delete_collection()
                .id(request.id)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|output| {
                    output
                        .delete_collection_detail()
                        .map(|detail| CollectionDetail {
                            id: owned(detail.id()),
                            name: owned(detail.name()),
                            status: detail.status().map(|value| value.as_str().to_string()),
                            ..CollectionDetail::default()
                        })
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn list_collections(
        &self,
        request: ListCollectionsRequest,
    ) -> ServiceResult<ListCollectionsResponse> {
        let client = self.client.clone();
        block_on(async move {
            client
                .list_collections()
                .set_next_token(request.next_token)
                .set_max_results(request.max_results)
                .send()
                .await
                .map(|output| ListCollectionsResponse {
                    collection_summaries: output
                        .collection_summaries()
                        .iter()
                        .map(|summary| CollectionSummary {
                            id: owned(summary.id()),
                            name: owned(summary.name()),
                            status: summary.status().map(|value| value.as_str().to_string()),
                            arn: owned(summary.arn()),
                        })
                        .collect(),
                    next_token: owned(output.next_token()),
                })
                .map_err(service_error)
        })
    }

    fn list_tags_for_resource(&self, resource_arn: String) -> ServiceResult<Vec<ResourceTag>> {
        let client = self.client.clone();
        block_on(async move {
            client
                .list_tags_for_resource()
                .resource_arn(resource_arn)
                .send()
                .await
                .map(|output| {
                    output
                        .tags()
                        .iter()
                        .map(|tag| ResourceTag {
                            key: tag.key().to_string(),
                            value: tag.value().to_string(),
                        })
                        .collect()
                })
                .map_err(service_error)
        })
    }

    fn create_lifecycle_policy(&self, request: CreatePolicyRequest) -> ServiceResult<PolicyDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .create_lifecycle_policy()
                .r#type(sdk::LifecyclePolicyType::from(request.policy_type.as_str()))
                .name(request.name)
                .set_description(request.description)
                .policy(request.policy)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|output| {
                    output
                        .lifecycle_policy_detail()
                        .map(lifecycle_policy_detail)
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn batch_get_lifecycle_policy(
        &self,
        identifiers: Vec<PolicyIdentifier>,
    ) -> ServiceResult<BatchGetLifecyclePolicyResponse> {
        let client = self.client.clone();
        let identifiers = identifiers
            .into_iter()
            .map(|identifier| {
                sdk::LifecyclePolicyIdentifier::builder()
                    .r#type(sdk::LifecyclePolicyType::from(identifier.policy_type.as_str()))
                    .name(identifier.name)
                    .build()
                    .map_err(build_error)
            })
            .collect::<Result<Vec<_>, _>>()?;

        block_on(async move {
            client
                .batch_get_lifecycle_policy()
                .set_identifiers(Some(identifiers))
                .send()
                .await
                .map(|output| BatchGetLifecyclePolicyResponse {
                    lifecycle_policy_details: output
                        .lifecycle_policy_details()
                        .iter()
                        .map(lifecycle_policy_detail)
                        .collect(),
                    lifecycle_policy_error_details: output
                        .lifecycle_policy_error_details()
                        .iter()
                        .map(|detail| BatchGetErrorDetail {
                            identifier: owned(detail.name()),
                            error_code: owned(detail.error_code()),
                            error_message: owned(detail.error_message()),
                        })
                        .collect(),
                })
                .map_err(service_error)
        })
    }

    fn update_lifecycle_policy(&self, request: UpdatePolicyRequest) -> ServiceResult<PolicyDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .update_lifecycle_policy()
                .r#type(sdk::LifecyclePolicyType::from(request.policy_type.as_str()))
                .name(request.name)
                .policy_version(request.policy_version)
                .set_description(request.description)
                .set_policy(request.policy)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|output| {
                    output
                        .lifecycle_policy_detail()
                        .map(lifecycle_policy_detail)
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn delete_lifecycle_policy(&self, request: DeletePolicyRequest) -> ServiceResult<()> {
        let client = self.client.clone();
        block_on(async move {
            client
                .delete_lifecycle_policy()
                .r#type(sdk::LifecyclePolicyType::from(request.policy_type.as_str()))
                .name(request.name)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|_| ())
                .map_err(service_error)
        })
    }

    fn list_lifecycle_policies(
        &self,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse> {
        let client = self.client.clone();
        block_on(async move {
            client
                .list_lifecycle_policies()
                .r#type(sdk::LifecyclePolicyType::from(request.policy_type.as_str()))
                .set_next_token(request.next_token)
                .set_max_results(request.max_results)
                .send()
                .await
                .map(|output| ListPoliciesResponse {
                    policy_summaries: output
                        .lifecycle_policy_summaries()
                        .iter()
                        .map(|summary| PolicySummary {
                            policy_type: summary.r#type().map(|value| value.as_str().to_string()),
                            name: owned(summary.name()),
                            policy_version: owned(summary.policy_version()),
                            description: owned(summary.description()),
                        })
                        .collect(),
                    next_token: owned(output.next_token()),
                })
                .map_err(service_error)
        })
    }

    fn create_security_policy(&self, request: CreatePolicyRequest) -> ServiceResult<PolicyDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .create_security_policy()
                .r#type(sdk::SecurityPolicyType::from(request.policy_type.as_str()))
                .name(request.name)
                .set_description(request.description)
                .policy(request.policy)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|output| {
                    output
                        .security_policy_detail()
                        .map(security_policy_detail)
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn get_security_policy(&self, identifier: PolicyIdentifier) -> ServiceResult<PolicyDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .get_security_policy()
                .r#type(sdk::SecurityPolicyType::from(identifier.policy_type.as_str()))
                .name(identifier.name)
                .send()
                .await
                .map(|output| {
                    output
                        .security_policy_detail()
                        .map(security_policy_detail)
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn update_security_policy(&self, request: UpdatePolicyRequest) -> ServiceResult<PolicyDetail> {
        let client = self.client.clone();
        block_on(async move {
            client
                .update_security_policy()
                .r#type(sdk::SecurityPolicyType::from(request.policy_type.as_str()))
                .name(request.name)
                .policy_version(request.policy_version)
                .set_description(request.description)
                .set_policy(request.policy)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|output| {
                    output
                        .security_policy_detail()
                        .map(security_policy_detail)
                        .unwrap_or_default()
                })
                .map_err(service_error)
        })
    }

    fn delete_security_policy(&self, request: DeletePolicyRequest) -> ServiceResult<()> {
        let client = self.client.clone();
        block_on(async move {
            client
                .delete_security_policy()
                .r#type(sdk::SecurityPolicyType::from(request.policy_type.as_str()))
                .name(request.name)
                .set_client_token(request.client_token)
                .send()
                .await
                .map(|_| ())
                .map_err(service_error)
        })
    }

    fn list_security_policies(
        &self,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse> {
        let client = self.client.clone();
        block_on(async move {
            client
                .list_security_policies()
                .r#type(sdk::SecurityPolicyType::from(request.policy_type.as_str()))
                .set_next_token(request.next_token)
                .set_max_results(request.max_results)
                .send()
                .await
                .map(|output| ListPoliciesResponse {
                    policy_summaries: output
                        .security_policy_summaries()
                        .iter()
                        .map(|summary| PolicySummary {
                            policy_type: summary.r#type().map(|value| value.as_str().to_string()),
                            name: owned(summary.name()),
                            policy_version: owned(summary.policy_version()),
                            description: owned(summary.description()),
                        })
                        .collect(),
                    next_token: owned(output.next_token()),
                })
                .map_err(service_error)
        })
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn service_error<E, R>(error: SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = error.code().unwrap_or("Unknown").to_string();
    let message = error
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&error).to_string());
    ServiceError::from_code(code, message)
}

fn build_error(error: impl std::fmt::Display) -> ServiceError {
    ServiceError::new(
        ServiceErrorKind::Validation,
        "InvalidParameter",
        format!("failed to build service request: {error}"),
    )
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn account_settings_detail(detail: Option<&sdk::AccountSettingsDetail>) -> AccountSettingsDetail {
    AccountSettingsDetail {
        capacity_limits: detail
            .and_then(|detail| detail.capacity_limits())
            .map(|limits| CapacityLimitsDetail {
                max_indexing_capacity_in_ocu: limits.max_indexing_capacity_in_ocu(),
                max_search_capacity_in_ocu: limits.max_search_capacity_in_ocu(),
            }),
    }
}

fn collection_detail(detail: &sdk::CollectionDetail) -> CollectionDetail {
    CollectionDetail {
        id: owned(detail.id()),
        name: owned(detail.name()),
        status: detail.status().map(|value| value.as_str().to_string()),
        collection_type: detail.r#type().map(|value| value.as_str().to_string()),
        description: owned(detail.description()),
        arn: owned(detail.arn()),
        kms_key_arn: owned(detail.kms_key_arn()),
        standby_replicas: detail
            .standby_replicas()
            .map(|value| value.as_str().to_string()),
        collection_endpoint: owned(detail.collection_endpoint()),
        dashboard_endpoint: owned(detail.dashboard_endpoint()),
    }
}

fn lifecycle_policy_detail(detail: &sdk::LifecyclePolicyDetail) -> PolicyDetail {
    PolicyDetail {
        policy_type: detail.r#type().map(|value| value.as_str().to_string()),
        name: owned(detail.name()),
        policy_version: owned(detail.policy_version()),
        description: owned(detail.description()),
        policy: detail.policy().map(document_to_json),
        created_date: detail.created_date(),
        last_modified_date: detail.last_modified_date(),
    }
}

fn security_policy_detail(detail: &sdk::SecurityPolicyDetail) -> PolicyDetail {
    PolicyDetail {
        policy_type: detail.r#type().map(|value| value.as_str().to_string()),
        name: owned(detail.name()),
        policy_version: owned(detail.policy_version()),
        description: owned(detail.description()),
        policy: detail.policy().map(document_to_json),
        created_date: detail.created_date(),
        last_modified_date: detail.last_modified_date(),
    }
}

/// Policy documents come back as smithy documents; CloudFormation wants JSON.
fn document_to_json(document: &Document) -> Value {
    match document {
        Document::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), document_to_json(value)))
                .collect(),
        ),
        Document::Array(items) => Value::Array(items.iter().map(document_to_json).collect()),
        Document::Number(Number::PosInt(value)) => Value::from(*value),
        Document::Number(Number::NegInt(value)) => Value::from(*value),
        Document::Number(Number::Float(value)) => serde_json::Number::from_f64(*value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Document::String(value) => Value::String(value.clone()),
        Document::Bool(value) => Value::Bool(*value),
        Document::Null => Value::Null,
    }
}
