//! Control-plane surface the handlers depend on.
//!
//! Request and response shapes mirror the OpenSearch Serverless API with
//! enum-valued fields kept as their wire strings.

use oss_resource_core::error::ServiceError;
use serde_json::Value;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityLimitsDetail {
    pub max_indexing_capacity_in_ocu: Option<i32>,
    pub max_search_capacity_in_ocu: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSettingsDetail {
    pub capacity_limits: Option<CapacityLimitsDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAccountSettingsRequest {
    pub capacity_limits: Option<CapacityLimitsDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionDetail {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub collection_type: Option<String>,
    pub description: Option<String>,
    pub arn: Option<String>,
    pub kms_key_arn: Option<String>,
    pub standby_replicas: Option<String>,
    pub collection_endpoint: Option<String>,
    pub dashboard_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCollectionRequest {
    pub name: String,
    pub description: Option<String>,
    pub collection_type: Option<String>,
    pub standby_replicas: Option<String>,
    pub tags: Vec<ResourceTag>,
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchGetCollectionRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchGetErrorDetail {
    pub identifier: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchGetCollectionResponse {
    pub collection_details: Vec<CollectionDetail>,
    pub collection_error_details: Vec<BatchGetErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCollectionRequest {
    pub id: String,
    pub description: Option<String>,
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteCollectionRequest {
    pub id: String,
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCollectionsRequest {
    pub next_token: Option<String>,
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCollectionsResponse {
    pub collection_summaries: Vec<CollectionSummary>,
    pub next_token: Option<String>,
}

/// Shape shared by lifecycle and security policy details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyDetail {
    pub policy_type: Option<String>,
    pub name: Option<String>,
    pub policy_version: Option<String>,
    pub description: Option<String>,
    /// Policy document as the service stores it; key order and whitespace
    /// of the submitted text are not preserved.
    pub policy: Option<Value>,
    pub created_date: Option<i64>,
    pub last_modified_date: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyIdentifier {
    pub policy_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePolicyRequest {
    pub policy_type: String,
    pub name: String,
    pub description: Option<String>,
    pub policy: String,
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePolicyRequest {
    pub policy_type: String,
    pub name: String,
    pub policy_version: String,
    pub description: Option<String>,
    pub policy: Option<String>,
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletePolicyRequest {
    pub policy_type: String,
    pub name: String,
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchGetLifecyclePolicyResponse {
    pub lifecycle_policy_details: Vec<PolicyDetail>,
    pub lifecycle_policy_error_details: Vec<BatchGetErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPoliciesRequest {
    pub policy_type: String,
    pub next_token: Option<String>,
    pub max_results: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySummary {
    pub policy_type: Option<String>,
    pub name: Option<String>,
    pub policy_version: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPoliciesResponse {
    pub policy_summaries: Vec<PolicySummary>,
    pub next_token: Option<String>,
}

/// Synchronous view of the OpenSearch Serverless control plane.
pub trait ServerlessApi {
    fn get_account_settings(&self) -> ServiceResult<AccountSettingsDetail>;
    fn update_account_settings(
        &self,
        request: UpdateAccountSettingsRequest,
    ) -> ServiceResult<AccountSettingsDetail>;

    fn create_collection(&self, request: CreateCollectionRequest)
        -> ServiceResult<CollectionDetail>;
    fn batch_get_collection(
        &self,
        request: BatchGetCollectionRequest,
    ) -> ServiceResult<BatchGetCollectionResponse>;
    fn update_collection(&self, request: UpdateCollectionRequest)
        -> ServiceResult<CollectionDetail>;
    fn delete_collection(&self, request: DeleteCollectionRequest)
        -> ServiceResult<CollectionDetail>;
    fn list_collections(
        &self,
        request: ListCollectionsRequest,
    ) -> ServiceResult<ListCollectionsResponse>;
    fn list_tags_for_resource(&self, resource_arn: String) -> ServiceResult<Vec<ResourceTag>>;

    fn create_lifecycle_policy(&self, request: CreatePolicyRequest) -> ServiceResult<PolicyDetail>;
    fn batch_get_lifecycle_policy(
        &self,
        identifiers: Vec<PolicyIdentifier>,
    ) -> ServiceResult<BatchGetLifecyclePolicyResponse>;
    fn update_lifecycle_policy(&self, request: UpdatePolicyRequest) -> ServiceResult<PolicyDetail>;
    fn delete_lifecycle_policy(&self, request: DeletePolicyRequest) -> ServiceResult<()>;
    fn list_lifecycle_policies(
        &self,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse>;

    fn create_security_policy(&self, request: CreatePolicyRequest) -> ServiceResult<PolicyDetail>;
    fn get_security_policy(&self, identifier: PolicyIdentifier) -> ServiceResult<PolicyDetail>;
    fn update_security_policy(&self, request: UpdatePolicyRequest) -> ServiceResult<PolicyDetail>;
    fn delete_security_policy(&self, request: DeletePolicyRequest) -> ServiceResult<()>;
    fn list_security_policies(
        &self,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse>;
}
