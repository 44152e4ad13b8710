//! `AWS::OpenSearchServerless::LifecyclePolicy` handlers.

use oss_resource_core::models::policy::{LIFECYCLE_POLICY_TYPE_NAME, RETENTION_POLICY_TYPE};

use super::policy::{ListScope, PolicyKind, PolicyProvider};
use crate::adapters::serverless_api::{
    CreatePolicyRequest, DeletePolicyRequest, ListPoliciesRequest, ListPoliciesResponse,
    PolicyDetail, PolicyIdentifier, ServerlessApi, ServiceResult, UpdatePolicyRequest,
};

pub type LifecyclePolicyProvider<'a> = PolicyProvider<'a, LifecyclePolicyKind>;

pub struct LifecyclePolicyKind;

impl PolicyKind for LifecyclePolicyKind {
    const TYPE_NAME: &'static str = LIFECYCLE_POLICY_TYPE_NAME;

    const CREATE: &'static str = "CreateLifecyclePolicy";
    const GET: &'static str = "BatchGetLifecyclePolicy";
    const UPDATE: &'static str = "UpdateLifecyclePolicy";
    const DELETE: &'static str = "DeleteLifecyclePolicy";
    const LIST: &'static str = "ListLifecyclePolicies";

    fn create(
        api: &dyn ServerlessApi,
        request: CreatePolicyRequest,
    ) -> ServiceResult<PolicyDetail> {
        api.create_lifecycle_policy(request)
    }

    /// Unknown identifiers come back as batch error details, not as a failure.
    fn get(
        api: &dyn ServerlessApi,
        identifier: PolicyIdentifier,
    ) -> ServiceResult<Option<PolicyDetail>> {
        api.batch_get_lifecycle_policy(vec![identifier])
            .map(|response| response.lifecycle_policy_details.into_iter().next())
    }

    fn update(
        api: &dyn ServerlessApi,
        request: UpdatePolicyRequest,
    ) -> ServiceResult<PolicyDetail> {
        api.update_lifecycle_policy(request)
    }

    fn delete(api: &dyn ServerlessApi, request: DeletePolicyRequest) -> ServiceResult<()> {
        api.delete_lifecycle_policy(request)
    }

    fn list(
        api: &dyn ServerlessApi,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse> {
        api.list_lifecycle_policies(request)
    }

    /// `retention` unless the request names another type.
    fn list_scope(requested_type: Option<&str>) -> ListScope<'_> {
        ListScope::Page(requested_type.unwrap_or(RETENTION_POLICY_TYPE))
    }
}
