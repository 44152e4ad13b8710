//! `AWS::OpenSearchServerless::SecurityPolicy` handlers.
//!
//! Encryption and network policies share one resource type. Listing without
//! a `Type` walks every page of both kinds in a single invocation.

use oss_resource_core::models::policy::{
    ENCRYPTION_POLICY_TYPE, NETWORK_POLICY_TYPE, SECURITY_POLICY_TYPE_NAME,
};

use super::policy::{ListScope, PolicyKind, PolicyProvider};
use crate::adapters::serverless_api::{
    CreatePolicyRequest, DeletePolicyRequest, ListPoliciesRequest, ListPoliciesResponse,
    PolicyDetail, PolicyIdentifier, ServerlessApi, ServiceResult, UpdatePolicyRequest,
};

const LISTABLE_TYPES: &[&str] = &[ENCRYPTION_POLICY_TYPE, NETWORK_POLICY_TYPE];

pub type SecurityPolicyProvider<'a> = PolicyProvider<'a, SecurityPolicyKind>;

pub struct SecurityPolicyKind;

impl PolicyKind for SecurityPolicyKind {
    const TYPE_NAME: &'static str = SECURITY_POLICY_TYPE_NAME;

    const CREATE: &'static str = "CreateSecurityPolicy";
    const GET: &'static str = "GetSecurityPolicy";
    const UPDATE: &'static str = "UpdateSecurityPolicy";
    const DELETE: &'static str = "DeleteSecurityPolicy";
    const LIST: &'static str = "ListSecurityPolicies";

    fn create(
        api: &dyn ServerlessApi,
        request: CreatePolicyRequest,
    ) -> ServiceResult<PolicyDetail> {
        api.create_security_policy(request)
    }

    fn get(
        api: &dyn ServerlessApi,
        identifier: PolicyIdentifier,
    ) -> ServiceResult<Option<PolicyDetail>> {
        api.get_security_policy(identifier).map(Some)
    }

    fn update(
        api: &dyn ServerlessApi,
        request: UpdatePolicyRequest,
    ) -> ServiceResult<PolicyDetail> {
        api.update_security_policy(request)
    }

    fn delete(api: &dyn ServerlessApi, request: DeletePolicyRequest) -> ServiceResult<()> {
        api.delete_security_policy(request)
    }

    fn list(
        api: &dyn ServerlessApi,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse> {
        api.list_security_policies(request)
    }

    fn list_scope(requested_type: Option<&str>) -> ListScope<'_> {
        match requested_type {
            Some(policy_type) => ListScope::Page(policy_type),
            None => ListScope::Drain(LISTABLE_TYPES),
        }
    }
}
