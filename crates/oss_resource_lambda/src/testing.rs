//! In-memory `ServerlessApi` used by handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use oss_resource_core::error::ServiceError;
use serde_json::Value;

use crate::adapters::serverless_api::{
    AccountSettingsDetail, BatchGetCollectionRequest, BatchGetCollectionResponse,
    BatchGetErrorDetail, BatchGetLifecyclePolicyResponse, CollectionDetail, CollectionSummary,
    CreateCollectionRequest, CreatePolicyRequest, DeleteCollectionRequest, DeletePolicyRequest,
    ListCollectionsRequest, ListCollectionsResponse, ListPoliciesRequest, ListPoliciesResponse,
    PolicyDetail, PolicyIdentifier, PolicySummary, ResourceTag, ServerlessApi, ServiceResult,
    UpdateAccountSettingsRequest, UpdateCollectionRequest, UpdatePolicyRequest,
};

pub(crate) const ACCOUNT_ID: &str = "123456789012";

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Default)]
struct FakeState {
    account_settings: AccountSettingsDetail,
    collections: Vec<CollectionDetail>,
    tags: HashMap<String, Vec<ResourceTag>>,
    lifecycle_policies: Vec<PolicyDetail>,
    security_policies: Vec<PolicyDetail>,
    created_collections: u32,
}

/// Records every operation it receives and serves responses from memory.
///
/// A failure scripted with [`FakeServerlessApi::fail`] is returned by the
/// next call to that operation and then cleared.
pub(crate) struct FakeServerlessApi {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, ServiceError>>,
    repeated_list_token: Mutex<Option<String>>,
    page_size: usize,
}

impl FakeServerlessApi {
    pub(crate) fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub(crate) fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            repeated_list_token: Mutex::new(None),
            page_size: page_size.max(1),
        }
    }

    pub(crate) fn fail(&self, operation: &'static str, error: ServiceError) {
        self.failures
            .lock()
            .expect("poisoned mutex")
            .insert(operation, error);
    }

    /// Every policy list page from now on carries `token` as its next token,
    /// whatever token the request sent.
    pub(crate) fn repeat_list_token(&self, token: &str) {
        *self.repeated_list_token.lock().expect("poisoned mutex") = Some(token.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub(crate) fn seed_account_settings(&self, detail: AccountSettingsDetail) {
        self.state.lock().expect("poisoned mutex").account_settings = detail;
    }

    pub(crate) fn account_settings(&self) -> AccountSettingsDetail {
        self.state
            .lock()
            .expect("poisoned mutex")
            .account_settings
            .clone()
    }

    pub(crate) fn seed_collection(&self, detail: CollectionDetail, tags: Vec<ResourceTag>) {
        let mut state = self.state.lock().expect("poisoned mutex");
        if let Some(arn) = &detail.arn {
            state.tags.insert(arn.clone(), tags);
        }
        state.collections.push(detail);
    }

    pub(crate) fn collection(&self, id: &str) -> Option<CollectionDetail> {
        self.state
            .lock()
            .expect("poisoned mutex")
            .collections
            .iter()
            .find(|detail| detail.id.as_deref() == Some(id))
            .cloned()
    }

    pub(crate) fn set_collection_status(&self, id: &str, status: &str) {
        let mut state = self.state.lock().expect("poisoned mutex");
        if let Some(detail) = state
            .collections
            .iter_mut()
            .find(|detail| detail.id.as_deref() == Some(id))
        {
            detail.status = Some(status.to_string());
        }
    }

    pub(crate) fn remove_collection(&self, id: &str) {
        self.state
            .lock()
            .expect("poisoned mutex")
            .collections
            .retain(|detail| detail.id.as_deref() != Some(id));
    }

    pub(crate) fn seed_lifecycle_policy(&self, detail: PolicyDetail) {
        self.state
            .lock()
            .expect("poisoned mutex")
            .lifecycle_policies
            .push(detail);
    }

    pub(crate) fn lifecycle_policies(&self) -> Vec<PolicyDetail> {
        self.state
            .lock()
            .expect("poisoned mutex")
            .lifecycle_policies
            .clone()
    }

    pub(crate) fn seed_security_policy(&self, detail: PolicyDetail) {
        self.state
            .lock()
            .expect("poisoned mutex")
            .security_policies
            .push(detail);
    }

    pub(crate) fn security_policies(&self) -> Vec<PolicyDetail> {
        self.state
            .lock()
            .expect("poisoned mutex")
            .security_policies
            .clone()
    }

    fn record(&self, operation: &'static str) -> ServiceResult<()> {
        self.calls.lock().expect("poisoned mutex").push(operation);
        match self
            .failures
            .lock()
            .expect("poisoned mutex")
            .remove(operation)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn page<T: Clone>(
        &self,
        items: &[T],
        next_token: Option<&str>,
        max_results: Option<i32>,
    ) -> (Vec<T>, Option<String>) {
        let start = next_token
            .and_then(|token| token.parse::<usize>().ok())
            .unwrap_or(0);
        let size = max_results
            .and_then(|value| usize::try_from(value).ok())
            .filter(|value| *value > 0)
            .unwrap_or(self.page_size);
        let end = (start + size).min(items.len());
        let page = items.get(start..end).unwrap_or_default().to_vec();
        let next = (end < items.len()).then(|| end.to_string());
        (page, next)
    }

    fn list_policies(
        &self,
        policies: &[PolicyDetail],
        request: ListPoliciesRequest,
    ) -> ListPoliciesResponse {
        let summaries: Vec<PolicySummary> = policies
            .iter()
            .filter(|detail| detail.policy_type.as_deref() == Some(request.policy_type.as_str()))
            .map(summarize)
            .collect();
        let (policy_summaries, next_token) = self.page(
            &summaries,
            request.next_token.as_deref(),
            request.max_results,
        );
        let repeated = self.repeated_list_token.lock().expect("poisoned mutex").clone();
        ListPoliciesResponse {
            policy_summaries,
            next_token: repeated.or(next_token),
        }
    }
}

pub(crate) fn policy_detail(policy_type: &str, name: &str, policy: &str) -> PolicyDetail {
    PolicyDetail {
        policy_type: Some(policy_type.to_string()),
        name: Some(name.to_string()),
        policy_version: Some("v1".to_string()),
        description: None,
        policy: Some(serde_json::from_str(policy).expect("fixture policy should be JSON")),
        created_date: Some(1_700_000_000_000),
        last_modified_date: Some(1_700_000_000_000),
    }
}

pub(crate) fn collection_detail(id: &str, name: &str, status: &str) -> CollectionDetail {
    CollectionDetail {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        status: Some(status.to_string()),
        collection_type: Some("SEARCH".to_string()),
        description: None,
        arn: Some(format!(
            "arn:aws:aoss:us-east-1:{ACCOUNT_ID}:collection/{id}"
        )),
        kms_key_arn: Some("auto".to_string()),
        standby_replicas: Some("ENABLED".to_string()),
        collection_endpoint: Some(format!("https://{id}.us-east-1.aoss.amazonaws.com")),
        dashboard_endpoint: Some(format!(
            "https://{id}.us-east-1.aoss.amazonaws.com/_dashboards"
        )),
    }
}

fn not_found(message: impl Into<String>) -> ServiceError {
    ServiceError::from_code("ResourceNotFoundException", message)
}

fn conflict(message: impl Into<String>) -> ServiceError {
    ServiceError::from_code("ConflictException", message)
}

/// The service stores documents, not text; what comes back is re-encoded.
fn parse_document(text: &str) -> ServiceResult<Value> {
    serde_json::from_str(text).map_err(|error| {
        ServiceError::from_code("ValidationException", format!("Policy json is invalid: {error}"))
    })
}

fn same_policy(detail: &PolicyDetail, policy_type: &str, name: &str) -> bool {
    detail.policy_type.as_deref() == Some(policy_type) && detail.name.as_deref() == Some(name)
}

fn create_policy(policies: &mut Vec<PolicyDetail>, request: CreatePolicyRequest) -> ServiceResult<PolicyDetail> {
    if policies
        .iter()
        .any(|detail| same_policy(detail, &request.policy_type, &request.name))
    {
        return Err(conflict(format!(
            "Policy with name {} and type {} already exists",
            request.name, request.policy_type
        )));
    }

    let document = parse_document(&request.policy)?;
    let detail = PolicyDetail {
        description: request.description,
        policy: Some(document),
        ..policy_detail(&request.policy_type, &request.name, "{}")
    };
    policies.push(detail.clone());
    Ok(detail)
}

fn update_policy(policies: &mut [PolicyDetail], request: UpdatePolicyRequest) -> ServiceResult<PolicyDetail> {
    let detail = policies
        .iter_mut()
        .find(|detail| same_policy(detail, &request.policy_type, &request.name))
        .ok_or_else(|| not_found(format!("Policy {} not found", request.name)))?;

    if detail.policy_version.as_deref() != Some(request.policy_version.as_str()) {
        return Err(ServiceError::from_code(
            "ValidationException",
            "Policy version specified in the request refers to an older version",
        ));
    }

    let document = request.policy.as_deref().map(parse_document).transpose()?;
    detail.description = request.description;
    if document.is_some() {
        detail.policy = document;
    }
    detail.policy_version = Some(format!(
        "v{}",
        detail
            .policy_version
            .as_deref()
            .and_then(|version| version.trim_start_matches('v').parse::<u32>().ok())
            .unwrap_or(0)
            + 1
    ));
    Ok(detail.clone())
}

fn delete_policy(policies: &mut Vec<PolicyDetail>, request: DeletePolicyRequest) -> ServiceResult<()> {
    let before = policies.len();
    policies.retain(|detail| !same_policy(detail, &request.policy_type, &request.name));
    if policies.len() == before {
        return Err(not_found(format!("Policy {} not found", request.name)));
    }
    Ok(())
}

fn summarize(detail: &PolicyDetail) -> PolicySummary {
    PolicySummary {
        policy_type: detail.policy_type.clone(),
        name: detail.name.clone(),
        policy_version: detail.policy_version.clone(),
        description: detail.description.clone(),
    }
}

impl ServerlessApi for FakeServerlessApi {
    fn get_account_settings(&self) -> ServiceResult<AccountSettingsDetail> {
        self.record("GetAccountSettings")?;
        Ok(self.account_settings())
    }

    fn update_account_settings(
        &self,
        request: UpdateAccountSettingsRequest,
    ) -> ServiceResult<AccountSettingsDetail> {
        self.record("UpdateAccountSettings")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        if request.capacity_limits.is_some() {
            state.account_settings.capacity_limits = request.capacity_limits;
        }
        Ok(state.account_settings.clone())
    }

    fn create_collection(&self, request: CreateCollectionRequest) -> ServiceResult<CollectionDetail> {
        self.record("CreateCollection")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        if state
            .collections
            .iter()
            .any(|detail| detail.name.as_deref() == Some(request.name.as_str()))
        {
            return Err(conflict(format!(
                "Collection with name {} already exists",
                request.name
            )));
        }

        state.created_collections += 1;
        let id = format!("coll{:04}", state.created_collections);
        let mut detail = collection_detail(&id, &request.name, "CREATING");
        detail.description = request.description;
        detail.collection_type = request.collection_type.or(detail.collection_type);
        detail.standby_replicas = request.standby_replicas.or(detail.standby_replicas);

        if let Some(arn) = &detail.arn {
            state.tags.insert(arn.clone(), request.tags);
        }
        state.collections.push(detail.clone());
        Ok(CollectionDetail {
            collection_endpoint: None,
            dashboard_endpoint: None,
            ..detail
        })
    }

    fn batch_get_collection(
        &self,
        request: BatchGetCollectionRequest,
    ) -> ServiceResult<BatchGetCollectionResponse> {
        self.record("BatchGetCollection")?;
        let state = self.state.lock().expect("poisoned mutex");
        let mut response = BatchGetCollectionResponse::default();
        for id in request.ids {
            match state
                .collections
                .iter()
                .find(|detail| detail.id.as_deref() == Some(id.as_str()))
            {
                Some(detail) => response.collection_details.push(detail.clone()),
                None => response.collection_error_details.push(BatchGetErrorDetail {
                    identifier: Some(id),
                    error_code: Some("NOT_FOUND".to_string()),
                    error_message: Some("The specified collection could not be found".to_string()),
                }),
            }
        }
        Ok(response)
    }

    fn update_collection(&self, request: UpdateCollectionRequest) -> ServiceResult<CollectionDetail> {
        self.record("UpdateCollection")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        let detail = state
            .collections
            .iter_mut()
            .find(|detail| detail.id.as_deref() == Some(request.id.as_str()))
            .ok_or_else(|| not_found(format!("Collection {} not found", request.id)))?;
        detail.description = request.description;
        Ok(detail.clone())
    }

    fn delete_collection(&self, request: DeleteCollectionRequest) -> ServiceResult<CollectionDetail> {
        self.record("DeleteCollection")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        let detail = state
            .collections
            .iter_mut()
            .find(|detail| detail.id.as_deref() == Some(request.id.as_str()))
            .ok_or_else(|| not_found(format!("Collection {} not found", request.id)))?;
        detail.status = Some("DELETING".to_string());
        Ok(detail.clone())
    }

    fn list_collections(
        &self,
        request: ListCollectionsRequest,
    ) -> ServiceResult<ListCollectionsResponse> {
        self.record("ListCollections")?;
        let state = self.state.lock().expect("poisoned mutex");
        let summaries: Vec<CollectionSummary> = state
            .collections
            .iter()
            .map(|detail| CollectionSummary {
                id: detail.id.clone(),
                name: detail.name.clone(),
                status: detail.status.clone(),
                arn: detail.arn.clone(),
            })
            .collect();
        let (collection_summaries, next_token) = self.page(
            &summaries,
            request.next_token.as_deref(),
            request.max_results,
        );
        Ok(ListCollectionsResponse {
            collection_summaries,
            next_token,
        })
    }

    fn list_tags_for_resource(&self, resource_arn: String) -> ServiceResult<Vec<ResourceTag>> {
        self.record("ListTagsForResource")?;
        let state = self.state.lock().expect("poisoned mutex");
        Ok(state.tags.get(&resource_arn).cloned().unwrap_or_default())
    }

    fn create_lifecycle_policy(&self, request: CreatePolicyRequest) -> ServiceResult<PolicyDetail> {
        self.record("CreateLifecyclePolicy")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        create_policy(&mut state.lifecycle_policies, request)
    }

    fn batch_get_lifecycle_policy(
        &self,
        identifiers: Vec<PolicyIdentifier>,
    ) -> ServiceResult<BatchGetLifecyclePolicyResponse> {
        self.record("BatchGetLifecyclePolicy")?;
        let state = self.state.lock().expect("poisoned mutex");
        let mut response = BatchGetLifecyclePolicyResponse::default();
        for identifier in identifiers {
            match state
                .lifecycle_policies
                .iter()
                .find(|detail| same_policy(detail, &identifier.policy_type, &identifier.name))
            {
                Some(detail) => response.lifecycle_policy_details.push(detail.clone()),
                None => response
                    .lifecycle_policy_error_details
                    .push(BatchGetErrorDetail {
                        identifier: Some(identifier.name),
                        error_code: Some("NOT_FOUND".to_string()),
                        error_message: Some("The specified policy could not be found".to_string()),
                    }),
            }
        }
        Ok(response)
    }

    fn update_lifecycle_policy(&self, request: UpdatePolicyRequest) -> ServiceResult<PolicyDetail> {
        self.record("UpdateLifecyclePolicy")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        update_policy(&mut state.lifecycle_policies, request)
    }

    fn delete_lifecycle_policy(&self, request: DeletePolicyRequest) -> ServiceResult<()> {
        self.record("DeleteLifecyclePolicy")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        delete_policy(&mut state.lifecycle_policies, request)
    }

    fn list_lifecycle_policies(
        &self,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse> {
        self.record("ListLifecyclePolicies")?;
        let state = self.state.lock().expect("poisoned mutex");
        Ok(self.list_policies(&state.lifecycle_policies, request))
    }

    fn create_security_policy(&self, request: CreatePolicyRequest) -> ServiceResult<PolicyDetail> {
        self.record("CreateSecurityPolicy")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        create_policy(&mut state.security_policies, request)
    }

    fn get_security_policy(&self, identifier: PolicyIdentifier) -> ServiceResult<PolicyDetail> {
        self.record("GetSecurityPolicy")?;
        let state = self.state.lock().expect("poisoned mutex");
        state
            .security_policies
            .iter()
            .find(|detail| same_policy(detail, &identifier.policy_type, &identifier.name))
            .cloned()
            .ok_or_else(|| not_found(format!("Policy {} not found", identifier.name)))
    }

    fn update_security_policy(&self, request: UpdatePolicyRequest) -> ServiceResult<PolicyDetail> {
        self.record("UpdateSecurityPolicy")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        update_policy(&mut state.security_policies, request)
    }

    fn delete_security_policy(&self, request: DeletePolicyRequest) -> ServiceResult<()> {
        self.record("DeleteSecurityPolicy")?;
        let mut state = self.state.lock().expect("poisoned mutex");
        delete_policy(&mut state.security_policies, request)
    }

    fn list_security_policies(
        &self,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse> {
        self.record("ListSecurityPolicies")?;
        let state = self.state.lock().expect("poisoned mutex");
        Ok(self.list_policies(&state.security_policies, request))
    }
}
