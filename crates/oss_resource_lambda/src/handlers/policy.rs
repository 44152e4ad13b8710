//! Handlers shared by the lifecycle and security policy resource types.
//!
//! Both types have the same model and the same create/read/update/delete
//! flow. A [`PolicyKind`] supplies the control-plane calls of one type and
//! how it lists.

use std::marker::PhantomData;

use oss_resource_core::contract::{EmptyCallbackContext, ProgressEvent, ResourceHandlerRequest};
use oss_resource_core::error::{classify_create_error, classify_service_error, HandlerError};
use oss_resource_core::models::Policy;
use oss_resource_core::pipeline::{run_service_call, CallTarget};
use oss_resource_core::provider::{
    ensure_unchanged, require_desired_state, require_field, HandlerResult, ResourceProvider,
};
use tracing::{debug, warn};

use crate::adapters::serverless_api::{
    CreatePolicyRequest, DeletePolicyRequest, ListPoliciesRequest, ListPoliciesResponse,
    PolicyDetail, PolicyIdentifier, ServerlessApi, ServiceResult, UpdatePolicyRequest,
};
use crate::config::HandlerConfig;
use crate::translate::policy as translate;

type PolicyResult = HandlerResult<Policy, EmptyCallbackContext>;

/// Which policy types a list request walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope<'a> {
    /// One page of one type; the request's `nextToken` passes through.
    Page(&'a str),
    /// Every page of each type in order, returned without a token.
    Drain(&'static [&'static str]),
}

/// Control-plane operations of one policy resource type.
pub trait PolicyKind {
    const TYPE_NAME: &'static str;

    const CREATE: &'static str;
    const GET: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;
    const LIST: &'static str;

    fn create(api: &dyn ServerlessApi, request: CreatePolicyRequest)
        -> ServiceResult<PolicyDetail>;

    /// `Ok(None)` when the service reports no such policy without failing.
    fn get(
        api: &dyn ServerlessApi,
        identifier: PolicyIdentifier,
    ) -> ServiceResult<Option<PolicyDetail>>;

    fn update(api: &dyn ServerlessApi, request: UpdatePolicyRequest)
        -> ServiceResult<PolicyDetail>;

    fn delete(api: &dyn ServerlessApi, request: DeletePolicyRequest) -> ServiceResult<()>;

    fn list(
        api: &dyn ServerlessApi,
        request: ListPoliciesRequest,
    ) -> ServiceResult<ListPoliciesResponse>;

    fn list_scope(requested_type: Option<&str>) -> ListScope<'_>;
}

pub struct PolicyProvider<'a, K> {
    api: &'a dyn ServerlessApi,
    list_page_size: Option<i32>,
    kind: PhantomData<K>,
}

impl<'a, K: PolicyKind> PolicyProvider<'a, K> {
    pub fn new(api: &'a dyn ServerlessApi, config: &HandlerConfig) -> Self {
        Self {
            api,
            list_page_size: config.list_page_size,
            kind: PhantomData,
        }
    }

    fn fetch_detail(&self, model: &Policy) -> Result<PolicyDetail, HandlerError> {
        run_service_call(
            CallTarget::new(K::TYPE_NAME, K::GET),
            || translate::to_identifier(model),
            |identifier| K::get(self.api, identifier),
            classify_service_error,
            |detail| detail,
        )?
        .ok_or_else(|| HandlerError::not_found(K::TYPE_NAME, model.identifier()))
    }

    fn list_page(
        &self,
        policy_type: &str,
        next_token: Option<String>,
    ) -> Result<ListPoliciesResponse, HandlerError> {
        run_service_call(
            CallTarget::new(K::TYPE_NAME, K::LIST),
            || translate::to_list_request(policy_type, next_token, self.list_page_size),
            |list| K::list(self.api, list),
            classify_service_error,
            |response| response,
        )
    }

    fn list_all(&self, policy_types: &[&str]) -> Result<Vec<Policy>, HandlerError> {
        let mut models = Vec::new();
        for &policy_type in policy_types {
            let mut next_token: Option<String> = None;
            loop {
                let page = self.list_page(policy_type, next_token.clone())?;
                debug!(
                    resource_type = K::TYPE_NAME,
                    policy_type,
                    page_len = page.policy_summaries.len(),
                    "listed policy page"
                );
                models.extend(page.policy_summaries.into_iter().map(translate::from_summary));
                match page.next_token {
                    Some(token) if next_token.as_deref() == Some(token.as_str()) => {
                        warn!(
                            resource_type = K::TYPE_NAME,
                            policy_type,
                            next_token = %token,
                            "list token did not advance; stopping"
                        );
                        break;
                    }
                    Some(token) => next_token = Some(token),
                    None => break,
                }
            }
        }
        Ok(models)
    }
}

/// Read, update and delete need both halves of the `Type|Name` identity.
fn identify<'r>(
    type_name: &str,
    request: &'r ResourceHandlerRequest<Policy>,
) -> Result<&'r Policy, HandlerError> {
    let model = request.desired_state.as_ref();
    match model {
        Some(model)
            if require_field(model.name.as_deref(), "Name").is_ok()
                && require_field(model.policy_type.as_deref(), "Type").is_ok() =>
        {
            Ok(model)
        }
        _ => Err(HandlerError::not_found(
            type_name,
            model.map(Policy::identifier).unwrap_or_default(),
        )),
    }
}

impl<K: PolicyKind> ResourceProvider for PolicyProvider<'_, K> {
    type Model = Policy;
    type Context = EmptyCallbackContext;

    fn type_name(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn create(
        &self,
        request: ResourceHandlerRequest<Policy>,
        _context: EmptyCallbackContext,
    ) -> PolicyResult {
        let model = require_desired_state(&request)?;
        require_field(model.name.as_deref(), "Name")?;
        require_field(model.policy_type.as_deref(), "Type")?;
        require_field(model.policy.as_deref(), "Policy")?;

        run_service_call(
            CallTarget::new(K::TYPE_NAME, K::CREATE),
            || translate::to_create_request(model, request.client_request_token.as_deref()),
            |create| K::create(self.api, create),
            classify_create_error,
            |detail| translate::from_detail(detail, Some(model)),
        )
        .map(ProgressEvent::success)
    }

    fn read(
        &self,
        request: ResourceHandlerRequest<Policy>,
        _context: EmptyCallbackContext,
    ) -> PolicyResult {
        let model = identify(K::TYPE_NAME, &request)?;
        let detail = self.fetch_detail(model)?;
        Ok(ProgressEvent::success(translate::from_detail(
            detail,
            Some(model),
        )))
    }

    fn update(
        &self,
        request: ResourceHandlerRequest<Policy>,
        _context: EmptyCallbackContext,
    ) -> PolicyResult {
        let model = identify(K::TYPE_NAME, &request)?;
        let previous = request.previous_state.as_ref();
        ensure_unchanged(
            K::TYPE_NAME,
            "Name",
            previous.and_then(|previous| previous.name.as_ref()),
            model.name.as_ref(),
        )?;
        ensure_unchanged(
            K::TYPE_NAME,
            "Type",
            previous.and_then(|previous| previous.policy_type.as_ref()),
            model.policy_type.as_ref(),
        )?;
        require_field(model.policy.as_deref(), "Policy")?;

        // An empty version is rejected by the service as stale.
        let policy_version = self.fetch_detail(model)?.policy_version.unwrap_or_default();

        run_service_call(
            CallTarget::new(K::TYPE_NAME, K::UPDATE),
            || {
                translate::to_update_request(
                    model,
                    policy_version,
                    request.client_request_token.as_deref(),
                )
            },
            |update| K::update(self.api, update),
            classify_service_error,
            |detail| translate::from_detail(detail, Some(model)),
        )
        .map(ProgressEvent::success)
    }

    fn delete(
        &self,
        request: ResourceHandlerRequest<Policy>,
        _context: EmptyCallbackContext,
    ) -> PolicyResult {
        let model = identify(K::TYPE_NAME, &request)?;

        run_service_call(
            CallTarget::new(K::TYPE_NAME, K::DELETE),
            || translate::to_delete_request(model, request.client_request_token.as_deref()),
            |delete| K::delete(self.api, delete),
            classify_service_error,
            |()| ProgressEvent::deleted(),
        )
    }

    fn list(
        &self,
        request: ResourceHandlerRequest<Policy>,
        _context: EmptyCallbackContext,
    ) -> PolicyResult {
        let requested_type = request
            .desired_state
            .as_ref()
            .and_then(|model| model.policy_type.as_deref());

        match K::list_scope(requested_type) {
            ListScope::Page(policy_type) => {
                let page = self.list_page(policy_type, request.next_token.clone())?;
                let models = page
                    .policy_summaries
                    .into_iter()
                    .map(translate::from_summary)
                    .collect();
                Ok(ProgressEvent::listed(models, page.next_token))
            }
            ListScope::Drain(policy_types) => {
                Ok(ProgressEvent::listed(self.list_all(policy_types)?, None))
            }
        }
    }
}
