//! `AWS::OpenSearchServerless::Collection` handlers.
//!
//! Collections are provisioned asynchronously. Create and delete issue the
//! mutating call on the first tick and then poll `BatchGetCollection` on
//! every callback until the collection is `ACTIVE` or gone.

use oss_resource_core::contract::{ProgressEvent, ResourceHandlerRequest};
use oss_resource_core::error::{classify_create_error, classify_service_error, HandlerError};
use oss_resource_core::models::{Collection, CollectionCallbackContext, StabilizationStage};
use oss_resource_core::pipeline::{run_service_call, CallTarget};
use oss_resource_core::provider::{
    ensure_unchanged, require_desired_state, require_field, HandlerResult, ResourceProvider,
};
use tracing::info;

use crate::adapters::serverless_api::{CollectionDetail, ServerlessApi};
use crate::config::HandlerConfig;
use crate::translate::collection as translate;

const TYPE_NAME: &str = Collection::TYPE_NAME;

const STATUS_ACTIVE: &str = "ACTIVE";
const STATUS_FAILED: &str = "FAILED";

type CollectionResult = HandlerResult<Collection, CollectionCallbackContext>;

pub struct CollectionProvider<'a> {
    api: &'a dyn ServerlessApi,
    callback_delay_seconds: u32,
    list_page_size: Option<i32>,
}

impl<'a> CollectionProvider<'a> {
    pub fn new(api: &'a dyn ServerlessApi, config: &HandlerConfig) -> Self {
        Self {
            api,
            callback_delay_seconds: config.callback_delay_seconds,
            list_page_size: config.list_page_size,
        }
    }

    /// `None` when the service no longer knows the id.
    fn fetch_detail(&self, id: &str) -> Result<Option<CollectionDetail>, HandlerError> {
        run_service_call(
            CallTarget::new(TYPE_NAME, "BatchGetCollection"),
            || translate::to_batch_get_request(id),
            |batch| self.api.batch_get_collection(batch),
            classify_service_error,
            |response| response.collection_details.into_iter().next(),
        )
    }

    fn model_from_detail(&self, detail: CollectionDetail) -> Result<Collection, HandlerError> {
        let tags = match detail.arn.clone() {
            Some(arn) => Some(run_service_call(
                CallTarget::new(TYPE_NAME, "ListTagsForResource"),
                || arn,
                |arn| self.api.list_tags_for_resource(arn),
                classify_service_error,
                |tags| tags,
            )?),
            None => None,
        };
        Ok(translate::from_detail(detail, tags))
    }

    fn read_model(&self, id: &str) -> Result<Collection, HandlerError> {
        let detail = self
            .fetch_detail(id)?
            .ok_or_else(|| HandlerError::not_found(TYPE_NAME, id))?;
        self.model_from_detail(detail)
    }

    fn keep_waiting(
        &self,
        model: Option<Collection>,
        context: &CollectionCallbackContext,
    ) -> CollectionResult {
        let next = context.next_attempt();
        info!(
            resource_type = TYPE_NAME,
            collection_id = next.collection_id.as_deref().unwrap_or_default(),
            attempts = next.attempts,
            "collection not stabilized yet"
        );
        Ok(ProgressEvent::in_progress(
            model,
            next,
            self.callback_delay_seconds,
        ))
    }

    fn start_create(&self, request: &ResourceHandlerRequest<Collection>) -> CollectionResult {
        let model = require_desired_state(request)?;
        let name = require_field(model.name.as_deref(), "Name")?;

        let detail = run_service_call(
            CallTarget::new(TYPE_NAME, "CreateCollection"),
            || translate::to_create_request(model, request.client_request_token.as_deref()),
            |create| self.api.create_collection(create),
            classify_create_error,
            |detail| detail,
        )?;
        let id = detail.id.ok_or_else(|| HandlerError::NotStabilized {
            type_name: TYPE_NAME.to_string(),
            identifier: name.to_string(),
            reason: "CreateCollection returned no collection id".to_string(),
        })?;

        let pending = Collection {
            id: Some(id.clone()),
            arn: detail.arn,
            ..model.clone()
        };
        Ok(ProgressEvent::in_progress(
            Some(pending),
            CollectionCallbackContext::awaiting(StabilizationStage::AwaitingActive, id),
            self.callback_delay_seconds,
        ))
    }

    fn await_active(
        &self,
        request: &ResourceHandlerRequest<Collection>,
        context: &CollectionCallbackContext,
        id: &str,
    ) -> CollectionResult {
        let detail = self
            .fetch_detail(id)?
            .ok_or_else(|| not_stabilized(id, "collection disappeared while being created"))?;

        let status = detail.status.clone();
        match status.as_deref() {
            Some(STATUS_ACTIVE) => self.model_from_detail(detail).map(ProgressEvent::success),
            Some(STATUS_FAILED) => Err(not_stabilized(id, "collection creation failed")),
            _ => {
                let pending = request.desired_state.clone().map(|model| Collection {
                    id: Some(id.to_string()),
                    ..model
                });
                self.keep_waiting(pending, context)
            }
        }
    }

    fn start_delete(&self, request: &ResourceHandlerRequest<Collection>) -> CollectionResult {
        let id = identify(request)?;

        run_service_call(
            CallTarget::new(TYPE_NAME, "DeleteCollection"),
            || translate::to_delete_request(id, request.client_request_token.as_deref()),
            |delete| self.api.delete_collection(delete),
            classify_service_error,
            |_| (),
        )?;

        Ok(ProgressEvent::in_progress(
            None,
            CollectionCallbackContext::awaiting(StabilizationStage::AwaitingDeletion, id),
            self.callback_delay_seconds,
        ))
    }

    fn await_deletion(&self, context: &CollectionCallbackContext, id: &str) -> CollectionResult {
        match self.fetch_detail(id)? {
            None => Ok(ProgressEvent::deleted()),
            Some(detail) if detail.status.as_deref() == Some(STATUS_FAILED) => {
                Err(not_stabilized(id, "collection deletion failed"))
            }
            Some(_) => self.keep_waiting(None, context),
        }
    }
}

fn not_stabilized(id: &str, reason: &str) -> HandlerError {
    HandlerError::NotStabilized {
        type_name: TYPE_NAME.to_string(),
        identifier: id.to_string(),
        reason: reason.to_string(),
    }
}

fn identify(request: &ResourceHandlerRequest<Collection>) -> Result<&str, HandlerError> {
    let id = request
        .desired_state
        .as_ref()
        .and_then(|model| model.id.as_deref());
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        other => Err(HandlerError::not_found(TYPE_NAME, other.unwrap_or_default())),
    }
}

/// The id being stabilized, when the context belongs to `stage`.
fn pending_id(context: &CollectionCallbackContext, stage: StabilizationStage) -> Option<&str> {
    match context.stage {
        Some(current) if current == stage => context.collection_id.as_deref(),
        _ => None,
    }
}

impl ResourceProvider for CollectionProvider<'_> {
    type Model = Collection;
    type Context = CollectionCallbackContext;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn create(
        &self,
        request: ResourceHandlerRequest<Collection>,
        context: CollectionCallbackContext,
    ) -> CollectionResult {
        match pending_id(&context, StabilizationStage::AwaitingActive) {
            Some(id) => self.await_active(&request, &context, id),
            None => self.start_create(&request),
        }
    }

    fn read(
        &self,
        request: ResourceHandlerRequest<Collection>,
        _context: CollectionCallbackContext,
    ) -> CollectionResult {
        let id = identify(&request)?;
        self.read_model(id).map(ProgressEvent::success)
    }

    fn update(
        &self,
        request: ResourceHandlerRequest<Collection>,
        _context: CollectionCallbackContext,
    ) -> CollectionResult {
        let id = identify(&request)?;
        let model = require_desired_state(&request)?;

        let previous = request.previous_state.as_ref();
        ensure_unchanged(
            TYPE_NAME,
            "Name",
            previous.and_then(|previous| previous.name.as_ref()),
            model.name.as_ref(),
        )?;
        ensure_unchanged(
            TYPE_NAME,
            "Type",
            previous.and_then(|previous| previous.collection_type.as_ref()),
            model.collection_type.as_ref(),
        )?;
        ensure_unchanged(
            TYPE_NAME,
            "StandbyReplicas",
            previous.and_then(|previous| previous.standby_replicas.as_ref()),
            model.standby_replicas.as_ref(),
        )?;
        ensure_unchanged(
            TYPE_NAME,
            "Tags",
            previous.and_then(|previous| previous.tags.as_ref()),
            model.tags.as_ref(),
        )?;

        run_service_call(
            CallTarget::new(TYPE_NAME, "UpdateCollection"),
            || translate::to_update_request(id, model, request.client_request_token.as_deref()),
            |update| self.api.update_collection(update),
            classify_service_error,
            |_| (),
        )?;

        self.read_model(id).map(ProgressEvent::success)
    }

    fn delete(
        &self,
        request: ResourceHandlerRequest<Collection>,
        context: CollectionCallbackContext,
    ) -> CollectionResult {
        match pending_id(&context, StabilizationStage::AwaitingDeletion) {
            Some(id) => self.await_deletion(&context, id),
            None => self.start_delete(&request),
        }
    }

    fn list(
        &self,
        request: ResourceHandlerRequest<Collection>,
        _context: CollectionCallbackContext,
    ) -> CollectionResult {
        run_service_call(
            CallTarget::new(TYPE_NAME, "ListCollections"),
            || translate::to_list_request(request.next_token.clone(), self.list_page_size),
            |list| self.api.list_collections(list),
            classify_service_error,
            |response| {
                let models = response
                    .collection_summaries
                    .into_iter()
                    .map(translate::from_summary)
                    .collect();
                ProgressEvent::listed(models, response.next_token)
            },
        )
    }
}
