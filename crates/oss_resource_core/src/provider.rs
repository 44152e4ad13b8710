use tracing::{info, warn};

use crate::contract::{Action, ProgressEvent, ResourceHandlerRequest};
use crate::error::HandlerError;

pub type HandlerResult<M, C> = Result<ProgressEvent<M, C>, HandlerError>;

/// CRUDL handlers for one resource type.
///
/// Each verb receives the request by value; the model is owned by the
/// handler for the duration of the invocation and any model it returns is
/// built from a service response.
pub trait ResourceProvider {
    type Model;
    type Context: Default;

    fn type_name(&self) -> &'static str;

    fn create(
        &self,
        request: ResourceHandlerRequest<Self::Model>,
        context: Self::Context,
    ) -> HandlerResult<Self::Model, Self::Context>;

    fn read(
        &self,
        request: ResourceHandlerRequest<Self::Model>,
        context: Self::Context,
    ) -> HandlerResult<Self::Model, Self::Context>;

    fn update(
        &self,
        request: ResourceHandlerRequest<Self::Model>,
        context: Self::Context,
    ) -> HandlerResult<Self::Model, Self::Context>;

    fn delete(
        &self,
        request: ResourceHandlerRequest<Self::Model>,
        context: Self::Context,
    ) -> HandlerResult<Self::Model, Self::Context>;

    fn list(
        &self,
        request: ResourceHandlerRequest<Self::Model>,
        context: Self::Context,
    ) -> HandlerResult<Self::Model, Self::Context>;
}

/// Runs one handler invocation and folds any error into a FAILED event.
pub fn dispatch<P: ResourceProvider>(
    provider: &P,
    action: Action,
    request: ResourceHandlerRequest<P::Model>,
    context: P::Context,
) -> ProgressEvent<P::Model, P::Context> {
    let type_name = provider.type_name();
    info!(
        resource_type = type_name,
        action = action.as_str(),
        "handler invoked"
    );

    let outcome = match action {
        Action::Create => provider.create(request, context),
        Action::Read => provider.read(request, context),
        Action::Update => provider.update(request, context),
        Action::Delete => provider.delete(request, context),
        Action::List => provider.list(request, context),
    };

    match outcome {
        Ok(event) => {
            info!(
                resource_type = type_name,
                action = action.as_str(),
                status = ?event.status,
                "handler finished"
            );
            event
        }
        Err(error) => {
            warn!(
                resource_type = type_name,
                action = action.as_str(),
                error_code = error.code().as_str(),
                error = %error,
                "handler failed"
            );
            ProgressEvent::failed(&error)
        }
    }
}

/// Desired state for verbs that write; its absence is a malformed request.
pub fn require_desired_state<M>(request: &ResourceHandlerRequest<M>) -> Result<&M, HandlerError> {
    request.desired_state.as_ref().ok_or_else(|| {
        HandlerError::InvalidRequest("desired resource state is required".to_string())
    })
}

/// Fails with `InvalidRequest` when a required property is missing or blank.
pub fn require_field<'a>(value: Option<&'a str>, property: &str) -> Result<&'a str, HandlerError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(HandlerError::InvalidRequest(format!("{property} is required"))),
    }
}

/// Fails with `NotUpdatable` when a create-only property changed between the
/// previous and the desired state. An absent previous state is not a change.
pub fn ensure_unchanged<T: PartialEq>(
    type_name: &str,
    property: &str,
    previous: Option<&T>,
    desired: Option<&T>,
) -> Result<(), HandlerError> {
    match previous {
        Some(previous) if Some(previous) != desired => Err(HandlerError::NotUpdatable {
            type_name: type_name.to_string(),
            property: property.to_string(),
        }),
        _ => Ok(()),
    }
}
