//! `AWS::OpenSearchServerless::AccountSettings` handlers.
//!
//! Account settings always exist; create and update both issue
//! `UpdateAccountSettings`, and delete leaves the service untouched.

use oss_resource_core::contract::{EmptyCallbackContext, ProgressEvent, ResourceHandlerRequest};
use oss_resource_core::error::{classify_service_error, HandlerError};
use oss_resource_core::models::{AccountSettings, CapacityLimits};
use oss_resource_core::pipeline::{run_service_call, CallTarget};
use oss_resource_core::provider::{require_desired_state, HandlerResult, ResourceProvider};

use crate::adapters::serverless_api::ServerlessApi;
use crate::translate::account_settings as translate;

const TYPE_NAME: &str = AccountSettings::TYPE_NAME;

pub struct AccountSettingsProvider<'a> {
    api: &'a dyn ServerlessApi,
}

impl<'a> AccountSettingsProvider<'a> {
    pub fn new(api: &'a dyn ServerlessApi) -> Self {
        Self { api }
    }

    fn read_settings(&self, aws_account_id: &str) -> Result<AccountSettings, HandlerError> {
        run_service_call(
            CallTarget::new(TYPE_NAME, "GetAccountSettings"),
            || (),
            |()| self.api.get_account_settings(),
            classify_service_error,
            |detail| translate::from_detail(detail, aws_account_id),
        )
    }

    fn update_settings(
        &self,
        model: &AccountSettings,
        aws_account_id: &str,
    ) -> Result<AccountSettings, HandlerError> {
        run_service_call(
            CallTarget::new(TYPE_NAME, "UpdateAccountSettings"),
            || translate::to_update_request(model),
            |request| self.api.update_account_settings(request),
            classify_service_error,
            |detail| translate::from_detail(detail, aws_account_id),
        )
    }
}

/// The model must name the invoking account.
fn ensure_owned(request: &ResourceHandlerRequest<AccountSettings>) -> Result<(), HandlerError> {
    let account_id = request
        .desired_state
        .as_ref()
        .and_then(|model| model.account_id.as_deref());

    match account_id {
        Some(account_id) if account_id == request.aws_account_id => Ok(()),
        other => Err(HandlerError::not_found(TYPE_NAME, other.unwrap_or_default())),
    }
}

fn require_capacity_limits(model: &AccountSettings) -> Result<CapacityLimits, HandlerError> {
    model
        .capacity_limits
        .filter(|limits| !limits.is_empty())
        .ok_or_else(|| {
            HandlerError::InvalidRequest(
                "CapacityLimits requires MaxIndexingCapacityInOCU or MaxSearchCapacityInOCU"
                    .to_string(),
            )
        })
}

impl ResourceProvider for AccountSettingsProvider<'_> {
    type Model = AccountSettings;
    type Context = EmptyCallbackContext;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn create(
        &self,
        request: ResourceHandlerRequest<AccountSettings>,
        _context: EmptyCallbackContext,
    ) -> HandlerResult<AccountSettings, EmptyCallbackContext> {
        let model = require_desired_state(&request)?;
        require_capacity_limits(model)?;

        self.update_settings(model, &request.aws_account_id)?;
        self.read_settings(&request.aws_account_id)
            .map(ProgressEvent::success)
    }

    fn read(
        &self,
        request: ResourceHandlerRequest<AccountSettings>,
        _context: EmptyCallbackContext,
    ) -> HandlerResult<AccountSettings, EmptyCallbackContext> {
        ensure_owned(&request)?;
        self.read_settings(&request.aws_account_id)
            .map(ProgressEvent::success)
    }

    fn update(
        &self,
        request: ResourceHandlerRequest<AccountSettings>,
        _context: EmptyCallbackContext,
    ) -> HandlerResult<AccountSettings, EmptyCallbackContext> {
        ensure_owned(&request)?;
        let model = require_desired_state(&request)?;
        require_capacity_limits(model)?;

        self.update_settings(model, &request.aws_account_id)
            .map(ProgressEvent::success)
    }

    fn delete(
        &self,
        request: ResourceHandlerRequest<AccountSettings>,
        _context: EmptyCallbackContext,
    ) -> HandlerResult<AccountSettings, EmptyCallbackContext> {
        ensure_owned(&request)?;
        Ok(ProgressEvent::deleted())
    }

    fn list(
        &self,
        request: ResourceHandlerRequest<AccountSettings>,
        _context: EmptyCallbackContext,
    ) -> HandlerResult<AccountSettings, EmptyCallbackContext> {
        let model = self.read_settings(&request.aws_account_id)?;
        Ok(ProgressEvent::listed(vec![model], None))
    }
}
