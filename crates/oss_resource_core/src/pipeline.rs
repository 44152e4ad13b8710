//! One service round trip: translate, call, classify, map back.

use tracing::{debug, warn};

use crate::error::{HandlerError, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTarget<'a> {
    pub type_name: &'a str,
    pub operation: &'static str,
}

impl<'a> CallTarget<'a> {
    pub fn new(type_name: &'a str, operation: &'static str) -> Self {
        Self {
            type_name,
            operation,
        }
    }
}

/// Runs a single control-plane call.
///
/// `translate` builds the service request, `call` issues it, `classify` turns
/// a service failure into a handler error and `done` maps the response. A
/// failure is classified exactly once and returned; it is never retried here.
pub fn run_service_call<Req, Resp, Out>(
    target: CallTarget<'_>,
    translate: impl FnOnce() -> Req,
    call: impl FnOnce(Req) -> Result<Resp, ServiceError>,
    classify: impl FnOnce(&str, ServiceError) -> HandlerError,
    done: impl FnOnce(Resp) -> Out,
) -> Result<Out, HandlerError> {
    let request = translate();
    debug!(
        resource_type = target.type_name,
        operation = target.operation,
        "invoking service"
    );

    match call(request) {
        Ok(response) => Ok(done(response)),
        Err(service_error) => {
            warn!(
                resource_type = target.type_name,
                operation = target.operation,
                error_code = %service_error.code,
                error = %service_error.message,
                "service call failed"
            );
            Err(classify(target.type_name, service_error))
        }
    }
}
