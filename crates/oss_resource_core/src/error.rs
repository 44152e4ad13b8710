//! Service-side and handler-side error types.
//!
//! `ServiceError` is what a service adapter returns when a control-plane call
//! fails. `HandlerError` is what a handler reports back to CloudFormation;
//! every variant maps to exactly one [`HandlerErrorCode`].

use thiserror::Error;

use crate::contract::HandlerErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    Validation,
    InternalServer,
    ResourceNotFound,
    Conflict,
    ServiceQuotaExceeded,
    Other,
}

impl ServiceErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "ValidationException" => Self::Validation,
            "InternalServerException" => Self::InternalServer,
            "ResourceNotFoundException" => Self::ResourceNotFound,
            "ConflictException" => Self::Conflict,
            "ServiceQuotaExceededException" => Self::ServiceQuotaExceeded,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub code: String,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Builds an error from a service error code, deriving the kind.
    pub fn from_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind: ServiceErrorKind::from_code(&code),
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum HandlerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource of type '{type_name}' with identifier '{identifier}' was not found.")]
    NotFound {
        type_name: String,
        identifier: String,
    },

    #[error("Internal error reported from downstream service for '{type_name}': {source}")]
    InternalFailure {
        type_name: String,
        #[source]
        source: ServiceError,
    },

    #[error("Error occurred during operation on '{type_name}': {source}")]
    GeneralServiceError {
        type_name: String,
        #[source]
        source: ServiceError,
    },

    /// Not-found reported by the service, which names no identifier.
    #[error("Resource of type '{type_name}' was not found: {source}")]
    MissingUpstream {
        type_name: String,
        #[source]
        source: ServiceError,
    },

    #[error("Resource of type '{type_name}' already exists: {source}")]
    AlreadyExists {
        type_name: String,
        #[source]
        source: ServiceError,
    },

    #[error("Resource of type '{type_name}' has a conflict: {source}")]
    ResourceConflict {
        type_name: String,
        #[source]
        source: ServiceError,
    },

    #[error("Limit exceeded for resource of type '{type_name}': {source}")]
    ServiceLimitExceeded {
        type_name: String,
        #[source]
        source: ServiceError,
    },

    #[error("Resource of type '{type_name}' cannot update create-only property '{property}'")]
    NotUpdatable { type_name: String, property: String },

    #[error("Resource of type '{type_name}' with identifier '{identifier}' did not stabilize: {reason}")]
    NotStabilized {
        type_name: String,
        identifier: String,
        reason: String,
    },
}

impl HandlerError {
    pub fn not_found(type_name: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: type_name.to_string(),
            identifier: identifier.into(),
        }
    }

    pub fn code(&self) -> HandlerErrorCode {
        match self {
            Self::InvalidRequest(_) => HandlerErrorCode::InvalidRequest,
            Self::NotFound { .. } | Self::MissingUpstream { .. } => HandlerErrorCode::NotFound,
            Self::InternalFailure { .. } => HandlerErrorCode::InternalFailure,
            Self::GeneralServiceError { .. } => HandlerErrorCode::GeneralServiceError,
            Self::AlreadyExists { .. } => HandlerErrorCode::AlreadyExists,
            Self::ResourceConflict { .. } => HandlerErrorCode::ResourceConflict,
            Self::ServiceLimitExceeded { .. } => HandlerErrorCode::ServiceLimitExceeded,
            Self::NotUpdatable { .. } => HandlerErrorCode::NotUpdatable,
            Self::NotStabilized { .. } => HandlerErrorCode::NotStabilized,
        }
    }
}

/// Uniform mapping from a failed service call to a handler error.
pub fn classify_service_error(type_name: &str, error: ServiceError) -> HandlerError {
    let type_name = type_name.to_string();
    match error.kind {
        ServiceErrorKind::Validation => HandlerError::InvalidRequest(error.message),
        ServiceErrorKind::InternalServer => HandlerError::InternalFailure {
            type_name,
            source: error,
        },
        ServiceErrorKind::ResourceNotFound => HandlerError::MissingUpstream {
            type_name,
            source: error,
        },
        ServiceErrorKind::Conflict => HandlerError::ResourceConflict {
            type_name,
            source: error,
        },
        ServiceErrorKind::ServiceQuotaExceeded => HandlerError::ServiceLimitExceeded {
            type_name,
            source: error,
        },
        ServiceErrorKind::Other => HandlerError::GeneralServiceError {
            type_name,
            source: error,
        },
    }
}

/// Create-time variant: a conflict means the resource is already there.
pub fn classify_create_error(type_name: &str, error: ServiceError) -> HandlerError {
    match error.kind {
        ServiceErrorKind::Conflict => HandlerError::AlreadyExists {
            type_name: type_name.to_string(),
            source: error,
        },
        _ => classify_service_error(type_name, error),
    }
}
