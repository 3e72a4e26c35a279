use crate::{StatusCode, TENANT_HEADER};

use uc_auth::AuthError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("x-tenant-id is required in the header {location}")]
    MissingTenantHeader { location: ErrorLocation },

    #[error("missing or invalid token: {source} {location}")]
    MissingOrInvalidToken {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("invalid token: {source} {location}")]
    InvalidToken {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("failed to parse token claims: {source} {location}")]
    FailedParsingTokenClaims {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("could not extract tenant id: x-tenant-id not found in context or metadata {location}")]
    TenantNotResolved { location: ErrorLocation },

    #[error("deadline exceeded while {operation} {location}")]
    DeadlineExceeded {
        operation: &'static str,
        location: ErrorLocation,
    },

    #[error("internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// Failure raised by an application handler with its own status
    #[error("{status}: {message} {location}")]
    Handler {
        status: StatusCode,
        message: String,
        location: ErrorLocation,
    },
}

impl RpcError {
    #[track_caller]
    pub fn missing_tenant_header() -> Self {
        Self::MissingTenantHeader {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_or_invalid_token(source: AuthError) -> Self {
        Self::MissingOrInvalidToken {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_token(source: AuthError) -> Self {
        Self::InvalidToken {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn failed_parsing_token_claims(source: AuthError) -> Self {
        Self::FailedParsingTokenClaims {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn tenant_not_resolved() -> Self {
        Self::TenantNotResolved {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn deadline_exceeded(operation: &'static str) -> Self {
        Self::DeadlineExceeded {
            operation,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Application error with an explicit status, for use inside handlers
    #[track_caller]
    pub fn handler<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self::Handler {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingTenantHeader { .. } => StatusCode::InvalidArgument,
            Self::MissingOrInvalidToken { .. } => StatusCode::Unauthenticated,
            Self::InvalidToken { .. } => StatusCode::Unauthenticated,
            Self::FailedParsingTokenClaims { .. } => StatusCode::Internal,
            Self::TenantNotResolved { .. } => StatusCode::InvalidArgument,
            Self::DeadlineExceeded { .. } => StatusCode::DeadlineExceeded,
            Self::Internal { .. } => StatusCode::Internal,
            Self::Handler { status, .. } => *status,
        }
    }

    /// Stable machine-readable kind
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTenantHeader { .. } => "MISSING_TENANT_HEADER",
            Self::MissingOrInvalidToken { .. } => "MISSING_OR_INVALID_TOKEN",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::FailedParsingTokenClaims { .. } => "FAILED_PARSING_TOKEN_CLAIMS",
            Self::TenantNotResolved { .. } => "TENANT_NOT_RESOLVED",
            Self::DeadlineExceeded { .. } => "DEADLINE_EXCEEDED",
            Self::Internal { .. } => "INTERNAL_ERROR",
            Self::Handler { .. } => "HANDLER_ERROR",
        }
    }

    /// Message safe to return to the caller: no source locations, no
    /// verifier internals.
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingTenantHeader { .. } => format!("{TENANT_HEADER} is required in the header"),
            Self::MissingOrInvalidToken { .. } => "missing or invalid token".to_string(),
            Self::InvalidToken { .. } => "invalid token".to_string(),
            Self::FailedParsingTokenClaims { .. } => "token claims could not be parsed".to_string(),
            Self::TenantNotResolved { .. } => {
                format!("could not extract tenant id: {TENANT_HEADER} not found")
            }
            Self::DeadlineExceeded { .. } => "deadline exceeded".to_string(),
            Self::Internal { .. } => "an internal error occurred".to_string(),
            Self::Handler { message, .. } => message.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;
