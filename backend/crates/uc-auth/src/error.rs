use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("No signing key matches kid '{kid}' {location}")]
    UnknownKey {
        kid: String,
        location: ErrorLocation,
    },

    #[error("Identity provider request failed: {message} {location}")]
    KeyFetch {
        message: String,
        location: ErrorLocation,
    },

    #[error("Claims decode failed: {source} {location}")]
    ClaimsDecode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable machine-readable code, safe to expose to callers
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::UnknownKey { .. } => "UNKNOWN_SIGNING_KEY",
            Self::KeyFetch { .. } => "KEY_FETCH_FAILED",
            Self::ClaimsDecode { .. } => "CLAIMS_DECODE_FAILED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
        }
    }

    #[track_caller]
    pub(crate) fn invalid_token<S: Into<String>>(message: S) -> Self {
        Self::InvalidToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn key_fetch<S: Into<String>>(message: S) -> Self {
        Self::KeyFetch {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    #[track_caller]
    fn from(source: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match source.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            },
            _ => Self::JwtDecode {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<serde_json::Error> for AuthError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::ClaimsDecode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
