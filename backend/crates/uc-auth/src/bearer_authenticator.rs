use crate::{AuthError, Authenticator, Result as AuthErrorResult, TokenVerifier};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use http::HeaderMap;

pub const AUTHORIZATION_HEADER: &str = "authorization";

const BEARER_SCHEME: &str = "bearer";

/// Authenticator reading `Authorization: Bearer <token>`
#[derive(Clone)]
pub struct BearerAuthenticator {
    verifier: Arc<dyn TokenVerifier>,
}

impl BearerAuthenticator {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl Authenticator for BearerAuthenticator {
    #[track_caller]
    fn extract_header_token(&self, headers: &HeaderMap) -> AuthErrorResult<String> {
        parse_bearer(headers)
    }

    #[track_caller]
    fn extract_token(&self, metadata: &HeaderMap) -> AuthErrorResult<String> {
        parse_bearer(metadata)
    }

    fn verifier(&self) -> Arc<dyn TokenVerifier> {
        self.verifier.clone()
    }
}

#[track_caller]
fn parse_bearer(headers: &HeaderMap) -> AuthErrorResult<String> {
    let value = headers
        .get(AUTHORIZATION_HEADER)
        .ok_or_else(|| AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::invalid_token("authorization header is not valid ASCII"))?;

    let (scheme, token) = value.trim().split_once(' ').ok_or_else(|| AuthError::InvalidScheme {
        location: ErrorLocation::from(Location::caller()),
    })?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::invalid_token("bearer token is empty"));
    }

    Ok(token.to_string())
}
