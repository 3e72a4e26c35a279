use crate::{Result as AuthErrorResult, TokenVerifier};

use std::sync::Arc;

use http::HeaderMap;

/// Bearer token extraction plus access to the verifier that validates it
pub trait Authenticator: Send + Sync {
    /// Read the bearer token from a request's headers
    fn extract_header_token(&self, headers: &HeaderMap) -> AuthErrorResult<String>;

    /// Read the bearer token from transport-level metadata, for calls that
    /// arrive without a typed request (e.g. raw gRPC metadata)
    fn extract_token(&self, metadata: &HeaderMap) -> AuthErrorResult<String>;

    fn verifier(&self) -> Arc<dyn TokenVerifier>;
}
