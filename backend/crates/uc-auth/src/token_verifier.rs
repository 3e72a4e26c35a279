use crate::Result as AuthErrorResult;

use async_trait::async_trait;
use jsonwebtoken::Algorithm;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Cryptographic verification of a raw bearer token.
///
/// Implementations check signature, issuer, audience and expiry. A successful
/// verification does not decode the payload into a claims type; that is a
/// separate step so callers can tell the two failures apart.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, raw_token: &str) -> AuthErrorResult<VerifiedToken>;
}

/// A token whose signature and registered claims have been checked
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    algorithm: Algorithm,
    key_id: Option<String>,
    payload: Value,
}

impl VerifiedToken {
    pub fn new(algorithm: Algorithm, key_id: Option<String>, payload: Value) -> Self {
        Self {
            algorithm,
            key_id,
            payload,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Decode the verified payload into a claims type
    #[track_caller]
    pub fn claims<T: DeserializeOwned>(&self) -> AuthErrorResult<T> {
        Ok(T::deserialize(&self.payload)?)
    }
}
