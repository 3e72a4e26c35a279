use crate::{AuthError, Result as AuthErrorResult, StaticKey, TokenVerifier, VerifiedToken};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::Value;

const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Verifier backed by a single locally configured key.
///
/// Used when the deployment signs its own tokens (HS256) or pins a provider
/// public key (RS256) instead of discovering keys over OIDC.
pub struct StaticKeyVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
}

impl StaticKeyVerifier {
    #[track_caller]
    pub fn new(key: &StaticKey) -> AuthErrorResult<Self> {
        match key {
            StaticKey::Hmac { secret } => Ok(Self::with_hs256(secret)),
            StaticKey::RsaPem { public_key_pem } => Self::with_rs256(public_key_pem),
        }
    }

    /// Create verifier with HS256 (symmetric secret)
    pub fn with_hs256(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: base_validation(Algorithm::HS256),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create verifier with RS256 (asymmetric public key)
    #[track_caller]
    pub fn with_rs256(public_key_pem: &str) -> AuthErrorResult<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| AuthError::invalid_token(format!("Invalid RSA public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            validation: base_validation(Algorithm::RS256),
            algorithm: Algorithm::RS256,
        })
    }

    /// Require the `iss` claim to equal `issuer`
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    /// Require the `aud` claim to contain `audience`
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self
    }

    /// Get the algorithm being used (for logging/debugging)
    pub fn algorithm(&self) -> &str {
        match self.algorithm {
            Algorithm::HS256 => "HS256",
            Algorithm::RS256 => "RS256",
            _ => "unknown",
        }
    }

    #[track_caller]
    fn verify_sync(&self, raw_token: &str) -> AuthErrorResult<VerifiedToken> {
        let token_data = decode::<Value>(raw_token, &self.decoding_key, &self.validation)?;
        Ok(VerifiedToken::new(
            token_data.header.alg,
            token_data.header.kid,
            token_data.claims,
        ))
    }
}

#[async_trait]
impl TokenVerifier for StaticKeyVerifier {
    async fn verify(&self, raw_token: &str) -> AuthErrorResult<VerifiedToken> {
        self.verify_sync(raw_token)
    }
}

fn base_validation(algorithm: Algorithm) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.validate_aud = false;
    validation.leeway = DEFAULT_LEEWAY_SECS;
    validation
}
