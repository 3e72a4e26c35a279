use crate::{
    AuthError, JwksCache, OidcConfig, Result as AuthErrorResult, TokenVerifier, VerifiedToken,
};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{DecodingKey, Header, Validation, decode, decode_header};
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Subset of the OpenID provider metadata document we rely on
#[derive(Debug, Deserialize)]
struct ProviderMetadata {
    issuer: String,
    jwks_uri: String,
}

/// Verifier that validates tokens against an OIDC provider's published keys
pub struct OidcVerifier {
    config: OidcConfig,
    issuer: String,
    jwks_uri: String,
    http: reqwest::Client,
    cache: JwksCache,
}

impl OidcVerifier {
    /// Fetch the provider metadata and initial key set
    pub async fn discover(config: OidcConfig) -> AuthErrorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AuthError::key_fetch(format!("Failed to build HTTP client: {}", e)))?;

        let metadata: ProviderMetadata = fetch_json(&http, &config.discovery_url()).await?;
        let issuer = metadata.issuer.trim_end_matches('/');
        if issuer != config.issuer() {
            return Err(AuthError::key_fetch(format!(
                "Issuer mismatch: expected {}, provider reported {}",
                config.issuer(),
                metadata.issuer
            )));
        }

        let keys: JwkSet = fetch_json(&http, &metadata.jwks_uri).await?;
        info!(
            "OIDC provider {} discovered: {} signing keys",
            metadata.issuer,
            keys.keys.len()
        );

        Ok(Self {
            issuer: metadata.issuer,
            jwks_uri: metadata.jwks_uri,
            config,
            http,
            cache: JwksCache::new(keys),
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Re-fetch the key set and swap it in. Keeps the previous set on failure.
    pub async fn refresh(&self) -> AuthErrorResult<usize> {
        let keys: JwkSet = fetch_json(&self.http, &self.jwks_uri).await?;
        if keys.keys.is_empty() {
            return Err(AuthError::key_fetch("Provider returned an empty key set"));
        }

        let count = keys.keys.len();
        self.cache.replace(keys).await;
        debug!("JWKS refreshed from {}: {} keys", self.jwks_uri, count);

        Ok(count)
    }

    /// Refresh keys on a fixed interval until the verifier is dropped
    pub fn spawn_refresh(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let verifier = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; keys were just fetched by discover()
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(verifier) = verifier.upgrade() else {
                    debug!("OIDC verifier dropped, stopping key refresh");
                    break;
                };
                if let Err(e) = verifier.refresh().await {
                    warn!("JWKS refresh failed, keeping previous keys: {}", e);
                }
            }
        })
    }

    async fn decoding_key(&self, header: &Header) -> AuthErrorResult<DecodingKey> {
        let kid = header.kid.as_deref();

        let keys = self.cache.snapshot().await;
        if let Some(jwk) = select_key(&keys, kid) {
            return Ok(DecodingKey::from_jwk(jwk)?);
        }

        // Unknown kid usually means the provider rotated keys
        if kid.is_some() && self.cache.try_begin_refresh(self.config.min_refresh_interval) {
            debug!("Unknown kid {:?}, refreshing key set", kid);
            self.refresh().await?;

            let keys = self.cache.snapshot().await;
            if let Some(jwk) = select_key(&keys, kid) {
                return Ok(DecodingKey::from_jwk(jwk)?);
            }
        }

        Err(AuthError::UnknownKey {
            kid: kid.unwrap_or("<none>").to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn validation(&self, header: &Header) -> Validation {
        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = self.config.leeway.as_secs();
        match self.config.client_id {
            Some(ref client_id) => validation.set_audience(&[client_id]),
            None => validation.validate_aud = false,
        }
        validation
    }
}

#[async_trait]
impl TokenVerifier for OidcVerifier {
    async fn verify(&self, raw_token: &str) -> AuthErrorResult<VerifiedToken> {
        let header = decode_header(raw_token)?;
        if !self.config.algorithms.contains(&header.alg) {
            return Err(AuthError::invalid_token(format!(
                "Unexpected signing algorithm {:?}",
                header.alg
            )));
        }

        let key = self.decoding_key(&header).await?;
        let token_data = decode::<Value>(raw_token, &key, &self.validation(&header))?;

        Ok(VerifiedToken::new(
            token_data.header.alg,
            token_data.header.kid,
            token_data.claims,
        ))
    }
}

fn select_key<'a>(keys: &'a JwkSet, kid: Option<&str>) -> Option<&'a Jwk> {
    match kid {
        Some(kid) => keys.find(kid),
        None if keys.keys.len() == 1 => keys.keys.first(),
        None => None,
    }
}

async fn fetch_json<T: DeserializeOwned>(http: &reqwest::Client, url: &str) -> AuthErrorResult<T> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| AuthError::key_fetch(format!("GET {} failed: {}", url, e)))?
        .error_for_status()
        .map_err(|e| AuthError::key_fetch(format!("GET {} failed: {}", url, e)))?;

    response
        .json::<T>()
        .await
        .map_err(|e| AuthError::key_fetch(format!("Invalid JSON from {}: {}", url, e)))
}
