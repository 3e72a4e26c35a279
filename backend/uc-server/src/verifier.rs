use crate::error::Result as ServerErrorResult;

use uc_auth::{OidcConfig, OidcVerifier, StaticKey, StaticKeyVerifier, TokenVerifier};
use uc_config::{AuthConfig, AuthMode};

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::task::JoinHandle;

/// Token verifier selected by the auth config, plus the JWKS refresh task
/// when verifying against an OIDC provider
pub struct VerifierSetup {
    pub verifier: Arc<dyn TokenVerifier>,
    pub refresh_task: Option<JoinHandle<()>>,
}

/// Expects a validated config
pub async fn build_verifier(auth: &AuthConfig) -> ServerErrorResult<VerifierSetup> {
    match auth.mode()? {
        AuthMode::Oidc {
            issuer_url,
            client_id,
        } => {
            let mut config = OidcConfig::new(issuer_url);
            if let Some(client_id) = client_id {
                config = config.with_client_id(client_id);
            }
            config.http_timeout = Duration::from_secs(auth.http_timeout_secs);

            let verifier = Arc::new(OidcVerifier::discover(config).await?);
            let refresh_task =
                verifier.spawn_refresh(Duration::from_secs(auth.jwks_refresh_secs));
            info!(
                "Auth: OIDC issuer {} (JWKS refresh every {}s)",
                verifier.issuer(),
                auth.jwks_refresh_secs
            );

            Ok(VerifierSetup {
                verifier,
                refresh_task: Some(refresh_task),
            })
        }
        AuthMode::StaticSecret { secret } => {
            let key = StaticKey::hmac(secret);
            warn!(
                "Auth: static {} secret - intended for local development only",
                key.algorithm_name()
            );

            Ok(VerifierSetup {
                verifier: Arc::new(StaticKeyVerifier::new(&key)?),
                refresh_task: None,
            })
        }
    }
}
