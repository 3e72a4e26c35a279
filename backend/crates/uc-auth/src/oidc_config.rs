use std::time::Duration;

use jsonwebtoken::Algorithm;

const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Settings for verifying tokens against an OIDC identity provider
#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Issuer URL, e.g. `https://idp.example.com/realms/main`
    pub issuer_url: String,
    /// Expected audience (client id). `None` skips the audience check.
    pub client_id: Option<String>,
    /// Signing algorithms accepted from the provider
    pub algorithms: Vec<Algorithm>,
    /// Clock skew tolerance for exp/nbf
    pub leeway: Duration,
    /// Timeout for discovery and key set requests
    pub http_timeout: Duration,
    /// Minimum spacing between on-demand key refreshes triggered by unknown kids
    pub min_refresh_interval: Duration,
}

impl OidcConfig {
    pub fn new(issuer_url: impl Into<String>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            client_id: None,
            algorithms: vec![Algorithm::RS256],
            leeway: Duration::from_secs(30),
            http_timeout: Duration::from_secs(10),
            min_refresh_interval: Duration::from_secs(10),
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Issuer without trailing slash, as compared against the `iss` claim
    pub fn issuer(&self) -> &str {
        self.issuer_url.trim_end_matches('/')
    }

    pub fn discovery_url(&self) -> String {
        format!("{}{}", self.issuer(), DISCOVERY_PATH)
    }
}
