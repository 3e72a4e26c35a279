use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_JWKS_REFRESH_SECS,
    MIN_JWKS_REFRESH_SECS, MIN_JWT_SECRET_LENGTH,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// OIDC issuer, e.g. `https://id.example.com/realms/acme`
    pub issuer_url: Option<String>,
    /// Expected audience; audience is not checked when unset
    pub client_id: Option<String>,
    /// Interval of the background JWKS refresh
    pub jwks_refresh_secs: u64,
    pub http_timeout_secs: u64,
    /// Shared HS256 secret for local development instead of an issuer
    pub jwt_secret: Option<String>,
    /// Fully-qualified procedures that skip token verification
    pub exempt_routes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: None,
            client_id: None,
            jwks_refresh_secs: DEFAULT_JWKS_REFRESH_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            jwt_secret: None,
            exempt_routes: Vec::new(),
        }
    }
}

/// How tokens are verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode<'a> {
    Oidc {
        issuer_url: &'a str,
        client_id: Option<&'a str>,
    },
    StaticSecret {
        secret: &'a str,
    },
}

impl AuthConfig {
    pub fn mode(&self) -> ConfigErrorResult<AuthMode<'_>> {
        match (&self.issuer_url, &self.jwt_secret) {
            (Some(issuer_url), None) => Ok(AuthMode::Oidc {
                issuer_url,
                client_id: self.client_id.as_deref(),
            }),
            (None, Some(secret)) => Ok(AuthMode::StaticSecret { secret }),
            (Some(_), Some(_)) => Err(ConfigError::auth(
                "auth.issuer_url and auth.jwt_secret are mutually exclusive",
            )),
            (None, None) => Err(ConfigError::auth(
                "either auth.issuer_url or auth.jwt_secret must be set",
            )),
        }
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.mode()? {
            AuthMode::Oidc { issuer_url, .. } => {
                if !(issuer_url.starts_with("http://") || issuer_url.starts_with("https://")) {
                    return Err(ConfigError::auth(format!(
                        "auth.issuer_url must be an http(s) URL, got '{}'",
                        issuer_url
                    )));
                }
                if self.jwks_refresh_secs < MIN_JWKS_REFRESH_SECS {
                    return Err(ConfigError::auth(format!(
                        "auth.jwks_refresh_secs must be >= {}, got {}",
                        MIN_JWKS_REFRESH_SECS, self.jwks_refresh_secs
                    )));
                }
                if self.http_timeout_secs == 0 {
                    return Err(ConfigError::auth("auth.http_timeout_secs must be > 0"));
                }
            }
            AuthMode::StaticSecret { secret } => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} characters",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
            }
        }

        if let Some(route) = self.exempt_routes.iter().find(|r| !is_procedure(r)) {
            return Err(ConfigError::auth(format!(
                "auth.exempt_routes entries must look like '/package.Service/Method', got '{}'",
                route
            )));
        }

        Ok(())
    }
}

fn is_procedure(route: &str) -> bool {
    let Some(rest) = route.strip_prefix('/') else {
        return false;
    };
    match rest.split_once('/') {
        Some((service, method)) => {
            !service.is_empty() && !method.is_empty() && !method.contains('/')
        }
        None => false,
    }
}
