use crate::{AuthError, Result as AuthErrorResult};

use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer, Serialize};

const MAX_SUBJECT_LENGTH: usize = 255;

/// Identity token claims as issued by the OIDC provider.
///
/// Field names follow the provider's JSON payload exactly. Everything except
/// `sub` defaults when absent so that minimal tokens still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration timestamp (Unix)
    #[serde(default)]
    pub exp: i64,
    /// Issued at timestamp (Unix)
    #[serde(default)]
    pub iat: i64,
    /// Not-before timestamp (Unix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Token identifier
    #[serde(default)]
    pub jti: String,
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: Audience,
    /// Subject (user id)
    pub sub: String,
    /// Token type, e.g. "Bearer" or "ID"
    #[serde(default)]
    pub typ: String,
    /// Authorized party (client the token was issued to)
    #[serde(default)]
    pub azp: String,
    /// Session id
    #[serde(default)]
    pub sid: String,
    /// Authentication context class
    #[serde(default)]
    pub acr: String,
    #[serde(rename = "allowed-origins", default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub realm_access: RealmAccess,
    /// Roles per resource (client), keyed by resource name
    #[serde(default)]
    pub resource_access: BTreeMap<String, ResourceRoles>,
    /// Space separated scope list
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub organization: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub preferred_username: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub email: String,
}

/// Realm-level roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Roles granted within a single resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRoles {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// `aud` claim. Providers send either a single string or an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Audience(pub Vec<String>);

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(aud) => Audience(vec![aud]),
            Raw::Many(auds) => Audience(auds),
        })
    }
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        self.0.iter().any(|aud| aud == audience)
    }
}

impl Claims {
    /// Structural checks after signature verification and decode
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (user_id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.sub.len() > MAX_SUBJECT_LENGTH {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    pub fn has_realm_role(&self, role: &str) -> bool {
        self.realm_access.roles.iter().any(|r| r == role)
    }

    pub fn resource_roles(&self, resource: &str) -> &[String] {
        self.resource_access
            .get(resource)
            .map(|access| access.roles.as_slice())
            .unwrap_or_default()
    }

    pub fn has_resource_role(&self, resource: &str, role: &str) -> bool {
        self.resource_roles(resource).iter().any(|r| r == role)
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes().any(|s| s == scope)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

impl fmt::Display for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
