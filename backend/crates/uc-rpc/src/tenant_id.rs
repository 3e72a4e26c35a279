use crate::{Result as RpcErrorResult, RpcError};

use std::fmt;
use std::ops::Deref;

/// Header (and metadata key) carrying the tenant identifier
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Opaque, non-empty tenant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    /// Parse a raw header value. Surrounding whitespace is ignored; empty
    /// values are rejected.
    #[track_caller]
    pub fn parse(raw: &str) -> RpcErrorResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RpcError::missing_tenant_header());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for TenantId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
