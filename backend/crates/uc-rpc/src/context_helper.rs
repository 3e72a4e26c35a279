use crate::{CallContext, Result as RpcErrorResult, RpcError, TENANT_HEADER, TenantId};

use uc_auth::{Authenticator, Claims};

use std::sync::Arc;

use http::HeaderMap;
use log::debug;

/// Read access to "who is calling, for which tenant"
pub trait ContextHelper: Send + Sync {
    /// Tenant attached by the tenant interceptor, falling back to transport
    /// metadata for callers that bypassed the chain
    fn get_tenant(&self, ctx: &CallContext) -> RpcErrorResult<TenantId>;

    /// Claims attached by the token interceptor. Only meaningful on routes
    /// that require authentication.
    fn get_user_claims<'a>(&self, ctx: &'a CallContext) -> RpcErrorResult<&'a Claims>;

    fn get_access_token(&self, headers: &HeaderMap) -> RpcErrorResult<String>;
}

#[derive(Clone)]
pub struct DefaultContextHelper {
    authenticator: Arc<dyn Authenticator>,
}

impl DefaultContextHelper {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl ContextHelper for DefaultContextHelper {
    fn get_tenant(&self, ctx: &CallContext) -> RpcErrorResult<TenantId> {
        if let Some(tenant) = ctx.tenant() {
            debug!("{} Retrieved tenant id from context: {}", ctx.log_prefix(), tenant);
            return Ok(tenant.clone());
        }

        let from_metadata = ctx
            .metadata()
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|raw| TenantId::parse(raw).ok());

        match from_metadata {
            Some(tenant) => {
                debug!("{} Retrieved tenant id from metadata: {}", ctx.log_prefix(), tenant);
                Ok(tenant)
            }
            None => Err(RpcError::tenant_not_resolved()),
        }
    }

    fn get_user_claims<'a>(&self, ctx: &'a CallContext) -> RpcErrorResult<&'a Claims> {
        ctx.claims()
            .ok_or_else(|| RpcError::internal("no user claims attached; route is not authenticated"))
    }

    fn get_access_token(&self, headers: &HeaderMap) -> RpcErrorResult<String> {
        self.authenticator
            .extract_header_token(headers)
            .map_err(RpcError::missing_or_invalid_token)
    }
}
