use crate::{
    CallContext, CallState, Interceptor, Message, Next, Result as RpcErrorResult, RpcError, RpcRequest,
    TENANT_HEADER, TenantId,
};

use async_trait::async_trait;
use log::{debug, warn};

/// Requires `x-tenant-id` on every call and attaches it to the context.
///
/// No exemptions: tenant-less routes such as health checks are served
/// outside the pipeline.
#[derive(Debug, Clone, Default)]
pub struct TenantInterceptor;

impl TenantInterceptor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<Req: Message, Resp: Message> Interceptor<Req, Resp> for TenantInterceptor {
    async fn handle(
        &self,
        ctx: CallContext,
        request: RpcRequest<Req>,
        next: Next<'_, Req, Resp>,
    ) -> RpcErrorResult<Resp> {
        let tenant = match request.header_str(TENANT_HEADER) {
            Some(raw) => TenantId::parse(raw)?,
            None => {
                warn!("{} Rejected call without {}", ctx.log_prefix(), TENANT_HEADER);
                return Err(RpcError::missing_tenant_header());
            }
        };

        debug!("{} Tenant resolved: {}", ctx.log_prefix(), tenant);
        let ctx = ctx.with_tenant(tenant)?;
        ctx.progress().advance(CallState::TenantChecked);
        next.run(ctx, request).await
    }
}
