//! `uc.session.v1.SessionService`: reports the identity and tenant the
//! interceptor chain resolved for the caller.

use uc_rpc::{CallContext, ContextHelper, Handler, Result as RpcErrorResult, RpcRequest};

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

pub const WHO_AM_I: &str = "/uc.session.v1.SessionService/WhoAmI";
pub const GET_SERVER_INFO: &str = "/uc.session.v1.SessionService/GetServerInfo";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WhoAmIRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub tenant_id: String,
    pub subject: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    /// RFC3339, absent when the token carries no `exp`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

pub struct WhoAmIHandler {
    helper: Arc<dyn ContextHelper>,
}

impl WhoAmIHandler {
    pub fn new(helper: Arc<dyn ContextHelper>) -> Self {
        Self { helper }
    }
}

#[async_trait]
impl Handler<WhoAmIRequest, WhoAmIResponse> for WhoAmIHandler {
    async fn call(
        &self,
        ctx: CallContext,
        _request: RpcRequest<WhoAmIRequest>,
    ) -> RpcErrorResult<WhoAmIResponse> {
        let tenant = self.helper.get_tenant(&ctx)?;
        let claims = self.helper.get_user_claims(&ctx)?;
        debug!("{} Resolved caller {}", ctx.log_prefix(), claims.sub);

        Ok(WhoAmIResponse {
            tenant_id: tenant.into_inner(),
            subject: claims.sub.clone(),
            username: claims.preferred_username.clone(),
            email: claims.email.clone(),
            roles: claims.realm_access.roles.clone(),
            expires_at: claims.expires_at().map(|at| at.to_rfc3339()),
        })
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GetServerInfoRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetServerInfoResponse {
    pub tenant_id: String,
    pub version: String,
    pub authenticated: bool,
}

/// Works with or without a token, so it can be listed as an exempt route
pub struct GetServerInfoHandler {
    helper: Arc<dyn ContextHelper>,
}

impl GetServerInfoHandler {
    pub fn new(helper: Arc<dyn ContextHelper>) -> Self {
        Self { helper }
    }
}

#[async_trait]
impl Handler<GetServerInfoRequest, GetServerInfoResponse> for GetServerInfoHandler {
    async fn call(
        &self,
        ctx: CallContext,
        _request: RpcRequest<GetServerInfoRequest>,
    ) -> RpcErrorResult<GetServerInfoResponse> {
        let tenant = self.helper.get_tenant(&ctx)?;

        Ok(GetServerInfoResponse {
            tenant_id: tenant.into_inner(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            authenticated: ctx.claims().is_some(),
        })
    }
}
