use crate::{
    CallContext, CallState, Interceptor, Message, Next, Result as RpcErrorResult, RpcError, RpcRequest,
};

use uc_auth::{Authenticator, Claims, VerifiedToken};

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

/// Verifies the bearer token of every non-exempt route and attaches the
/// decoded claims to the context.
pub struct TokenInterceptor {
    authenticator: Arc<dyn Authenticator>,
    exempt_routes: HashSet<String>,
}

impl TokenInterceptor {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            exempt_routes: HashSet::new(),
        }
    }

    /// Fully-qualified procedures that skip token verification entirely
    pub fn with_exempt_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt_routes.extend(routes.into_iter().map(Into::into));
        self
    }

    pub fn is_exempt(&self, procedure: &str) -> bool {
        self.exempt_routes.contains(procedure)
    }

    async fn verify(&self, ctx: &CallContext, raw_token: &str) -> RpcErrorResult<VerifiedToken> {
        let verifier = self.authenticator.verifier();
        let verification = verifier.verify(raw_token);

        let outcome = match ctx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline, verification)
                .await
                .map_err(|_| RpcError::deadline_exceeded("verifying token"))?,
            None => verification.await,
        };

        outcome.map_err(RpcError::invalid_token)
    }
}

#[async_trait]
impl<Req: Message, Resp: Message> Interceptor<Req, Resp> for TokenInterceptor {
    async fn handle(
        &self,
        ctx: CallContext,
        request: RpcRequest<Req>,
        next: Next<'_, Req, Resp>,
    ) -> RpcErrorResult<Resp> {
        if self.is_exempt(ctx.procedure()) {
            debug!("{} Route exempt from authentication", ctx.log_prefix());
            return next.run(ctx, request).await;
        }

        let raw_token = self
            .authenticator
            .extract_header_token(&request.headers)
            .map_err(|e| {
                warn!("{} Token extraction failed: {}", ctx.log_prefix(), e.error_code());
                RpcError::missing_or_invalid_token(e)
            })?;

        let verified = self.verify(&ctx, &raw_token).await.inspect_err(|e| {
            warn!("{} Token verification failed: {}", ctx.log_prefix(), e.error_code());
        })?;

        let claims = verified
            .claims::<Claims>()
            .and_then(|claims| claims.validate().map(|_| claims))
            .map_err(RpcError::failed_parsing_token_claims)?;

        debug!("{} Authenticated subject {}", ctx.log_prefix(), claims.sub);
        let ctx = ctx.with_claims(claims)?;
        ctx.progress().advance(CallState::Authenticated);
        next.run(ctx, request).await
    }
}
