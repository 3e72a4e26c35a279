
use crate::{
    CallContext, Handler, Interceptor, Next, Result as RpcErrorResult, RpcRequest, TENANT_HEADER,
};

use uc_auth::{
    AUTHORIZATION_HEADER, Authenticator, BearerAuthenticator, Result as AuthErrorResult,
    StaticKeyVerifier, TokenVerifier, VerifiedToken,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::{Value, json};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";
pub(crate) const TENANT: &str = "tenant-acme";
pub(crate) const PROCEDURE: &str = "/acme.orders.v1.OrderService/GetOrder";
pub(crate) const HEALTH_PROCEDURE: &str = "/grpc.health.v1.Health/Check";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GetOrderRequest {
    pub order_id: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct GetOrderResponse {
    pub tenant: String,
    pub subject: Option<String>,
}

/// Verifier wrapper counting how often the identity provider was consulted
pub(crate) struct CountingVerifier {
    inner: StaticKeyVerifier,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingVerifier {
    pub(crate) fn new() -> Self {
        Self {
            inner: StaticKeyVerifier::with_hs256(TEST_SECRET),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub(crate) fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for CountingVerifier {
    async fn verify(&self, raw_token: &str) -> AuthErrorResult<VerifiedToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.verify(raw_token).await
    }
}

pub(crate) fn authenticator(verifier: Arc<CountingVerifier>) -> Arc<dyn Authenticator> {
    Arc::new(BearerAuthenticator::new(verifier))
}

pub(crate) fn claims_payload(sub: &str) -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "exp": now + 3600,
        "iat": now,
        "iss": "https://id.example.com/realms/acme",
        "aud": "unicore-api",
        "sub": sub,
        "preferred_username": "ada",
        "realm_access": { "roles": ["admin"] },
        "scope": "openid email"
    })
}

pub(crate) fn signed_token(payload: &Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        payload,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap()
}

pub(crate) fn valid_token() -> String {
    signed_token(&claims_payload("user-123"))
}

pub(crate) fn headers(tenant: Option<&str>, authorization: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(tenant) = tenant {
        headers.insert(TENANT_HEADER, HeaderValue::from_str(tenant).unwrap());
    }
    if let Some(authorization) = authorization {
        headers.insert(AUTHORIZATION_HEADER, HeaderValue::from_str(authorization).unwrap());
    }
    headers
}

pub(crate) fn order_request(procedure: &str, headers: HeaderMap) -> RpcRequest<GetOrderRequest> {
    RpcRequest::new(
        procedure,
        GetOrderRequest {
            order_id: "order-1".to_string(),
            api_key: "sk-live-123".to_string(),
        },
    )
    .with_headers(headers)
}

pub(crate) fn context_for(request: &RpcRequest<GetOrderRequest>) -> CallContext {
    CallContext::new(request.procedure.clone(), request.headers.clone())
}

/// Handler echoing the tenant and subject it sees, counting invocations
#[derive(Default)]
pub(crate) struct RecordingHandler {
    calls: AtomicUsize,
}

impl RecordingHandler {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Handler<GetOrderRequest, GetOrderResponse> for RecordingHandler {
    async fn call(
        &self,
        ctx: CallContext,
        _request: RpcRequest<GetOrderRequest>,
    ) -> RpcErrorResult<GetOrderResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GetOrderResponse {
            tenant: ctx.tenant().map(|t| t.to_string()).unwrap_or_default(),
            subject: ctx.claims().map(|c| c.sub.clone()),
        })
    }
}

/// Run a single interceptor in front of `handler`
pub(crate) async fn run_single<I>(
    interceptor: I,
    handler: &RecordingHandler,
    request: RpcRequest<GetOrderRequest>,
) -> RpcErrorResult<GetOrderResponse>
where
    I: Interceptor<GetOrderRequest, GetOrderResponse> + 'static,
{
    let interceptor: Arc<dyn Interceptor<GetOrderRequest, GetOrderResponse>> =
        Arc::new(interceptor);
    let chain = vec![interceptor];
    let ctx = context_for(&request);
    Next::new(&chain, handler).run(ctx, request).await
}
