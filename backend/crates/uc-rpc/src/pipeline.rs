use crate::{
    CallContext, Handler, Interceptor, LoggingInterceptor, Message, Next,
    Result as RpcErrorResult, RpcRequest, Sanitizer, TenantInterceptor, TokenInterceptor,
};

use uc_auth::Authenticator;

use std::sync::Arc;

/// Ordered interceptor chain wrapped around a single handler
pub struct Pipeline<Req: Message, Resp: Message> {
    interceptors: Vec<Arc<dyn Interceptor<Req, Resp>>>,
    handler: Arc<dyn Handler<Req, Resp>>,
}

impl<Req: Message, Resp: Message> Clone for Pipeline<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            interceptors: self.interceptors.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<Req: Message, Resp: Message> Pipeline<Req, Resp> {
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub async fn call(&self, ctx: CallContext, request: RpcRequest<Req>) -> RpcErrorResult<Resp> {
        Next::new(&self.interceptors, self.handler.as_ref())
            .run(ctx, request)
            .await
    }
}

/// Assembles the fixed chain: Logging -> Tenant -> Token -> handler
#[derive(Clone)]
pub struct PipelineBuilder {
    authenticator: Arc<dyn Authenticator>,
    exempt_routes: Vec<String>,
    sanitizer: Sanitizer,
}

impl PipelineBuilder {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            exempt_routes: Vec::new(),
            sanitizer: Sanitizer::default(),
        }
    }

    pub fn exempt_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt_routes.extend(routes.into_iter().map(Into::into));
        self
    }

    pub fn sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn build<Req, Resp, H>(&self, handler: H) -> Pipeline<Req, Resp>
    where
        Req: Message,
        Resp: Message,
        H: Handler<Req, Resp> + 'static,
    {
        let token = TokenInterceptor::new(self.authenticator.clone())
            .with_exempt_routes(self.exempt_routes.iter().cloned());

        let interceptors: Vec<Arc<dyn Interceptor<Req, Resp>>> = vec![
            Arc::new(LoggingInterceptor::new(self.sanitizer.clone()))
                as Arc<dyn Interceptor<Req, Resp>>,
            Arc::new(TenantInterceptor::new()),
            Arc::new(token),
        ];

        Pipeline {
            interceptors,
            handler: Arc::new(handler),
        }
    }
}
