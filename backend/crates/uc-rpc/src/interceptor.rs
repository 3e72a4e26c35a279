use crate::{CallContext, CallState, Result as RpcErrorResult, RpcError, RpcRequest};

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

/// Request and response payloads flowing through a pipeline
pub trait Message: Serialize + Send + Sync + 'static {}

impl<T> Message for T where T: Serialize + Send + Sync + 'static {}

/// Middleware unit: inspect, augment or reject a call before `next` runs
#[async_trait]
pub trait Interceptor<Req: Message, Resp: Message>: Send + Sync {
    async fn handle(
        &self,
        ctx: CallContext,
        request: RpcRequest<Req>,
        next: Next<'_, Req, Resp>,
    ) -> RpcErrorResult<Resp>;
}

/// Innermost unit of a pipeline: the service method itself
#[async_trait]
pub trait Handler<Req: Message, Resp: Message>: Send + Sync {
    async fn call(&self, ctx: CallContext, request: RpcRequest<Req>) -> RpcErrorResult<Resp>;
}

/// Remainder of the chain after the current interceptor
pub struct Next<'a, Req: Message, Resp: Message> {
    chain: &'a [Arc<dyn Interceptor<Req, Resp>>],
    handler: &'a dyn Handler<Req, Resp>,
}

impl<'a, Req: Message, Resp: Message> Next<'a, Req, Resp> {
    pub(crate) fn new(
        chain: &'a [Arc<dyn Interceptor<Req, Resp>>],
        handler: &'a dyn Handler<Req, Resp>,
    ) -> Self {
        Self { chain, handler }
    }

    /// Hand the call to the next interceptor, or the handler at the end.
    ///
    /// The handler runs under the context deadline, so interceptors further
    /// out still see a `DeadlineExceeded` result when it overruns.
    pub async fn run(self, ctx: CallContext, request: RpcRequest<Req>) -> RpcErrorResult<Resp> {
        let chain = self.chain;
        let Some((current, rest)) = chain.split_first() else {
            return self.call_handler(ctx, request).await;
        };

        current
            .handle(ctx, request, Next::new(rest, self.handler))
            .await
    }

    async fn call_handler(self, ctx: CallContext, request: RpcRequest<Req>) -> RpcErrorResult<Resp> {
        let progress = ctx.progress().clone();
        let deadline = ctx.deadline();
        let call = self.handler.call(ctx, request);

        let result = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, call)
                .await
                .unwrap_or_else(|_| Err(RpcError::deadline_exceeded("handling call"))),
            None => call.await,
        };

        if result.is_ok() {
            progress.advance(CallState::HandlerExecuted);
        }
        result
    }
}

/// Adapter turning an async function into a [`Handler`]
pub struct HandlerFn<F, Req, Resp> {
    f: F,
    _marker: PhantomData<fn(Req) -> Resp>,
}

pub fn handler_fn<F, Fut, Req, Resp>(f: F) -> HandlerFn<F, Req, Resp>
where
    F: Fn(CallContext, RpcRequest<Req>) -> Fut + Send + Sync,
    Fut: Future<Output = RpcErrorResult<Resp>> + Send + 'static,
{
    HandlerFn {
        f,
        _marker: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, Req, Resp> Handler<Req, Resp> for HandlerFn<F, Req, Resp>
where
    Req: Message,
    Resp: Message,
    F: Fn(CallContext, RpcRequest<Req>) -> Fut + Send + Sync,
    Fut: Future<Output = RpcErrorResult<Resp>> + Send + 'static,
{
    async fn call(&self, ctx: CallContext, request: RpcRequest<Req>) -> RpcErrorResult<Resp> {
        (self.f)(ctx, request).await
    }
}
