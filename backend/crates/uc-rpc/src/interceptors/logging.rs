use crate::{
    CallContext, CallState, Interceptor, Message, Next, Result as RpcErrorResult, RpcRequest,
    Sanitizer,
};

use std::time::Instant;

use async_trait::async_trait;
use log::{error, info};

/// Outermost interceptor: logs the sanitized request, then either the
/// failure or the sanitized response, each with the call duration.
///
/// Headers are never logged, so neither the bearer token nor any other
/// credential header reaches the log. The result is returned untouched.
#[derive(Debug, Clone, Default)]
pub struct LoggingInterceptor {
    sanitizer: Sanitizer,
}

impl LoggingInterceptor {
    pub fn new(sanitizer: Sanitizer) -> Self {
        Self { sanitizer }
    }
}

#[async_trait]
impl<Req: Message, Resp: Message> Interceptor<Req, Resp> for LoggingInterceptor {
    async fn handle(
        &self,
        ctx: CallContext,
        request: RpcRequest<Req>,
        next: Next<'_, Req, Resp>,
    ) -> RpcErrorResult<Resp> {
        let started = Instant::now();
        let log_prefix = ctx.log_prefix();
        let progress = ctx.progress().clone();

        info!(
            "{} Received request for {}: {}",
            log_prefix,
            request.procedure,
            self.sanitizer.sanitize(&request.message)
        );

        let result = next.run(ctx, request).await;
        let duration = started.elapsed();

        match &result {
            Ok(response) => {
                progress.advance(CallState::Completed);
                info!(
                    "{} Completed state={} duration={:?} response={}",
                    log_prefix,
                    progress.current(),
                    duration,
                    self.sanitizer.sanitize(response)
                )
            }
            Err(e) => {
                let after = progress.advance(CallState::Failed);
                error!(
                    "{} Failed state={} after={} code={} status={} duration={:?} error={}",
                    log_prefix,
                    progress.current(),
                    after,
                    e.error_code(),
                    e.status(),
                    duration,
                    e
                )
            }
        }

        result
    }
}
