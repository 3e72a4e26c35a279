pub mod call_context;
pub mod call_state;
pub mod context_helper;
pub mod error;
pub mod interceptor;
pub mod interceptors;
pub mod pipeline;
pub mod rpc_request;
pub mod sanitizer;
pub mod status_code;
pub mod tenant_id;

pub use call_context::CallContext;
pub use call_state::{CallProgress, CallState};
pub use context_helper::{ContextHelper, DefaultContextHelper};
pub use error::{Result, RpcError};
pub use interceptor::{Handler, HandlerFn, Interceptor, Message, Next, handler_fn};
pub use interceptors::logging::LoggingInterceptor;
pub use interceptors::tenant::TenantInterceptor;
pub use interceptors::token::TokenInterceptor;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use rpc_request::RpcRequest;
pub use sanitizer::{DEFAULT_SENSITIVE_FIELDS, REDACTED, Sanitizer};
pub use status_code::StatusCode;
pub use tenant_id::{TENANT_HEADER, TenantId};

#[cfg(test)]
mod tests;
