use crate::session::{
    GET_SERVER_INFO, GetServerInfoHandler, GetServerInfoRequest, GetServerInfoResponse,
    WHO_AM_I, WhoAmIHandler, WhoAmIRequest, WhoAmIResponse,
};
use crate::{connect, health};

use uc_auth::Authenticator;
use uc_rpc::{ContextHelper, DefaultContextHelper, Pipeline, PipelineBuilder, Sanitizer};

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// Everything the router needs to assemble per-procedure pipelines
#[derive(Clone)]
pub struct RouterConfig {
    pub authenticator: Arc<dyn Authenticator>,
    pub exempt_routes: Vec<String>,
    pub sanitizer: Sanitizer,
    pub max_timeout: Duration,
}

impl RouterConfig {
    pub fn from_config(config: &uc_config::Config, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            exempt_routes: config.auth.exempt_routes.clone(),
            sanitizer: Sanitizer::with_additional_fields(&config.sanitizer.sensitive_fields),
            max_timeout: config.max_timeout(),
        }
    }
}

/// Build the application router with all endpoints
pub fn build_router(config: RouterConfig) -> Router {
    let pipelines = PipelineBuilder::new(config.authenticator.clone())
        .exempt_routes(config.exempt_routes.iter().cloned())
        .sanitizer(config.sanitizer.clone());
    let helper: Arc<dyn ContextHelper> =
        Arc::new(DefaultContextHelper::new(config.authenticator.clone()));

    let who_am_i: Pipeline<WhoAmIRequest, WhoAmIResponse> =
        pipelines.build(WhoAmIHandler::new(helper.clone()));
    let server_info: Pipeline<GetServerInfoRequest, GetServerInfoResponse> =
        pipelines.build(GetServerInfoHandler::new(helper));

    Router::new()
        // Outside the interceptor chain
        .route("/health", get(health::health_check))
        .route(WHO_AM_I, connect::unary(who_am_i, config.max_timeout))
        .route(GET_SERVER_INFO, connect::unary(server_info, config.max_timeout))
        .fallback(connect::unimplemented)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
