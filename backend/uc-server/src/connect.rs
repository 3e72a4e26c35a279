//! Connect protocol adapter: unary calls with JSON bodies.
//!
//! Each procedure is served as `POST /<package>.<Service>/<Method>`. The
//! request headers become the call metadata and `connect-timeout-ms` sets the
//! call deadline, capped by the configured maximum.

use uc_rpc::{CallContext, Message, Pipeline, RpcError, RpcRequest, StatusCode};

use std::time::Duration;

use axum::Json;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, post};
use bytes::Bytes;
use http::{HeaderMap, Uri, header};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const CONNECT_TIMEOUT_HEADER: &str = "connect-timeout-ms";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Connect error body, e.g. `{"code": "unauthenticated", "message": "invalid token"}`
#[derive(Debug, Serialize)]
pub struct ConnectErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Pipeline failure rendered as a Connect unary error response
#[derive(Debug)]
pub struct ConnectError(pub RpcError);

impl From<RpcError> for ConnectError {
    fn from(e: RpcError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ConnectError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        debug!("Returning {} ({}): {}", status, self.0.error_code(), self.0);

        let body = ConnectErrorBody {
            code: status.as_str(),
            message: self.0.client_message(),
        };

        (status.http_status(), Json(body)).into_response()
    }
}

/// Route serving one procedure through `pipeline`
pub fn unary<Req, Resp>(pipeline: Pipeline<Req, Resp>, max_timeout: Duration) -> MethodRouter
where
    Req: Message + DeserializeOwned,
    Resp: Message,
{
    post(move |uri: Uri, headers: HeaderMap, body: Bytes| async move {
        match serve_unary(&pipeline, max_timeout, uri.path(), headers, body).await {
            Ok(response) => (http::StatusCode::OK, Json(response)).into_response(),
            Err(e) => e.into_response(),
        }
    })
}

/// Fallback for procedures nobody registered
pub async fn unimplemented(uri: Uri) -> Response {
    warn!("No handler registered for {}", uri.path());
    ConnectError(RpcError::handler(
        StatusCode::Unimplemented,
        format!("{} is not implemented", uri.path()),
    ))
    .into_response()
}

async fn serve_unary<Req, Resp>(
    pipeline: &Pipeline<Req, Resp>,
    max_timeout: Duration,
    procedure: &str,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Resp, ConnectError>
where
    Req: Message + DeserializeOwned,
    Resp: Message,
{
    if !is_json(&headers) {
        return Err(RpcError::handler(
            StatusCode::InvalidArgument,
            format!("content type must be {JSON_CONTENT_TYPE}"),
        )
        .into());
    }

    let timeout = call_timeout(&headers, max_timeout)?;
    let message = decode_message::<Req>(&body)?;

    // Deadline is enforced inside the pipeline
    let ctx = CallContext::new(procedure, headers.clone()).with_timeout(timeout);
    let request = RpcRequest::new(procedure, message).with_headers(headers);

    pipeline.call(ctx, request).await.map_err(ConnectError)
}

/// Deadline requested by the caller, never longer than `max_timeout`
pub fn call_timeout(headers: &HeaderMap, max_timeout: Duration) -> Result<Duration, RpcError> {
    let Some(raw) = headers.get(CONNECT_TIMEOUT_HEADER) else {
        return Ok(max_timeout);
    };

    let millis = raw
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .ok_or_else(|| {
            RpcError::handler(
                StatusCode::InvalidArgument,
                format!("{CONNECT_TIMEOUT_HEADER} must be a positive integer"),
            )
        })?;

    Ok(Duration::from_millis(millis).min(max_timeout))
}

fn decode_message<Req: DeserializeOwned>(body: &[u8]) -> Result<Req, RpcError> {
    // Connect clients may send an empty body for an empty message
    let body: &[u8] = if body.is_empty() { b"{}" } else { body };

    serde_json::from_slice(body).map_err(|e| {
        RpcError::handler(
            StatusCode::InvalidArgument,
            format!("request body is not valid JSON for this procedure: {e}"),
        )
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_none_or(|v| v.trim_start().starts_with(JSON_CONTENT_TYPE))
}
