#![allow(dead_code)]

//! Test infrastructure for uc-server router tests

use uc_auth::{Authenticator, BearerAuthenticator, StaticKeyVerifier};
use uc_rpc::{Sanitizer, TENANT_HEADER};
use uc_server::{RouterConfig, build_router};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};

pub const TEST_SECRET: &[u8] = b"router-test-secret-at-least-32-bytes";
pub const TENANT: &str = "tenant-acme";

pub fn test_router(exempt_routes: &[&str]) -> Router {
    let verifier = Arc::new(StaticKeyVerifier::with_hs256(TEST_SECRET));
    let authenticator: Arc<dyn Authenticator> = Arc::new(BearerAuthenticator::new(verifier));

    build_router(RouterConfig {
        authenticator,
        exempt_routes: exempt_routes.iter().map(|r| r.to_string()).collect(),
        sanitizer: Sanitizer::default(),
        max_timeout: Duration::from_secs(5),
    })
}

pub fn token_for(sub: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let payload = json!({
        "exp": now + 3600,
        "iat": now,
        "sub": sub,
        "preferred_username": "ada",
        "email": "ada@acme.test",
        "realm_access": { "roles": ["admin", "billing"] }
    });

    encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap()
}

/// Connect unary request; `None` leaves the header off
pub fn connect_request(
    procedure: &str,
    tenant: Option<&str>,
    token: Option<&str>,
    body: Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(procedure)
        .header("Content-Type", "application/json");

    if let Some(tenant) = tenant {
        builder = builder.header(TENANT_HEADER, tenant);
    }
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}
