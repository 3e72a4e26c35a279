use crate::{CallProgress, CallState, Result as RpcErrorResult, RpcError, TenantId};

use uc_auth::Claims;

use std::sync::Arc;
use std::time::{Duration, Instant};

use http::HeaderMap;
use uuid::Uuid;

/// Immutable per-call context threaded through the interceptor chain.
///
/// Tenant and claims start empty and are attached at most once, by the
/// tenant and token interceptors respectively. Attaching returns a new
/// context; nothing downstream can overwrite them.
#[derive(Debug, Clone)]
pub struct CallContext {
    call_id: Uuid,
    procedure: String,
    started_at: Instant,
    deadline: Option<tokio::time::Instant>,
    metadata: HeaderMap,
    tenant: Option<TenantId>,
    claims: Option<Arc<Claims>>,
    progress: CallProgress,
}

impl CallContext {
    pub fn new(procedure: impl Into<String>, metadata: HeaderMap) -> Self {
        Self {
            call_id: Uuid::new_v4(),
            procedure: procedure.into(),
            started_at: Instant::now(),
            deadline: None,
            metadata,
            tenant: None,
            claims: None,
            progress: CallProgress::new(),
        }
    }

    /// Attach the caller's deadline
    pub fn with_deadline(mut self, deadline: tokio::time::Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a deadline `timeout` from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(tokio::time::Instant::now() + timeout)
    }

    #[track_caller]
    pub fn with_tenant(mut self, tenant: TenantId) -> RpcErrorResult<Self> {
        if self.tenant.is_some() {
            return Err(RpcError::internal("tenant id already attached to call context"));
        }
        self.tenant = Some(tenant);
        Ok(self)
    }

    #[track_caller]
    pub fn with_claims(mut self, claims: Claims) -> RpcErrorResult<Self> {
        if self.claims.is_some() {
            return Err(RpcError::internal("claims already attached to call context"));
        }
        self.claims = Some(Arc::new(claims));
        Ok(self)
    }

    pub fn call_id(&self) -> Uuid {
        self.call_id
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    pub fn metadata(&self) -> &HeaderMap {
        &self.metadata
    }

    pub fn deadline(&self) -> Option<tokio::time::Instant> {
        self.deadline
    }

    pub fn tenant(&self) -> Option<&TenantId> {
        self.tenant.as_ref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_deref()
    }

    /// Shared with every clone of this context
    pub fn progress(&self) -> &CallProgress {
        &self.progress
    }

    pub fn state(&self) -> CallState {
        self.progress.current()
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Prefix for log lines about this call
    pub fn log_prefix(&self) -> String {
        let call_id = self.call_id.simple().to_string();
        format!("[call={} proc={}]", &call_id[..8], self.procedure)
    }
}
