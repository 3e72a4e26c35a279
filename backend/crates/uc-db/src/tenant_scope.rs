use crate::{QueryScope, Result as DbErrorResult, ScopedQuery};

use uc_rpc::{CallContext, ContextHelper, TenantId};

/// Column every tenant-owned table carries
pub const TENANT_COLUMN: &str = "tenant_id";

/// Restricts a query to rows owned by one tenant.
///
/// Applying scopes for two different tenants yields no rows at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope {
    tenant: TenantId,
}

impl TenantScope {
    pub fn new(tenant: TenantId) -> Self {
        Self { tenant }
    }

    /// Scope for the tenant of the current call
    #[track_caller]
    pub fn from_context(ctx: &CallContext, helper: &dyn ContextHelper) -> DbErrorResult<Self> {
        Ok(Self::new(helper.get_tenant(ctx)?))
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }
}

impl QueryScope for TenantScope {
    fn apply(&self, query: &mut ScopedQuery) {
        query.restrict_to_tenant(&self.tenant);
    }
}
