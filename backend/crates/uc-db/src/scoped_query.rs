use crate::{
    DbError, PagedResult, QueryScope, Result as DbErrorResult, SortDirection, TENANT_COLUMN,
};

use uc_rpc::TenantId;

use std::collections::BTreeSet;

use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// SELECT over a single table, shaped by [`QueryScope`]s.
///
/// Scopes record what they need (equality filters, ordering, a page window)
/// and the SQL is rendered only when the query is built, so the order in
/// which scopes are applied never changes the result. Re-applying a scope
/// replaces its previous effect.
///
/// Tenant restrictions live apart from ordinary filters and only ever
/// accumulate: nothing can replace or remove one, and two different tenants
/// AND together into a query that matches no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedQuery {
    table: &'static str,
    columns: &'static str,
    tenants: BTreeSet<String>,
    filters: Vec<(&'static str, String)>,
    order: Option<(String, SortDirection)>,
    window: Option<(i64, i64)>,
}

impl ScopedQuery {
    pub fn select(table: &'static str, columns: &'static str) -> Self {
        Self {
            table,
            columns,
            tenants: BTreeSet::new(),
            filters: Vec::new(),
            order: None,
            window: None,
        }
    }

    pub fn scope(mut self, scope: impl QueryScope) -> Self {
        scope.apply(&mut self);
        self
    }

    /// Only match rows owned by `tenant`, on top of any earlier restriction
    pub fn restrict_to_tenant(&mut self, tenant: &TenantId) -> &mut Self {
        self.tenants.insert(tenant.as_str().to_string());
        self
    }

    /// Require `column = value`, replacing any earlier filter on `column`.
    ///
    /// The tenant column is reserved for [`restrict_to_tenant`](Self::restrict_to_tenant).
    #[track_caller]
    pub fn filter_eq(
        &mut self,
        column: &'static str,
        value: impl Into<String>,
    ) -> DbErrorResult<&mut Self> {
        if column == TENANT_COLUMN {
            return Err(DbError::reserved_column(column));
        }

        let value = value.into();
        match self.filters.iter_mut().find(|(c, _)| *c == column) {
            Some(existing) => existing.1 = value,
            None => {
                self.filters.push((column, value));
                self.filters.sort_by_key(|(c, _)| *c);
            }
        }
        Ok(self)
    }

    pub fn order_by(&mut self, column: impl Into<String>, direction: SortDirection) -> &mut Self {
        self.order = Some((column.into(), direction));
        self
    }

    pub fn limit_offset(&mut self, limit: i64, offset: i64) -> &mut Self {
        self.window = Some((limit, offset));
        self
    }

    /// Tenants every returned row must belong to
    pub fn tenants(&self) -> impl Iterator<Item = &str> {
        self.tenants.iter().map(String::as_str)
    }

    /// Filters other than the tenant restriction
    pub fn filters(&self) -> &[(&'static str, String)] {
        &self.filters
    }

    /// Rendered SQL of the row query, with `?` placeholders
    pub fn sql(&self) -> String {
        self.build().into_sql()
    }

    /// Row query with all filters bound
    pub fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", self.columns, self.table));
        self.push_filters(&mut builder);

        if let Some((column, direction)) = &self.order {
            builder.push(format!(" ORDER BY {} {}", column, direction.as_sql()));
        }
        if let Some((limit, offset)) = self.window {
            builder.push(" LIMIT ").push_bind(limit);
            builder.push(" OFFSET ").push_bind(offset);
        }
        builder
    }

    /// `COUNT(*)` over the same filters, ignoring order and window
    pub fn build_count(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", self.table));
        self.push_filters(&mut builder);
        builder
    }

    fn push_filters(&self, builder: &mut QueryBuilder<'static, Sqlite>) {
        let tenant_filters = self.tenants.iter().map(|tenant| (TENANT_COLUMN, tenant));
        let other_filters = self.filters.iter().map(|(column, value)| (*column, value));

        for (i, (column, value)) in tenant_filters.chain(other_filters).enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(column).push(" = ").push_bind(value.clone());
        }
    }

    /// Fetch the current window plus the total count across all pages
    pub async fn fetch_page<T>(&self, pool: &SqlitePool) -> DbErrorResult<PagedResult<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut rows = self.build();
        debug!("Fetching page: {}", rows.sql());
        let items = rows.build_query_as::<T>().fetch_all(pool).await?;

        let mut count = self.build_count();
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        Ok(PagedResult::new(items, total))
    }
}
