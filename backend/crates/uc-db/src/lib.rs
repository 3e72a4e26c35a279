pub mod error;
pub mod page_request;
pub mod paged_result;
pub mod pagination_scope;
pub mod query_scope;
pub mod scoped_query;
pub mod tenant_scope;

pub use error::{DbError, Result};
pub use page_request::{DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SORT_FIELD, PageRequest, SortDirection};
pub use paged_result::PagedResult;
pub use pagination_scope::PaginationScope;
pub use query_scope::QueryScope;
pub use scoped_query::ScopedQuery;
pub use tenant_scope::{TENANT_COLUMN, TenantScope};
