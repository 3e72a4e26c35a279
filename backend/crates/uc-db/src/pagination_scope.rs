use crate::{PageRequest, QueryScope, ScopedQuery};

/// Applies `ORDER BY`, `LIMIT` and `OFFSET` from a [`PageRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationScope {
    page: PageRequest,
}

impl PaginationScope {
    pub fn new(page: PageRequest) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &PageRequest {
        &self.page
    }
}

impl QueryScope for PaginationScope {
    fn apply(&self, query: &mut ScopedQuery) {
        query.order_by(self.page.sort_column(), self.page.direction);
        query.limit_offset(i64::from(self.page.effective_limit()), self.page.offset());
    }
}
