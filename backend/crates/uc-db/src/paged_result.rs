use serde::Serialize;

/// One page of items plus the total number of matching rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    /// `ceil(total / limit)`; 0 when `limit <= 0`
    pub fn total_pages(&self, limit: i32) -> i64 {
        if limit <= 0 || self.total <= 0 {
            return 0;
        }
        let limit = i64::from(limit);
        (self.total + limit - 1) / limit
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
