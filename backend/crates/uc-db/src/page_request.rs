use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i32 = 1;
pub const DEFAULT_LIMIT: i32 = 20;
pub const DEFAULT_SORT_FIELD: &str = "created_at";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Caller did not choose; treated as descending
    #[default]
    Unspecified,
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc | Self::Unspecified => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Pagination parameters as received from the caller. Raw values are kept;
/// defaults are applied by the `effective_*` accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page: i32,
    pub limit: i32,
    pub sort: String,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: i32, limit: i32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = sort.into();
        self.direction = direction;
        self
    }

    /// 1-based page; anything below 1 means the first page
    pub fn effective_page(&self) -> i32 {
        if self.page <= 0 { DEFAULT_PAGE } else { self.page }
    }

    pub fn effective_limit(&self) -> i32 {
        if self.limit <= 0 { DEFAULT_LIMIT } else { self.limit }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.effective_page()) - 1) * i64::from(self.effective_limit())
    }

    /// Column to order by. The sort field is interpolated into SQL, so
    /// anything that is not a plain identifier falls back to the default.
    pub fn sort_column(&self) -> &str {
        let sort = self.sort.trim();
        if sort.is_empty() {
            return DEFAULT_SORT_FIELD;
        }
        if !is_identifier(sort) {
            warn!("Ignoring unsafe sort field {:?}, using {}", sort, DEFAULT_SORT_FIELD);
            return DEFAULT_SORT_FIELD;
        }
        sort
    }
}

fn is_identifier(field: &str) -> bool {
    let mut chars = field.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
