use crate::ScopedQuery;

/// Composable query modifier.
///
/// Scopes must be idempotent and must not depend on the order in which they
/// are applied.
pub trait QueryScope {
    fn apply(&self, query: &mut ScopedQuery);
}

impl<S: QueryScope + ?Sized> QueryScope for &S {
    fn apply(&self, query: &mut ScopedQuery) {
        (**self).apply(query)
    }
}
