use crate::codec::CursorPayload;
use crate::filter::{Filter, SortKey, SqlValue};
use crate::planner::{KeysetPlan, count_clause};
use std::sync::Arc;

pub mod memory;

/// A row the engine can page over. Only the two sort-key fields are ever read.
pub trait KeysetRow {
    /// Value of the natural ordering column.
    fn natural(&self) -> &str;

    /// Value of the unique id column.
    fn id(&self) -> i64;

    /// The row's position in the ordering, as carried by cursors.
    fn sort_tuple(&self) -> CursorPayload {
        CursorPayload::new(self.natural(), self.id())
    }
}

/// Rendered SQL: everything after `SELECT ... FROM ...`, plus its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreQuery {
    pub clause: String,
    pub params: Vec<SqlValue>,
}

/// Count of rows matching the caller's filter. No cursor bound applies.
#[derive(Debug, Clone, Copy)]
pub struct CountQuery<'a> {
    pub filter: &'a Filter,
}

impl CountQuery<'_> {
    pub fn to_sql(&self) -> StoreQuery {
        count_clause(self.filter)
    }
}

/// Rows matching the caller's filter and the plan's bound, in the plan's
/// scan order, at most `plan.fetch_limit` of them.
#[derive(Debug, Clone, Copy)]
pub struct DataQuery<'a> {
    pub filter: &'a Filter,
    pub sort_key: &'a SortKey,
    pub plan: &'a KeysetPlan,
}

impl DataQuery<'_> {
    pub fn to_sql(&self) -> StoreQuery {
        self.plan.data_clause(self.filter, self.sort_key)
    }
}

/// Backend that runs the count and data queries.
///
/// SQL backends render the queries with `to_sql()` and prepend their own
/// `SELECT ... FROM ...`. Implementations must be thread-safe; the engine
/// calls them from whatever task is serving the page.
#[async_trait::async_trait]
pub trait PageStore: Send + Sync {
    type Row: KeysetRow + Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of rows matching the filter.
    async fn count(&self, query: CountQuery<'_>) -> Result<u64, Self::Error>;

    /// Rows for the data query, in scan order.
    async fn fetch(&self, query: DataQuery<'_>) -> Result<Vec<Self::Row>, Self::Error>;
}

#[async_trait::async_trait]
impl<S: PageStore + ?Sized> PageStore for Arc<S> {
    type Row = S::Row;
    type Error = S::Error;

    async fn count(&self, query: CountQuery<'_>) -> Result<u64, Self::Error> {
        (**self).count(query).await
    }

    async fn fetch(&self, query: DataQuery<'_>) -> Result<Vec<Self::Row>, Self::Error> {
        (**self).fetch(query).await
    }
}
