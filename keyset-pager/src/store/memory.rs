use super::{CountQuery, DataQuery, KeysetRow, PageStore};
use crate::error::StoreError;
use crate::filter::{Collation, SqlValue};
use async_trait::async_trait;
use log::trace;
use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

type Matcher<R> = Arc<dyn Fn(&R, &[SqlValue]) -> bool + Send + Sync>;

/// In-process store over a vector of rows.
///
/// The filter predicate text is not interpreted; a matcher closure receives
/// each row and the filter's parameters instead. Bounds, ordering, limits and
/// collation are applied the way a SQL store would apply them. Named
/// collations compare as binary.
#[derive(Clone)]
pub struct MemoryStore<R> {
    rows: Arc<RwLock<Vec<R>>>,
    matcher: Matcher<R>,
    count_queries: Arc<AtomicUsize>,
    data_queries: Arc<AtomicUsize>,
}

impl<R> std::fmt::Debug for MemoryStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field(
                "count_queries",
                &self.count_queries.load(AtomicOrdering::Relaxed),
            )
            .field(
                "data_queries",
                &self.data_queries.load(AtomicOrdering::Relaxed),
            )
            // Skip rows and matcher
            .finish_non_exhaustive()
    }
}

impl<R> MemoryStore<R>
where
    R: KeysetRow + Clone + Send + Sync + 'static,
{
    /// A store whose matcher accepts every row.
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            matcher: Arc::new(|_: &R, _: &[SqlValue]| true),
            count_queries: Arc::new(AtomicUsize::new(0)),
            data_queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replaces the matcher that stands in for the filter predicate.
    pub fn with_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&R, &[SqlValue]) -> bool + Send + Sync + 'static,
    {
        self.matcher = Arc::new(matcher);
        self
    }

    pub async fn insert(&self, row: R) {
        self.rows.write().await.push(row);
    }

    /// Removes the row with the given id. Returns whether one was removed.
    pub async fn remove(&self, id: i64) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        rows.len() != before
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Count queries served so far.
    pub fn count_queries(&self) -> usize {
        self.count_queries.load(AtomicOrdering::Relaxed)
    }

    /// Data queries served so far.
    pub fn data_queries(&self) -> usize {
        self.data_queries.load(AtomicOrdering::Relaxed)
    }
}

fn compare_keys(
    collation: &Collation,
    (left_natural, left_id): (&str, i64),
    (right_natural, right_id): (&str, i64),
) -> Ordering {
    let natural = match collation {
        Collation::CaseInsensitive => left_natural
            .to_lowercase()
            .cmp(&right_natural.to_lowercase()),
        Collation::Binary | Collation::Named(_) => left_natural.cmp(right_natural),
    };
    natural.then(left_id.cmp(&right_id))
}

#[async_trait]
impl<R> PageStore for MemoryStore<R>
where
    R: KeysetRow + Clone + Send + Sync + 'static,
{
    type Row = R;
    type Error = StoreError;

    async fn count(&self, query: CountQuery<'_>) -> Result<u64, StoreError> {
        self.count_queries.fetch_add(1, AtomicOrdering::Relaxed);
        let rows = self.rows.read().await;
        let params = &query.filter.params;
        let total = rows.iter().filter(|row| (self.matcher)(*row, params)).count();
        Ok(total as u64)
    }

    async fn fetch(&self, query: DataQuery<'_>) -> Result<Vec<R>, StoreError> {
        self.data_queries.fetch_add(1, AtomicOrdering::Relaxed);
        let collation = query.sort_key.collation();
        let params = &query.filter.params;
        let plan = query.plan;

        let rows = self.rows.read().await;
        let mut matched: Vec<R> = rows
            .iter()
            .filter(|row| (self.matcher)(*row, params))
            .filter(|row| match &plan.bound {
                Some(bound) => bound.comparison.admits(compare_keys(
                    collation,
                    (row.natural(), row.id()),
                    (&bound.payload.natural, bound.payload.id),
                )),
                None => true,
            })
            .cloned()
            .collect();
        drop(rows);

        matched.sort_by(|a, b| {
            let ordering = compare_keys(collation, (a.natural(), a.id()), (b.natural(), b.id()));
            if plan.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        matched.truncate(plan.fetch_limit);

        trace!(
            "Memory store returned {} rows (fetch limit {})",
            matched.len(),
            plan.fetch_limit
        );
        Ok(matched)
    }
}
