//! Page assembly: count, fetch, trim, reorder, and navigation flags.

use crate::adapter::EntityAdapter;
use crate::codec::{CursorCodec, CursorPayload};
use crate::config::PagerConfig;
use crate::params::PageParams;
use crate::planner::plan_page;
use crate::request::{Direction, PageRequest};
use crate::result::PageResult;
use crate::store::{CountQuery, DataQuery, KeysetRow, PageStore};
use log::{debug, warn};

/// Keyset pagination over a [`PageStore`].
///
/// Holds no paging state between calls. Each call issues at most one count
/// query followed by one data query, and store errors are returned as-is.
#[derive(Debug, Clone)]
pub struct KeysetPager<S> {
    store: S,
    config: PagerConfig,
    codec: CursorCodec,
}

impl<S: PageStore> KeysetPager<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, PagerConfig::default())
    }

    pub fn with_config(store: S, config: PagerConfig) -> Self {
        let codec = config.codec();
        Self {
            store,
            config,
            codec,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn codec(&self) -> &CursorCodec {
        &self.codec
    }

    /// Cache key for `request` after applying this pager's limits.
    pub fn request_signature(&self, request: &PageRequest) -> Result<String, serde_json::Error> {
        request.normalized(&self.config).signature()
    }

    /// Fetches a page for an adapter-defined listing.
    pub async fn fetch_for<A>(
        &self,
        adapter: &A,
        params: PageParams,
    ) -> Result<PageResult<S::Row>, S::Error>
    where
        A: EntityAdapter<Row = S::Row> + Sync,
    {
        let request = adapter.request().with_params(params);
        self.fetch_page(&request).await
    }

    /// Fetches one page.
    ///
    /// Rows come back in ascending sort-key order whatever the scan
    /// direction. An undecodable cursor behaves as if none was supplied.
    pub async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<PageResult<S::Row>, S::Error> {
        let limit = request.effective_limit(&self.config);
        let cursor = self.decode_cursor(request.cursor.as_deref());

        let total = if request.want_total {
            let total = self
                .store
                .count(CountQuery {
                    filter: &request.filter,
                })
                .await
                .inspect_err(|e| warn!("Count query failed: {}", e))?;
            if total == 0 {
                debug!("Filter matches no rows, skipping data query");
                return Ok(PageResult::empty(Some(0)));
            }
            Some(total)
        } else {
            None
        };

        let plan = plan_page(limit, request.direction, request.last_page, cursor.as_ref());
        debug!(
            "Keyset plan: descending={} bound={:?} fetch_limit={}",
            plan.descending,
            plan.bound.as_ref().map(|bound| bound.comparison),
            plan.fetch_limit
        );

        let mut rows = self
            .store
            .fetch(DataQuery {
                filter: &request.filter,
                sort_key: &request.sort_key,
                plan: &plan,
            })
            .await
            .inspect_err(|e| warn!("Data query failed: {}", e))?;

        let has_more = rows.len() > limit;
        rows.truncate(limit);
        if plan.descending {
            rows.reverse();
        }

        let prev_cursor = rows.first().map(|row| self.encode_cursor(row));
        let next_cursor = rows.last().map(|row| self.encode_cursor(row));

        let cursor_supplied = cursor.is_some();
        let (has_next, has_prev) = if request.last_page {
            // Without a count there is nothing to prove the tail is also the head.
            let has_prev = total.is_none_or(|total| total > rows.len() as u64);
            (false, has_prev)
        } else {
            match request.direction {
                Direction::Prev => (cursor_supplied, has_more),
                Direction::Next => (has_more, cursor_supplied),
            }
        };

        Ok(PageResult {
            data: rows,
            total,
            has_next,
            has_prev,
            next_cursor,
            prev_cursor,
        })
    }

    fn encode_cursor(&self, row: &S::Row) -> String {
        let token = self.codec.encode(&row.sort_tuple());
        if token.len() > self.codec.max_token_len() {
            warn!(
                "Cursor for row {} is {} chars, over the {} char decode limit",
                row.id(),
                token.len(),
                self.codec.max_token_len()
            );
        }
        token
    }

    fn decode_cursor(&self, token: Option<&str>) -> Option<CursorPayload> {
        let token = token?;
        let payload = self.codec.decode(token);
        if payload.is_none() && !token.trim().is_empty() {
            debug!("Discarding undecodable cursor token");
        }
        payload
    }
}
