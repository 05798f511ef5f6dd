use serde::{Deserialize, Serialize};

/// One page of rows, always in ascending sort-key order, plus navigation state.
///
/// `total` is `None` when the request skipped the count query. In that mode
/// emptiness must be judged from `data`, not from `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<R> {
    pub data: Vec<R>,
    pub total: Option<u64>,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

impl<R> PageResult<R> {
    /// The result for a filter known to match nothing.
    pub fn empty(total: Option<u64>) -> Self {
        Self {
            data: Vec::new(),
            total,
            has_next: false,
            has_prev: false,
            next_cursor: None,
            prev_cursor: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Maps the rows, keeping navigation state.
    pub fn map<T, F: FnMut(R) -> T>(self, f: F) -> PageResult<T> {
        PageResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            has_next: self.has_next,
            has_prev: self.has_prev,
            next_cursor: self.next_cursor,
            prev_cursor: self.prev_cursor,
        }
    }
}
