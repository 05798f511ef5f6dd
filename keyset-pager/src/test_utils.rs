use crate::codec::CursorPayload;
use crate::error::StoreError;
use crate::filter::{Filter, SortKey};
use crate::request::PageRequest;
use crate::store::memory::MemoryStore;
use crate::store::{CountQuery, DataQuery, KeysetRow, PageStore};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Minimal dictionary-style row used across unit tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub entri: String,
}

impl KeysetRow for Entry {
    fn natural(&self) -> &str {
        &self.entri
    }

    fn id(&self) -> i64 {
        self.id
    }
}

pub fn entry(id: i64, entri: &str) -> Entry {
    Entry {
        id,
        entri: entri.to_string(),
    }
}

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Seven rows whose `(entri, id)` order is the order of this list.
/// `kata` appears three times so that ties on the natural field are exercised.
pub fn seven_entries() -> Vec<Entry> {
    vec![
        entry(3, "air"),
        entry(1, "batu"),
        entry(2, "kata"),
        entry(5, "kata"),
        entry(9, "kata"),
        entry(4, "laut"),
        entry(8, "zaitun"),
    ]
}

/// The same rows, shuffled into insertion order that differs from sort order.
pub fn seven_entry_store() -> MemoryStore<Entry> {
    let mut rows = seven_entries();
    rows.reverse();
    rows.swap(1, 4);
    MemoryStore::new(rows)
}

pub fn entry_request() -> PageRequest {
    PageRequest::new(Filter::all(), SortKey::new("entri", "id").unwrap())
}

pub fn payload_of(row: &Entry) -> CursorPayload {
    row.sort_tuple()
}

/// Store whose count and data queries always fail.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
    pub fail_count: bool,
}

#[async_trait::async_trait]
impl PageStore for FailingStore {
    type Row = Entry;
    type Error = StoreError;

    async fn count(&self, _query: CountQuery<'_>) -> Result<u64, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_count {
            Err(StoreError::Connection("connection refused".to_string()))
        } else {
            Ok(3)
        }
    }

    async fn fetch(&self, _query: DataQuery<'_>) -> Result<Vec<Entry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Query("relation \"entri\" does not exist".to_string()))
    }
}
