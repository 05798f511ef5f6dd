//! # keyset-pager
//!
//! Keyset ("cursor") pagination for filtered listings in a relational store.
//!
//! ## Components
//!
//! - **Codec:** opaque, URL-safe continuation tokens carrying a boundary row's
//!   `(natural, id)` sort-key tuple.
//! - **Planner:** scan direction, strict tuple bound and overfetch limit for a
//!   page request, rendered as SQL.
//! - **Assembler:** [`KeysetPager`] runs the optional count and the data query
//!   through a [`PageStore`], trims and reorders rows, and computes
//!   `hasNext`/`hasPrev` and cursors.
//!
//! Adapters supply the filter and sort key through [`EntityAdapter`]; the
//! engine never sees anything else about a row than its two sort-key fields.

pub mod adapter;
pub mod assembler;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod offset;
pub mod params;
pub mod planner;
pub mod request;
pub mod result;
pub mod store;
#[cfg(test)]
mod test_utils;

pub use crate::adapter::EntityAdapter;
pub use crate::assembler::KeysetPager;
pub use crate::codec::{CursorCodec, CursorPayload, decode_cursor, encode_cursor};
pub use crate::config::PagerConfig;
pub use crate::error::{PagerError, StoreError};
pub use crate::filter::{Collation, Filter, SortKey, SqlValue};
pub use crate::offset::{OffsetPage, OffsetPageInfo, OffsetWindow};
pub use crate::params::{PageParams, RawPageParams};
pub use crate::planner::{Comparison, KeysetBound, KeysetPlan, plan_page};
pub use crate::request::{Direction, PageRequest};
pub use crate::result::PageResult;
pub use crate::store::memory::MemoryStore;
pub use crate::store::{CountQuery, DataQuery, KeysetRow, PageStore, StoreQuery};
