//! LIMIT/OFFSET pagination metadata.
//!
//! Some listings page by numeric offset instead of by keyset. Their tokens
//! carry `{offset, total}` and their `total` is always a counted value. This
//! module has nothing to do with [`KeysetPager`](crate::KeysetPager) and the
//! two kinds of token are not interchangeable.

use crate::codec::CursorCodec;
use crate::params::PageParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct OffsetToken {
    offset: u64,
    total: u64,
}

/// The rows to read for one offset page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetWindow {
    pub limit: usize,
    pub offset: u64,
}

impl OffsetWindow {
    /// Reads the window from parsed params.
    ///
    /// Without a cursor the window starts at 0. A last-page request jumps to
    /// the start of the final page of the total carried by the cursor.
    pub fn from_params(params: &PageParams, codec: &CursorCodec) -> Self {
        let limit = params.limit.max(1);
        let Some(cursor) = params.cursor.as_deref() else {
            return Self { limit, offset: 0 };
        };

        let token: OffsetToken = codec.decode_token(cursor).unwrap_or_default();
        let offset = if params.last_page {
            let limit = limit as u64;
            let pages = token.total.div_ceil(limit).max(1);
            (pages - 1) * limit
        } else {
            token.offset
        };

        Self { limit, offset }
    }
}

/// Navigation state of an offset page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPageInfo {
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_cursor: Option<String>,
    pub next_cursor: Option<String>,
}

impl OffsetPageInfo {
    pub fn build(
        codec: &CursorCodec,
        limit: usize,
        offset: u64,
        total: u64,
        data_len: usize,
    ) -> Self {
        let limit = limit.max(1) as u64;
        let has_prev = offset > 0;
        let has_next = offset.saturating_add(data_len as u64) < total;

        let token = |offset| codec.encode_token(&OffsetToken { offset, total });

        Self {
            has_prev,
            has_next,
            prev_cursor: if has_prev {
                token(offset.saturating_sub(limit))
            } else {
                None
            },
            next_cursor: if has_next {
                token(offset.saturating_add(limit))
            } else {
                None
            },
        }
    }
}

/// A page read by offset, with the window it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPage<R> {
    pub data: Vec<R>,
    pub total: u64,
    pub limit: usize,
    pub offset: u64,
    pub page_info: OffsetPageInfo,
}

impl<R> OffsetPage<R> {
    pub fn new(codec: &CursorCodec, window: OffsetWindow, data: Vec<R>, total: u64) -> Self {
        let page_info = OffsetPageInfo::build(codec, window.limit, window.offset, total, data.len());
        Self {
            data,
            total,
            limit: window.limit,
            offset: window.offset,
            page_info,
        }
    }
}
