use crate::config::PagerConfig;
use crate::filter::{Filter, SortKey};
use crate::params::PageParams;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Which way the caller is paging relative to the supplied cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

impl Direction {
    /// `"prev"` pages backward; every other value pages forward.
    pub fn parse(value: &str) -> Self {
        if value == "prev" {
            Self::Prev
        } else {
            Self::Next
        }
    }
}

impl From<&str> for Direction {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// One page request against a filtered, keyset-ordered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub filter: Filter,
    pub sort_key: SortKey,
    /// Requested page size; clamped into `[1, max_limit]` when the page is fetched.
    /// `None` takes the pager's configured default.
    pub limit: Option<usize>,
    /// Opaque token from a previous page, if any.
    pub cursor: Option<String>,
    pub direction: Direction,
    /// Serve the tail of the listing, ignoring `cursor`.
    pub last_page: bool,
    /// Run the count query before the data query.
    pub want_total: bool,
}

impl PageRequest {
    /// A first-page forward request with a total count. The page size is left
    /// to the pager's configured default.
    pub fn new(filter: Filter, sort_key: SortKey) -> Self {
        Self {
            filter,
            sort_key,
            limit: None,
            cursor: None,
            direction: Direction::Next,
            last_page: false,
            want_total: true,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_last_page(mut self, last_page: bool) -> Self {
        self.last_page = last_page;
        self
    }

    pub fn with_total(mut self, want_total: bool) -> Self {
        self.want_total = want_total;
        self
    }

    /// Applies paging inputs parsed from a client query string.
    pub fn with_params(mut self, params: PageParams) -> Self {
        self.limit = Some(params.limit);
        self.cursor = params.cursor;
        self.direction = params.direction;
        self.last_page = params.last_page;
        self
    }

    /// Same request with the limit resolved against `config` and clamped, and
    /// a blank cursor dropped.
    pub fn normalized(&self, config: &PagerConfig) -> Self {
        let mut normalized = self.clone();
        normalized.limit = Some(self.effective_limit(config));
        normalized.cursor = self
            .cursor
            .as_deref()
            .map(str::trim)
            .filter(|cursor| !cursor.is_empty())
            .map(str::to_string);
        normalized
    }

    /// The page size this request is served with under `config`.
    pub fn effective_limit(&self, config: &PagerConfig) -> usize {
        clamp_limit(
            self.limit.unwrap_or(config.default_limit),
            config.effective_max_limit(),
        )
    }

    /// Stable key for this exact request, suitable for an external result cache.
    ///
    /// Call it on a [`normalized`](Self::normalized) request so that inputs
    /// which page identically share a key.
    pub fn signature(&self) -> Result<String, serde_json::Error> {
        let serialized = serde_json::to_string(self)?;
        let mut hasher = Sha256::new();
        hasher.update(serialized.as_bytes());
        let hash = format!("{:x}", hasher.finalize());
        Ok(format!("keyset:{}", &hash[..16]))
    }
}

pub(crate) fn clamp_limit(limit: usize, max_limit: usize) -> usize {
    limit.clamp(1, max_limit.max(1))
}
