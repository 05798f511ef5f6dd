use crate::config::PagerConfig;
use crate::request::{Direction, clamp_limit};
use serde::{Deserialize, Serialize};

/// Paging parameters exactly as a client sent them, e.g. from a query string.
///
/// Every field is kept as text so that malformed values can be normalised
/// instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageParams {
    pub limit: Option<String>,
    pub cursor: Option<String>,
    pub direction: Option<String>,
    pub last_page: Option<String>,
}

/// Normalised paging parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub limit: usize,
    pub cursor: Option<String>,
    pub direction: Direction,
    pub last_page: bool,
}

impl RawPageParams {
    /// Collects the paging keys from `(key, value)` pairs; other keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "limit" => raw.limit = Some(value.into()),
                "cursor" => raw.cursor = Some(value.into()),
                "direction" => raw.direction = Some(value.into()),
                "lastPage" => raw.last_page = Some(value.into()),
                _ => {}
            }
        }
        raw
    }

    /// Normalises the raw values:
    /// - `limit`: a missing, non-integer or zero value falls back to the
    ///   configured default; the result is clamped into `[1, max_limit]`
    /// - `cursor`: trimmed, blank becomes `None`
    /// - `direction`: `"prev"` or forward
    /// - `lastPage`: `"1"` or `"true"`
    pub fn parse(&self, config: &PagerConfig) -> PageParams {
        let limit = self
            .limit
            .as_deref()
            .and_then(|limit| limit.trim().parse::<i64>().ok())
            .filter(|limit| *limit != 0)
            .map(|limit| usize::try_from(limit).unwrap_or(1))
            .unwrap_or(config.default_limit);

        let cursor = self
            .cursor
            .as_deref()
            .map(str::trim)
            .filter(|cursor| !cursor.is_empty())
            .map(str::to_string);

        PageParams {
            limit: clamp_limit(limit, config.effective_max_limit()),
            cursor,
            direction: self
                .direction
                .as_deref()
                .map(Direction::parse)
                .unwrap_or_default(),
            last_page: matches!(self.last_page.as_deref(), Some("1") | Some("true")),
        }
    }
}
