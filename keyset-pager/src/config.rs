use crate::codec::{CursorCodec, MAX_CURSOR_TOKEN_LEN};
use crate::error::PagerError;
use confique::Config;
use std::path::Path;

/// Page size used when the caller doesn't supply one.
pub const DEFAULT_LIMIT: usize = 100;

/// Largest page size a caller can ask for.
pub const MAX_LIMIT: usize = 200;

/// Paging limits shared by every listing.
#[derive(Debug, Config, Clone, PartialEq)]
pub struct PagerConfig {
    /// Page size when the request has no usable limit (default: 100)
    #[config(env = "PAGER_DEFAULT_LIMIT", default = 100)]
    pub default_limit: usize,

    /// Upper clamp for requested page sizes (default: 200)
    #[config(env = "PAGER_MAX_LIMIT", default = 200)]
    pub max_limit: usize,

    /// Cursor tokens longer than this are discarded unread (default: 65536)
    #[config(env = "PAGER_MAX_CURSOR_LEN", default = 65536)]
    pub max_cursor_len: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            max_cursor_len: MAX_CURSOR_TOKEN_LEN,
        }
    }
}

impl PagerConfig {
    /// Loads the configuration from the environment, then from an optional
    /// TOML file, then from defaults. Earlier sources win.
    pub fn load(path: Option<&Path>) -> Result<Self, PagerError> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// `max_limit`, never below 1.
    pub fn effective_max_limit(&self) -> usize {
        self.max_limit.max(1)
    }

    pub fn codec(&self) -> CursorCodec {
        CursorCodec::new(self.max_cursor_len)
    }
}
