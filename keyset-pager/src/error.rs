use thiserror::Error;

/// Errors raised while setting up paging inputs.
///
/// Malformed client input (bad cursor, out-of-range limit, unknown direction)
/// never ends up here; it is normalised instead.
#[derive(Error, Debug)]
pub enum PagerError {
    #[error("Invalid sort key identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),
}

/// Errors a store backend can report while running count or data queries.
///
/// Backends are free to use their own error type through
/// [`PageStore::Error`](crate::store::PageStore::Error); this one covers the
/// common cases for backends that don't have one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query timed out: {0}")]
    Timeout(String),
}
