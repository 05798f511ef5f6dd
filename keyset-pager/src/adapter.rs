use crate::filter::{Filter, SortKey};
use crate::request::PageRequest;
use crate::store::KeysetRow;

/// Supplies the entity-specific half of a listing: which rows match and how
/// they are ordered.
///
/// Adapters own all table and search logic. The engine only ever sees the
/// filter, the sort key and the two sort-key fields of each returned row.
pub trait EntityAdapter {
    type Row: KeysetRow;

    /// Predicate and parameters scoped to the adapter's entity and the
    /// user's search constraints.
    fn filter(&self) -> Filter;

    /// The `(natural, id)` ordering of the listing.
    fn sort_key(&self) -> SortKey;

    /// A first-page request for this listing.
    fn request(&self) -> PageRequest {
        PageRequest::new(self.filter(), self.sort_key())
    }
}
