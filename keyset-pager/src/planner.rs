//! Keyset query planning.
//!
//! Turns paging inputs into a scan direction, an optional tuple bound and an
//! overfetched row limit, and renders those into SQL clauses. The caller's
//! filter is carried through untouched.

use crate::codec::CursorPayload;
use crate::filter::{Filter, SortKey, SqlValue};
use crate::request::Direction;
use crate::store::StoreQuery;
use std::cmp::Ordering;

/// Strict tuple comparison against the boundary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `(natural, id) > (cursor.natural, cursor.id)`
    After,
    /// `(natural, id) < (cursor.natural, cursor.id)`
    Before,
}

impl Comparison {
    pub fn operator(self) -> &'static str {
        match self {
            Self::After => ">",
            Self::Before => "<",
        }
    }

    /// Whether a row that compares `ordering` to the boundary passes the bound.
    pub fn admits(self, ordering: Ordering) -> bool {
        match self {
            Self::After => ordering == Ordering::Greater,
            Self::Before => ordering == Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetBound {
    pub comparison: Comparison,
    pub payload: CursorPayload,
}

/// Everything the data query needs besides the caller's filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetPlan {
    /// Rows the caller will receive at most.
    pub limit: usize,
    /// Rows to ask the store for; one more than `limit`.
    pub fetch_limit: usize,
    /// Scan from the tail of the ordering.
    pub descending: bool,
    pub bound: Option<KeysetBound>,
}

/// Plans the data query for an already clamped `limit`.
///
/// A last-page request scans from the tail and ignores `cursor`. Otherwise a
/// decoded cursor always yields a bound, even when its fields are zero values.
pub fn plan_page(
    limit: usize,
    direction: Direction,
    last_page: bool,
    cursor: Option<&CursorPayload>,
) -> KeysetPlan {
    let descending = last_page || direction == Direction::Prev;

    let bound = match cursor {
        Some(payload) if !last_page => Some(KeysetBound {
            comparison: if descending {
                Comparison::Before
            } else {
                Comparison::After
            },
            payload: payload.clone(),
        }),
        _ => None,
    };

    KeysetPlan {
        limit,
        fetch_limit: limit.saturating_add(1),
        descending,
        bound,
    }
}

/// Renders the count clause: the caller's filter and nothing else.
pub fn count_clause(filter: &Filter) -> StoreQuery {
    let clause = if filter.is_empty() {
        String::new()
    } else {
        format!("WHERE ({})", filter.predicate.trim())
    };

    StoreQuery {
        clause,
        params: filter.params.clone(),
    }
}

impl KeysetPlan {
    /// Renders `WHERE ... ORDER BY ... LIMIT ...` for the data query.
    ///
    /// Placeholders continue numbering after the filter's own parameters.
    pub fn data_clause(&self, filter: &Filter, sort_key: &SortKey) -> StoreQuery {
        let mut params = filter.params.clone();
        let mut conditions = Vec::new();

        if !filter.is_empty() {
            conditions.push(format!("({})", filter.predicate.trim()));
        }

        let natural = sort_key.natural_expr();
        if let Some(bound) = &self.bound {
            let natural_idx = params.len() + 1;
            let id_idx = natural_idx + 1;
            conditions.push(format!(
                "({natural}, {id}) {op} ({cursor_natural}, ${id_idx})",
                id = sort_key.id(),
                op = bound.comparison.operator(),
                cursor_natural = sort_key.collate(&format!("${natural_idx}")),
            ));
            params.push(SqlValue::Text(bound.payload.natural.clone()));
            params.push(SqlValue::Integer(bound.payload.id));
        }

        let order = if self.descending { "DESC" } else { "ASC" };
        let limit_idx = params.len() + 1;
        params.push(SqlValue::Integer(
            i64::try_from(self.fetch_limit).unwrap_or(i64::MAX),
        ));

        let mut clause = String::new();
        if !conditions.is_empty() {
            clause.push_str("WHERE ");
            clause.push_str(&conditions.join(" AND "));
            clause.push(' ');
        }
        clause.push_str(&format!(
            "ORDER BY {natural} {order}, {id} {order} LIMIT ${limit_idx}",
            id = sort_key.id(),
        ));

        StoreQuery { clause, params }
    }
}
