use crate::error::PagerError;
use serde::{Deserialize, Serialize};

/// A bound query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl SqlValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A caller-owned filter: predicate text using `$1..$n` placeholders and the
/// parameters bound to them, in order.
///
/// The engine never looks inside the predicate. It only wraps it and appends
/// its own parameters after the caller's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub predicate: String,
    pub params: Vec<SqlValue>,
}

impl Filter {
    /// A filter that matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(predicate: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            predicate: predicate.into(),
            params,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicate.trim().is_empty()
    }
}

/// How the natural field is compared and ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collation {
    #[default]
    Binary,
    CaseInsensitive,
    /// A store-side collation name, e.g. `"id-x-icu"`.
    Named(String),
}

/// The two-column sort key: a natural ordering column followed by a unique
/// integer id column. Together they give every row a distinct position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    natural: String,
    id: String,
    collation: Collation,
}

impl SortKey {
    pub fn new(natural: impl Into<String>, id: impl Into<String>) -> Result<Self, PagerError> {
        let natural = natural.into();
        let id = id.into();
        validate_identifier(&natural)?;
        validate_identifier(&id)?;
        Ok(Self {
            natural,
            id,
            collation: Collation::Binary,
        })
    }

    pub fn with_collation(mut self, collation: Collation) -> Result<Self, PagerError> {
        if let Collation::Named(name) = &collation
            && (name.is_empty() || name.contains('"'))
        {
            return Err(PagerError::InvalidIdentifier(format!("collation {name:?}")));
        }
        self.collation = collation;
        Ok(self)
    }

    pub fn natural(&self) -> &str {
        &self.natural
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn collation(&self) -> &Collation {
        &self.collation
    }

    /// SQL expression for the natural column, collation applied.
    pub(crate) fn natural_expr(&self) -> String {
        self.collate(&self.natural)
    }

    /// Applies the collation to an arbitrary SQL operand (column or placeholder).
    pub(crate) fn collate(&self, operand: &str) -> String {
        match &self.collation {
            Collation::Binary => operand.to_string(),
            Collation::CaseInsensitive => format!("LOWER({operand})"),
            Collation::Named(name) => format!("{operand} COLLATE \"{name}\""),
        }
    }
}

/// Accepts `[A-Za-z_][A-Za-z0-9_.]*`: plain and table-qualified column names.
fn validate_identifier(name: &str) -> Result<(), PagerError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(PagerError::InvalidIdentifier(name.to_string()))
    }
}
