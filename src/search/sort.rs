//! Sort specifications.

use std::fmt;
use std::str::FromStr;

use crate::error::{PikeError, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Lowercase name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = PikeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(PikeError::invalid_expression(format!(
                "unknown sort order '{other}'"
            ))),
        }
    }
}

/// Sort on one field.
///
/// Sorting on anything other than `_score` replaces relevance ordering; the
/// backend then reports no max score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    order: SortOrder,
}

impl SortSpec {
    /// Create a new sort specification.
    pub fn new<S: Into<String>>(field: S, order: SortOrder) -> Result<Self> {
        let field = field.into();
        if field.is_empty() {
            return Err(PikeError::invalid_expression("sort needs a field name"));
        }
        Ok(SortSpec { field, order })
    }

    /// Ascending sort on a field.
    pub fn asc<S: Into<String>>(field: S) -> Result<Self> {
        Self::new(field, SortOrder::Asc)
    }

    /// Descending sort on a field.
    pub fn desc<S: Into<String>>(field: S) -> Result<Self> {
        Self::new(field, SortOrder::Desc)
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the direction.
    pub fn order(&self) -> SortOrder {
        self.order
    }
}
