//! Exists query.

use crate::error::Result;
use crate::query::query::require_field;

/// A query that matches documents holding any indexed value for a field.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    /// Create a new exists query.
    pub fn new<S: Into<String>>(field: S) -> Result<Self> {
        let field = field.into();
        require_field("exists", &field)?;
        Ok(ExistsQuery { field })
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }
}
