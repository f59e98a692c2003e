//! Prefix query.

use crate::error::{PikeError, Result};
use crate::query::query::require_field;

/// A query that matches documents containing a term starting with a prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixQuery {
    field: String,
    value: String,
}

impl PrefixQuery {
    /// Create a new prefix query. The prefix must not be empty.
    pub fn new<F, V>(field: F, value: V) -> Result<Self>
    where
        F: Into<String>,
        V: Into<String>,
    {
        let field = field.into();
        let value = value.into();
        require_field("prefix", &field)?;
        if value.is_empty() {
            return Err(PikeError::invalid_expression(format!(
                "prefix query on '{field}' needs a non-empty prefix"
            )));
        }

        Ok(PrefixQuery { field, value })
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the prefix.
    pub fn value(&self) -> &str {
        &self.value
    }
}
