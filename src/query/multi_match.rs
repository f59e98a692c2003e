//! Multi-field match query.

use crate::error::{PikeError, Result};
use crate::query::query::require_field;

/// A full-text query run against several fields.
///
/// The text is analyzed per field by the backend: analyzed fields split it into
/// tokens, keyword fields match it whole.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMatchQuery {
    /// The query text.
    text: String,
    /// Fields to search, in insertion order.
    fields: Vec<String>,
}

impl MultiMatchQuery {
    /// Create a new multi-match query. At least one field is required.
    pub fn new<T, I, S>(text: T, fields: I) -> Result<Self>
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut query = MultiMatchQuery {
            text: text.into(),
            fields: Vec::new(),
        };
        for field in fields {
            query = query.push_field(field.into())?;
        }
        if query.fields.is_empty() {
            return Err(PikeError::invalid_expression(
                "multi_match query needs at least one field",
            ));
        }

        Ok(query)
    }

    /// Return a copy of this query searching one more field.
    pub fn with_field<S: Into<String>>(self, field: S) -> Result<Self> {
        self.push_field(field.into())
    }

    fn push_field(mut self, field: String) -> Result<Self> {
        require_field("multi_match", &field)?;
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        Ok(self)
    }

    /// Get the query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the searched fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
