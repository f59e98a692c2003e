//! Term query for exact value matching.

use crate::error::Result;
use crate::query::FieldValue;
use crate::query::query::require_field;

/// A query that matches documents whose field holds exactly the given value.
///
/// Like Lucene, a term query does NOT analyze the value. For analyzed text
/// fields the value must already be in its indexed form (a single token).
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    /// The field to search in.
    field: String,
    /// The value to search for.
    value: FieldValue,
}

impl TermQuery {
    /// Create a new term query.
    pub fn new<F, V>(field: F, value: V) -> Result<Self>
    where
        F: Into<String>,
        V: Into<FieldValue>,
    {
        let field = field.into();
        require_field("term", &field)?;

        Ok(TermQuery {
            field,
            value: value.into(),
        })
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}
