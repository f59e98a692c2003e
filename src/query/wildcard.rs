//! Wildcard query implementation for pattern matching.

use crate::error::{PikeError, Result};
use crate::query::query::require_field;

/// A query that matches documents containing terms that match a wildcard pattern.
///
/// The backend supports the following wildcards:
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
///
/// The pattern is passed through verbatim; it is not evaluated locally.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardQuery {
    /// The field to search in.
    field: String,
    /// The wildcard pattern.
    pattern: String,
}

impl WildcardQuery {
    /// Create a new wildcard query.
    pub fn new<F, P>(field: F, pattern: P) -> Result<Self>
    where
        F: Into<String>,
        P: Into<String>,
    {
        let field = field.into();
        let pattern = pattern.into();
        require_field("wildcard", &field)?;
        if pattern.is_empty() {
            return Err(PikeError::invalid_expression(format!(
                "wildcard query on '{field}' needs a non-empty pattern"
            )));
        }

        Ok(WildcardQuery { field, pattern })
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the wildcard pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Check whether the pattern contains any wildcard character.
    ///
    /// A pattern without wildcards behaves like a term query.
    pub fn has_wildcards(&self) -> bool {
        self.pattern.contains(['*', '?'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_query_creation() {
        let query = WildcardQuery::new("title", "小浣熊*").unwrap();
        assert_eq!(query.field(), "title");
        assert_eq!(query.pattern(), "小浣熊*");
        assert!(query.has_wildcards());

        let literal = WildcardQuery::new("title", "plain").unwrap();
        assert!(!literal.has_wildcards());
    }

    #[test]
    fn test_wildcard_query_rejects_empty_pattern() {
        assert!(WildcardQuery::new("title", "").is_err());
    }
}
