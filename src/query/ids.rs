//! Ids query.

use crate::error::{PikeError, Result};

/// A query that matches documents by their identifiers.
///
/// Ids keep the order in which they were first added; duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdsQuery {
    ids: Vec<String>,
}

impl IdsQuery {
    /// Create an ids query from a list of identifiers.
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IdsQuery::default().with_ids(ids)
    }

    /// Return a copy of this query with more identifiers added.
    pub fn with_ids<I, S>(mut self, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if id.is_empty() {
                return Err(PikeError::invalid_expression(
                    "ids query cannot contain an empty id",
                ));
            }
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
        Ok(self)
    }

    /// Get the identifiers.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// An ids query without identifiers matches nothing.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
