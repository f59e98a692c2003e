//! Range query implementation for querying within value ranges.

use crate::error::{PikeError, Result};
use crate::query::FieldValue;
use crate::query::query::require_field;

/// Bound type for range queries.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound<T> {
    /// Inclusive bound.
    Included(T),
    /// Exclusive bound.
    Excluded(T),
    /// Unbounded (no limit).
    Unbounded,
}

impl<T> Bound<T> {
    /// Check whether this bound places no limit.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }

    /// Get the bound value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Bound::Included(v) | Bound::Excluded(v) => Some(v),
            Bound::Unbounded => None,
        }
    }

    /// Check whether the bound includes its value.
    pub fn is_inclusive(&self) -> bool {
        matches!(self, Bound::Included(_))
    }
}

/// A query that matches documents with field values within a specified range.
///
/// At least one of the two bounds must be set.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    /// The field to search in.
    field: String,
    /// Lower bound of the range.
    lower_bound: Bound<FieldValue>,
    /// Upper bound of the range.
    upper_bound: Bound<FieldValue>,
}

impl RangeQuery {
    /// Create a range query with custom bound types.
    pub fn new<S: Into<String>>(
        field: S,
        lower_bound: Bound<FieldValue>,
        upper_bound: Bound<FieldValue>,
    ) -> Result<Self> {
        let field = field.into();
        require_field("range", &field)?;
        if lower_bound.is_unbounded() && upper_bound.is_unbounded() {
            return Err(PikeError::invalid_expression(format!(
                "range query on '{field}' needs at least one bound"
            )));
        }

        Ok(RangeQuery {
            field,
            lower_bound,
            upper_bound,
        })
    }

    /// Create a range query with both bounds inclusive.
    pub fn between<S, L, U>(field: S, lower: L, upper: U) -> Result<Self>
    where
        S: Into<String>,
        L: Into<FieldValue>,
        U: Into<FieldValue>,
    {
        Self::new(
            field,
            Bound::Included(lower.into()),
            Bound::Included(upper.into()),
        )
    }

    /// Start a fluent range query on a field.
    ///
    /// ```
    /// use pike::query::RangeQuery;
    ///
    /// let range = RangeQuery::builder("price").gte(0).lte(10).build().unwrap();
    /// assert_eq!(range.field(), "price");
    /// ```
    pub fn builder<S: Into<String>>(field: S) -> RangeQueryBuilder {
        RangeQueryBuilder {
            field: field.into(),
            lower_bound: Bound::Unbounded,
            upper_bound: Bound::Unbounded,
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the lower bound.
    pub fn lower_bound(&self) -> &Bound<FieldValue> {
        &self.lower_bound
    }

    /// Get the upper bound.
    pub fn upper_bound(&self) -> &Bound<FieldValue> {
        &self.upper_bound
    }
}

/// Builder for [`RangeQuery`]. Setting a bound twice keeps the last one.
#[derive(Debug, Clone)]
pub struct RangeQueryBuilder {
    field: String,
    lower_bound: Bound<FieldValue>,
    upper_bound: Bound<FieldValue>,
}

impl RangeQueryBuilder {
    /// Values greater than or equal to `value`.
    pub fn gte<V: Into<FieldValue>>(mut self, value: V) -> Self {
        self.lower_bound = Bound::Included(value.into());
        self
    }

    /// Values strictly greater than `value`.
    pub fn gt<V: Into<FieldValue>>(mut self, value: V) -> Self {
        self.lower_bound = Bound::Excluded(value.into());
        self
    }

    /// Values less than or equal to `value`.
    pub fn lte<V: Into<FieldValue>>(mut self, value: V) -> Self {
        self.upper_bound = Bound::Included(value.into());
        self
    }

    /// Values strictly less than `value`.
    pub fn lt<V: Into<FieldValue>>(mut self, value: V) -> Self {
        self.upper_bound = Bound::Excluded(value.into());
        self
    }

    /// Validate and build the range query.
    pub fn build(self) -> Result<RangeQuery> {
        RangeQuery::new(self.field, self.lower_bound, self.upper_bound)
    }
}
