//! Boolean query implementation for combining multiple queries.

use crate::query::QueryExpr;

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occur {
    /// The clause must match and contributes to the score (AND).
    Must,
    /// The clause must match but is evaluated in filter context (no scoring).
    Filter,
    /// The clause should match (OR).
    Should,
    /// The clause must not match (NOT).
    MustNot,
}

impl Occur {
    /// All occurrence kinds in rendering order.
    pub const ALL: [Occur; 4] = [Occur::Must, Occur::Filter, Occur::Should, Occur::MustNot];
}

/// A boolean query that combines multiple queries with boolean logic.
///
/// Instances are immutable; use [`BoolQuery::builder`] to assemble one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    must: Vec<QueryExpr>,
    filter: Vec<QueryExpr>,
    should: Vec<QueryExpr>,
    must_not: Vec<QueryExpr>,
}

impl BoolQuery {
    /// Start building a boolean query.
    pub fn builder() -> BoolQueryBuilder {
        BoolQueryBuilder::default()
    }

    /// Get the clauses for one occurrence kind, in insertion order.
    pub fn clauses(&self, occur: Occur) -> &[QueryExpr] {
        match occur {
            Occur::Must => &self.must,
            Occur::Filter => &self.filter,
            Occur::Should => &self.should,
            Occur::MustNot => &self.must_not,
        }
    }

    /// Scored clauses that must match.
    pub fn must(&self) -> &[QueryExpr] {
        &self.must
    }

    /// Unscored clauses that must match.
    pub fn filter(&self) -> &[QueryExpr] {
        &self.filter
    }

    /// Clauses that should match.
    pub fn should(&self) -> &[QueryExpr] {
        &self.should
    }

    /// Clauses that must not match.
    pub fn must_not(&self) -> &[QueryExpr] {
        &self.must_not
    }

    /// Check if this query has no clauses at all (matches every document).
    pub fn is_empty(&self) -> bool {
        Occur::ALL.iter().all(|occur| self.clauses(*occur).is_empty())
    }

    /// Total number of direct clauses.
    pub fn len(&self) -> usize {
        Occur::ALL.iter().map(|occur| self.clauses(*occur).len()).sum()
    }

    /// True if every clause is a `must` clause.
    fn is_must_only(&self) -> bool {
        !self.must.is_empty()
            && self.filter.is_empty()
            && self.should.is_empty()
            && self.must_not.is_empty()
    }
}

/// Builder for [`BoolQuery`].
///
/// Adding a boolean query that holds only `must` clauses as a `must` clause
/// splices its clauses in place, so nested conjunctions stay flat.
#[derive(Debug, Clone, Default)]
pub struct BoolQueryBuilder {
    query: BoolQuery,
}

impl BoolQueryBuilder {
    /// Add a clause with the given occurrence.
    pub fn clause<Q: Into<QueryExpr>>(mut self, occur: Occur, query: Q) -> Self {
        let query = query.into();
        match (occur, query) {
            (Occur::Must, QueryExpr::Bool(nested)) if nested.is_must_only() => {
                self.query.must.extend(nested.must);
            }
            (Occur::Must, query) => self.query.must.push(query),
            (Occur::Filter, query) => self.query.filter.push(query),
            (Occur::Should, query) => self.query.should.push(query),
            (Occur::MustNot, query) => self.query.must_not.push(query),
        }
        self
    }

    /// Add a MUST clause.
    pub fn must<Q: Into<QueryExpr>>(self, query: Q) -> Self {
        self.clause(Occur::Must, query)
    }

    /// Add a FILTER clause.
    pub fn filter<Q: Into<QueryExpr>>(self, query: Q) -> Self {
        self.clause(Occur::Filter, query)
    }

    /// Add a SHOULD clause.
    pub fn should<Q: Into<QueryExpr>>(self, query: Q) -> Self {
        self.clause(Occur::Should, query)
    }

    /// Add a MUST_NOT clause.
    pub fn must_not<Q: Into<QueryExpr>>(self, query: Q) -> Self {
        self.clause(Occur::MustNot, query)
    }

    /// Finish the boolean query.
    pub fn build(self) -> BoolQuery {
        self.query
    }
}
