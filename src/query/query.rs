//! The query expression tree.

use crate::error::{PikeError, Result};
use crate::query::{
    BoolQuery, BoolQueryBuilder, Bound, ExistsQuery, FieldValue, IdsQuery, MultiMatchQuery, Occur,
    PrefixQuery, RangeQuery, TermQuery, WildcardQuery,
};

/// A query expression.
///
/// Expressions are plain values: they hold no reference to an index or a
/// connection and know nothing about the wire format. Every constructor
/// validates its own invariant and fails with
/// [`PikeError::InvalidExpression`].
///
/// ```
/// use pike::query::{QueryExpr, RangeQuery};
///
/// let query: QueryExpr = QueryExpr::bool()
///     .must(QueryExpr::term("desc", "浣熊")?)
///     .filter(RangeQuery::builder("price").gte(0).lte(1.5).build()?)
///     .into();
/// assert_eq!(query.kind(), "bool");
/// # Ok::<(), pike::error::PikeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryExpr {
    /// Matches every document.
    #[default]
    MatchAll,
    /// Exact value match.
    Term(TermQuery),
    /// Value range.
    Range(RangeQuery),
    /// Term prefix.
    Prefix(PrefixQuery),
    /// Wildcard pattern.
    Wildcard(WildcardQuery),
    /// Document identifiers.
    Ids(IdsQuery),
    /// Full-text match across several fields.
    MultiMatch(MultiMatchQuery),
    /// Field presence.
    Exists(ExistsQuery),
    /// Compound boolean query.
    Bool(BoolQuery),
}

impl QueryExpr {
    /// Match every document.
    pub fn match_all() -> Self {
        QueryExpr::MatchAll
    }

    /// Exact value match on a field.
    pub fn term<F, V>(field: F, value: V) -> Result<Self>
    where
        F: Into<String>,
        V: Into<FieldValue>,
    {
        Ok(QueryExpr::Term(TermQuery::new(field, value)?))
    }

    /// Range with explicit bounds.
    pub fn range<F: Into<String>>(
        field: F,
        lower: Bound<FieldValue>,
        upper: Bound<FieldValue>,
    ) -> Result<Self> {
        Ok(QueryExpr::Range(RangeQuery::new(field, lower, upper)?))
    }

    /// Term prefix match.
    pub fn prefix<F, V>(field: F, value: V) -> Result<Self>
    where
        F: Into<String>,
        V: Into<String>,
    {
        Ok(QueryExpr::Prefix(PrefixQuery::new(field, value)?))
    }

    /// Wildcard pattern match.
    pub fn wildcard<F, P>(field: F, pattern: P) -> Result<Self>
    where
        F: Into<String>,
        P: Into<String>,
    {
        Ok(QueryExpr::Wildcard(WildcardQuery::new(field, pattern)?))
    }

    /// Match documents by id.
    pub fn ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(QueryExpr::Ids(IdsQuery::new(ids)?))
    }

    /// Full-text match across fields.
    pub fn multi_match<T, I, S>(text: T, fields: I) -> Result<Self>
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(QueryExpr::MultiMatch(MultiMatchQuery::new(text, fields)?))
    }

    /// Field presence.
    pub fn exists<F: Into<String>>(field: F) -> Result<Self> {
        Ok(QueryExpr::Exists(ExistsQuery::new(field)?))
    }

    /// Start a boolean query.
    pub fn bool() -> BoolQueryBuilder {
        BoolQuery::builder()
    }

    /// Short name of the expression kind.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryExpr::MatchAll => "match_all",
            QueryExpr::Term(_) => "term",
            QueryExpr::Range(_) => "range",
            QueryExpr::Prefix(_) => "prefix",
            QueryExpr::Wildcard(_) => "wildcard",
            QueryExpr::Ids(_) => "ids",
            QueryExpr::MultiMatch(_) => "multi_match",
            QueryExpr::Exists(_) => "exists",
            QueryExpr::Bool(_) => "bool",
        }
    }

    /// Number of leaf clauses in this tree.
    pub fn clause_count(&self) -> usize {
        match self {
            QueryExpr::Bool(query) => Occur::ALL
                .iter()
                .flat_map(|occur| query.clauses(*occur))
                .map(QueryExpr::clause_count)
                .sum(),
            _ => 1,
        }
    }

    /// Depth of the tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            QueryExpr::Bool(query) => {
                1 + Occur::ALL
                    .iter()
                    .flat_map(|occur| query.clauses(*occur))
                    .map(QueryExpr::depth)
                    .max()
                    .unwrap_or(0)
            }
            _ => 1,
        }
    }
}

macro_rules! impl_from_query {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for QueryExpr {
                fn from(query: $ty) -> Self {
                    QueryExpr::$variant(query)
                }
            }
        )*
    };
}

impl_from_query!(
    TermQuery => Term,
    RangeQuery => Range,
    PrefixQuery => Prefix,
    WildcardQuery => Wildcard,
    IdsQuery => Ids,
    MultiMatchQuery => MultiMatch,
    ExistsQuery => Exists,
    BoolQuery => Bool,
);

impl From<BoolQueryBuilder> for QueryExpr {
    fn from(builder: BoolQueryBuilder) -> Self {
        QueryExpr::Bool(builder.build())
    }
}

/// Reject empty field names.
pub(crate) fn require_field(kind: &str, field: &str) -> Result<()> {
    if field.is_empty() {
        return Err(PikeError::invalid_expression(format!(
            "{kind} query needs a field name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_match_all() {
        assert_eq!(QueryExpr::default(), QueryExpr::MatchAll);
        assert_eq!(QueryExpr::match_all().kind(), "match_all");
    }

    #[test]
    fn test_constructors_validate() {
        assert!(matches!(
            QueryExpr::term("", "x"),
            Err(PikeError::InvalidExpression(_))
        ));
        assert!(matches!(
            QueryExpr::range("price", Bound::Unbounded, Bound::Unbounded),
            Err(PikeError::InvalidExpression(_))
        ));
        assert!(matches!(
            QueryExpr::multi_match("text", Vec::<String>::new()),
            Err(PikeError::InvalidExpression(_))
        ));
        assert!(QueryExpr::exists("title").is_ok());
    }

    #[test]
    fn test_clause_count_and_depth() {
        let query: QueryExpr = QueryExpr::bool()
            .must(QueryExpr::term("desc", "浣熊").unwrap())
            .filter(
                QueryExpr::bool()
                    .should(QueryExpr::prefix("desc", "小").unwrap())
                    .should(QueryExpr::exists("title").unwrap()),
            )
            .into();

        assert_eq!(query.clause_count(), 3);
        assert_eq!(query.depth(), 3);
        assert_eq!(QueryExpr::MatchAll.depth(), 1);
    }
}
