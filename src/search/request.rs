//! Search requests.

use std::collections::HashSet;

use crate::aggregation::AggregationSpec;
use crate::error::{PikeError, Result};
use crate::query::QueryExpr;
use crate::search::{HighlightSpec, SortSpec, SourceFilter};

/// A complete search request.
///
/// Built with [`SearchRequest::builder`]; immutable afterwards.
///
/// ```
/// use pike::query::QueryExpr;
/// use pike::search::{SearchRequest, SortSpec};
///
/// let request = SearchRequest::builder("product")
///     .query(QueryExpr::term("desc", "浣熊")?)
///     .from(0)
///     .size(20)
///     .sort(SortSpec::desc("price")?)
///     .build()?;
/// assert_eq!(request.target(), "product");
/// # Ok::<(), pike::error::PikeError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    indices: Vec<String>,
    query: QueryExpr,
    post_filter: Option<QueryExpr>,
    from: Option<usize>,
    size: Option<usize>,
    sort: Vec<SortSpec>,
    source: Option<SourceFilter>,
    highlight: Option<HighlightSpec>,
    aggregations: Vec<AggregationSpec>,
    track_total_hits: Option<bool>,
}

impl SearchRequest {
    /// Start a request against one index.
    pub fn builder<S: Into<String>>(index: S) -> SearchRequestBuilder {
        SearchRequestBuilder::new().index(index)
    }

    /// Indices searched by this request.
    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    /// The index list joined into a single target expression.
    pub fn target(&self) -> String {
        self.indices.join(",")
    }

    /// The scored query.
    pub fn query(&self) -> &QueryExpr {
        &self.query
    }

    /// The unscored post filter, if any.
    pub fn post_filter(&self) -> Option<&QueryExpr> {
        self.post_filter.as_ref()
    }

    /// Zero-based offset of the first hit.
    pub fn from(&self) -> Option<usize> {
        self.from
    }

    /// Maximum number of hits returned.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Sort specifications in priority order.
    pub fn sort(&self) -> &[SortSpec] {
        &self.sort
    }

    /// Source filter, if any.
    pub fn source(&self) -> Option<&SourceFilter> {
        self.source.as_ref()
    }

    /// Highlight settings, if any.
    pub fn highlight(&self) -> Option<&HighlightSpec> {
        self.highlight.as_ref()
    }

    /// Aggregations in request order.
    pub fn aggregations(&self) -> &[AggregationSpec] {
        &self.aggregations
    }

    /// Whether the backend should count every matching hit.
    pub fn track_total_hits(&self) -> Option<bool> {
        self.track_total_hits
    }
}

/// Builder for [`SearchRequest`].
#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    indices: Vec<String>,
    query: Option<QueryExpr>,
    post_filter: Option<QueryExpr>,
    from: Option<usize>,
    size: Option<usize>,
    sort: Vec<SortSpec>,
    source: Option<SourceFilter>,
    highlight: Option<HighlightSpec>,
    aggregations: Vec<AggregationSpec>,
    track_total_hits: Option<bool>,
}

impl SearchRequestBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search one more index.
    pub fn index<S: Into<String>>(mut self, index: S) -> Self {
        self.indices.push(index.into());
        self
    }

    /// Set the scored query. Defaults to match-all.
    pub fn query<Q: Into<QueryExpr>>(mut self, query: Q) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set a filter applied after the query, without affecting scores.
    pub fn post_filter<Q: Into<QueryExpr>>(mut self, filter: Q) -> Self {
        self.post_filter = Some(filter.into());
        self
    }

    /// Set the zero-based offset of the first hit.
    pub fn from(mut self, from: usize) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the maximum number of hits returned.
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Add a sort specification after the existing ones.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort.push(sort);
        self
    }

    /// Set the source filter.
    pub fn source(mut self, source: SourceFilter) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the highlight settings.
    pub fn highlight(mut self, highlight: HighlightSpec) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Add an aggregation.
    pub fn aggregation<A: Into<AggregationSpec>>(mut self, aggregation: A) -> Self {
        self.aggregations.push(aggregation.into());
        self
    }

    /// Ask the backend to count every matching hit, or to skip counting.
    pub fn track_total_hits(mut self, track: bool) -> Self {
        self.track_total_hits = Some(track);
        self
    }

    /// Validate and build the request.
    pub fn build(self) -> Result<SearchRequest> {
        if self.indices.is_empty() {
            return Err(PikeError::invalid_request("search needs at least one index"));
        }
        for index in &self.indices {
            validate_index_name(index)?;
        }

        {
            let mut names = HashSet::with_capacity(self.aggregations.len());
            for aggregation in &self.aggregations {
                if !names.insert(aggregation.name()) {
                    return Err(PikeError::invalid_request(format!(
                        "aggregation name '{}' is used more than once",
                        aggregation.name()
                    )));
                }
            }
        }

        Ok(SearchRequest {
            indices: self.indices,
            query: self.query.unwrap_or_default(),
            post_filter: self.post_filter,
            from: self.from,
            size: self.size,
            sort: self.sort,
            source: self.source,
            highlight: self.highlight,
            aggregations: self.aggregations,
            track_total_hits: self.track_total_hits,
        })
    }
}

/// Reject index names the backend cannot address in a single path segment list.
pub(crate) fn validate_index_name(index: &str) -> Result<()> {
    if index.is_empty() {
        return Err(PikeError::invalid_request("index name cannot be empty"));
    }
    if index.contains([',', '/', ' ']) {
        return Err(PikeError::invalid_request(format!(
            "index name '{index}' contains a reserved character"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = SearchRequest::builder("product").build().unwrap();
        assert_eq!(request.query(), &QueryExpr::MatchAll);
        assert_eq!(request.post_filter(), None);
        assert_eq!(request.from(), None);
        assert_eq!(request.size(), None);
        assert!(request.sort().is_empty());
        assert!(request.aggregations().is_empty());
    }

    #[test]
    fn test_multiple_indices() {
        let request = SearchRequest::builder("product")
            .index("fruit")
            .build()
            .unwrap();
        assert_eq!(request.target(), "product,fruit");
    }

    #[test]
    fn test_duplicate_aggregation_names() {
        let err = SearchRequest::builder("fruit")
            .aggregation(AggregationSpec::avg("price", "price").unwrap())
            .aggregation(AggregationSpec::terms("price", "price").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, PikeError::InvalidRequest(_)));
    }

    #[test]
    fn test_index_names() {
        assert!(SearchRequestBuilder::new().build().is_err());
        assert!(SearchRequest::builder("").build().is_err());
        assert!(SearchRequest::builder("a,b").build().is_err());
    }
}
