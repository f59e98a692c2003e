//! JSON request files read by the CLI.
//!
//! A request file describes a [`SearchRequest`] in plain JSON:
//!
//! ```json
//! {
//!   "index": "product",
//!   "query": {"bool": {"must": [{"term": {"field": "desc", "value": "浣熊"}}]}},
//!   "post_filter": {"range": {"field": "price", "gte": 0, "lte": 10}},
//!   "from": 0,
//!   "size": 20,
//!   "sort": [{"field": "price", "order": "desc"}],
//!   "source": {"includes": ["title", "desc"]},
//!   "highlight": {"fields": ["desc"], "pre_tags": ["<em>"], "post_tags": ["</em>"]},
//!   "aggregations": [{"name": "price_group", "type": "terms", "field": "price"}]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::aggregation::{AggregationSpec, MetricKind, TermsAggregation};
use crate::error::{PikeError, Result};
use crate::query::{FieldValue, QueryExpr, RangeQuery};
use crate::search::{HighlightSpec, SearchRequest, SortOrder, SortSpec, SourceFilter};

/// One index or several.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IndexSpec {
    One(String),
    Many(Vec<String>),
}

/// Query clause as written in a request file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum QuerySpec {
    MatchAll {},
    Term {
        field: String,
        value: Value,
    },
    Range {
        field: String,
        gte: Option<Value>,
        gt: Option<Value>,
        lte: Option<Value>,
        lt: Option<Value>,
    },
    Prefix {
        field: String,
        value: String,
    },
    Wildcard {
        field: String,
        pattern: String,
    },
    Ids {
        values: Vec<String>,
    },
    MultiMatch {
        query: String,
        fields: Vec<String>,
    },
    Exists {
        field: String,
    },
    Bool {
        #[serde(default)]
        must: Vec<QuerySpec>,
        #[serde(default)]
        filter: Vec<QuerySpec>,
        #[serde(default)]
        should: Vec<QuerySpec>,
        #[serde(default)]
        must_not: Vec<QuerySpec>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortEntry {
    pub field: String,
    #[serde(default)]
    pub order: Option<String>,
}

/// `false` disables the source, an object filters it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    Enabled(bool),
    Filter(SourceFilterEntry),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFilterEntry {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighlightEntry {
    pub fields: Vec<String>,
    #[serde(default)]
    pub pre_tags: Vec<String>,
    #[serde(default)]
    pub post_tags: Vec<String>,
    pub require_field_match: Option<bool>,
    pub fragment_size: Option<usize>,
    pub number_of_fragments: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregationEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub field: String,
    pub size: Option<usize>,
}

/// A whole request file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestFile {
    pub index: IndexSpec,
    pub query: Option<QuerySpec>,
    pub post_filter: Option<QuerySpec>,
    pub from: Option<usize>,
    pub size: Option<usize>,
    #[serde(default)]
    pub sort: Vec<SortEntry>,
    pub source: Option<SourceSpec>,
    pub highlight: Option<HighlightEntry>,
    #[serde(default)]
    pub aggregations: Vec<AggregationEntry>,
    pub track_total_hits: Option<bool>,
}

impl RequestFile {
    /// Read and parse a request file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a request file from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the typed request, running every constructor's validation.
    pub fn into_request(self) -> Result<SearchRequest> {
        let indices = match self.index {
            IndexSpec::One(index) => vec![index],
            IndexSpec::Many(indices) => indices,
        };
        let mut indices = indices.into_iter();
        let first = indices
            .next()
            .ok_or_else(|| PikeError::invalid_request("request file names no index"))?;

        let mut builder = SearchRequest::builder(first);
        for index in indices {
            builder = builder.index(index);
        }
        if let Some(query) = self.query {
            builder = builder.query(query.into_expr()?);
        }
        if let Some(filter) = self.post_filter {
            builder = builder.post_filter(filter.into_expr()?);
        }
        if let Some(from) = self.from {
            builder = builder.from(from);
        }
        if let Some(size) = self.size {
            builder = builder.size(size);
        }
        for entry in self.sort {
            let order = match entry.order {
                Some(order) => order.parse::<SortOrder>()?,
                None => SortOrder::default(),
            };
            builder = builder.sort(SortSpec::new(entry.field, order)?);
        }
        if let Some(filter) = self.source.map(SourceSpec::into_filter).transpose()?.flatten() {
            builder = builder.source(filter);
        }
        if let Some(highlight) = self.highlight {
            builder = builder.highlight(highlight.into_spec()?);
        }
        for entry in self.aggregations {
            builder = builder.aggregation(entry.into_spec()?);
        }
        if let Some(track) = self.track_total_hits {
            builder = builder.track_total_hits(track);
        }
        builder.build()
    }
}

impl QuerySpec {
    /// Convert into a validated query expression.
    pub fn into_expr(self) -> Result<QueryExpr> {
        let expr = match self {
            QuerySpec::MatchAll {} => QueryExpr::match_all(),
            QuerySpec::Term { field, value } => QueryExpr::term(field, field_value(value)?)?,
            QuerySpec::Range {
                field,
                gte,
                gt,
                lte,
                lt,
            } => {
                if (gte.is_some() && gt.is_some()) || (lte.is_some() && lt.is_some()) {
                    return Err(PikeError::invalid_expression(format!(
                        "range on '{field}' sets the same side twice"
                    )));
                }
                let mut range = RangeQuery::builder(field);
                if let Some(v) = gte {
                    range = range.gte(field_value(v)?);
                }
                if let Some(v) = gt {
                    range = range.gt(field_value(v)?);
                }
                if let Some(v) = lte {
                    range = range.lte(field_value(v)?);
                }
                if let Some(v) = lt {
                    range = range.lt(field_value(v)?);
                }
                range.build()?.into()
            }
            QuerySpec::Prefix { field, value } => QueryExpr::prefix(field, value)?,
            QuerySpec::Wildcard { field, pattern } => QueryExpr::wildcard(field, pattern)?,
            QuerySpec::Ids { values } => QueryExpr::ids(values)?,
            QuerySpec::MultiMatch { query, fields } => QueryExpr::multi_match(query, fields)?,
            QuerySpec::Exists { field } => QueryExpr::exists(field)?,
            QuerySpec::Bool {
                must,
                filter,
                should,
                must_not,
            } => {
                let mut builder = QueryExpr::bool();
                for clause in must {
                    builder = builder.must(clause.into_expr()?);
                }
                for clause in filter {
                    builder = builder.filter(clause.into_expr()?);
                }
                for clause in should {
                    builder = builder.should(clause.into_expr()?);
                }
                for clause in must_not {
                    builder = builder.must_not(clause.into_expr()?);
                }
                builder.into()
            }
        };
        Ok(expr)
    }
}

impl SourceSpec {
    /// `true` is the backend default, so it yields no filter.
    fn into_filter(self) -> Result<Option<SourceFilter>> {
        match self {
            SourceSpec::Enabled(true) => Ok(None),
            SourceSpec::Enabled(false) => Ok(Some(SourceFilter::disabled())),
            SourceSpec::Filter(entry) => {
                if entry.includes.is_empty() && entry.excludes.is_empty() {
                    return Err(PikeError::invalid_expression(
                        "source filter names no includes or excludes",
                    ));
                }
                SourceFilter::new(entry.includes, entry.excludes).map(Some)
            }
        }
    }
}

impl HighlightEntry {
    fn into_spec(self) -> Result<HighlightSpec> {
        let mut builder = HighlightSpec::builder();
        for field in self.fields {
            builder = builder.field(field);
        }
        for tag in self.pre_tags {
            builder = builder.pre_tag(tag);
        }
        for tag in self.post_tags {
            builder = builder.post_tag(tag);
        }
        if let Some(require) = self.require_field_match {
            builder = builder.require_field_match(require);
        }
        if let Some(size) = self.fragment_size {
            builder = builder.fragment_size(size);
        }
        if let Some(count) = self.number_of_fragments {
            builder = builder.number_of_fragments(count);
        }
        builder.build()
    }
}

impl AggregationEntry {
    fn into_spec(self) -> Result<AggregationSpec> {
        if self.kind == "terms" {
            let mut terms = TermsAggregation::new(self.name, self.field)?;
            if let Some(size) = self.size {
                terms = terms.with_size(size)?;
            }
            return Ok(terms.into());
        }

        let kind = MetricKind::from_name(&self.kind).ok_or_else(|| {
            PikeError::invalid_expression(format!("unknown aggregation type '{}'", self.kind))
        })?;
        if self.size.is_some() {
            return Err(PikeError::invalid_expression(format!(
                "'{}' aggregation does not take a size",
                self.kind
            )));
        }
        AggregationSpec::metric(self.name, kind, self.field)
    }
}

/// Convert a JSON scalar into a field value.
fn field_value(value: Value) -> Result<FieldValue> {
    match value {
        Value::String(s) => Ok(FieldValue::Text(s)),
        Value::Bool(b) => Ok(FieldValue::Boolean(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(FieldValue::Integer(i)),
            None => n.as_f64().map(FieldValue::Float).ok_or_else(|| {
                PikeError::invalid_expression(format!("number {n} is out of range"))
            }),
        },
        other => Err(PikeError::invalid_expression(format!(
            "expected a scalar value, got {other}"
        ))),
    }
}
