//! Typed search results.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::aggregation::{AggregationResult, Bucket, MetricValue};
use crate::error::{PikeError, Result};

/// Whether the reported total is exact or a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalHitsRelation {
    /// The total is exact.
    Eq,
    /// The backend stopped counting; the real total is at least this value.
    Gte,
}

/// Total number of documents matching the query, independent of paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalHits {
    /// Number of matching documents.
    pub value: u64,
    /// Exactness of `value`.
    pub relation: TotalHitsRelation,
}

impl TotalHits {
    /// An exact total.
    pub fn exact(value: u64) -> Self {
        TotalHits {
            value,
            relation: TotalHitsRelation::Eq,
        }
    }
}

/// A single matched document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    /// Index the document lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Document identifier.
    pub id: String,
    /// Relevance score; absent when a custom sort replaced scoring.
    pub score: Option<f64>,
    /// Source document; absent when source fetching was disabled.
    pub source: Option<Map<String, Value>>,
    /// Highlighted fragments per field, in backend order.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub highlight: HashMap<String, Vec<String>>,
}

impl Hit {
    /// Get one source field.
    pub fn source_field(&self, field: &str) -> Option<&Value> {
        self.source.as_ref().and_then(|source| source.get(field))
    }

    /// Deserialize the source into a caller type.
    pub fn source_as<T: DeserializeOwned>(&self) -> Result<T> {
        let source = self.source.clone().ok_or_else(|| {
            PikeError::malformed_response(format!("hit '{}' has no source", self.id))
        })?;
        serde_json::from_value(Value::Object(source)).map_err(|e| {
            PikeError::malformed_response(format!(
                "source of hit '{}' does not match the requested type: {e}",
                self.id
            ))
        })
    }

    /// Highlighted fragments of one field.
    pub fn highlight_fragments(&self, field: &str) -> Option<&[String]> {
        self.highlight.get(field).map(Vec::as_slice)
    }
}

/// Result of a search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Server-side execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,
    /// Whether the backend timed out and returned partial hits.
    pub timed_out: bool,
    /// Total matching documents; absent when total tracking was disabled.
    pub total: Option<TotalHits>,
    /// Highest score among matches; absent when scores were not computed.
    pub max_score: Option<f64>,
    /// The requested page of hits.
    pub hits: Vec<Hit>,
    /// Aggregation results keyed by the caller-assigned name.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub aggregations: HashMap<String, AggregationResult>,
}

impl SearchResult {
    /// Total hit count, if reported.
    pub fn total_hits(&self) -> Option<u64> {
        self.total.map(|total| total.value)
    }

    /// Get an aggregation result by name.
    pub fn aggregation(&self, name: &str) -> Option<&AggregationResult> {
        self.aggregations.get(name)
    }

    /// Get the buckets of a terms aggregation by name.
    pub fn buckets(&self, name: &str) -> Option<&[Bucket]> {
        self.aggregation(name).and_then(AggregationResult::as_buckets)
    }

    /// Get the value of a metric aggregation by name.
    pub fn metric(&self, name: &str) -> Option<MetricValue> {
        self.aggregation(name).and_then(AggregationResult::as_metric)
    }

    /// Deserialize the source of every hit.
    pub fn sources<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.hits.iter().map(Hit::source_as).collect()
    }
}
