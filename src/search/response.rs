//! Decoding of raw search responses.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::aggregation;
use crate::error::{PikeError, Result};
use crate::search::{Hit, SearchRequest, SearchResult, TotalHits, TotalHitsRelation};

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    took: Option<u64>,
    #[serde(default)]
    timed_out: bool,
    hits: RawHits,
    aggregations: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawHits {
    total: Option<RawTotal>,
    max_score: Option<f64>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// Newer backends report `{value, relation}`, older ones a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Object {
        value: u64,
        relation: RawRelation,
    },
    Count(u64),
}

#[derive(Debug, Deserialize)]
enum RawRelation {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "gte")]
    Gte,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_index")]
    index: Option<String>,
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(rename = "_source")]
    source: Option<Map<String, Value>>,
    highlight: Option<HashMap<String, Vec<String>>>,
}

impl From<RawTotal> for TotalHits {
    fn from(raw: RawTotal) -> Self {
        match raw {
            RawTotal::Object { value, relation } => TotalHits {
                value,
                relation: match relation {
                    RawRelation::Eq => TotalHitsRelation::Eq,
                    RawRelation::Gte => TotalHitsRelation::Gte,
                },
            },
            RawTotal::Count(value) => TotalHits::exact(value),
        }
    }
}

impl From<RawHit> for Hit {
    fn from(raw: RawHit) -> Self {
        Hit {
            index: raw.index,
            id: raw.id,
            score: raw.score,
            source: raw.source,
            highlight: raw.highlight.unwrap_or_default(),
        }
    }
}

/// Decode a raw response issued for `request`.
///
/// Either every part decodes or the whole call fails; no partial result is
/// ever returned.
pub fn decode_response(request: &SearchRequest, raw: Value) -> Result<SearchResult> {
    let raw: RawSearchResponse = serde_json::from_value(raw)
        .map_err(|e| PikeError::malformed_response(format!("invalid search response: {e}")))?;

    let total = match raw.hits.total {
        Some(total) => Some(TotalHits::from(total)),
        None if request.track_total_hits() == Some(false) => None,
        None => {
            return Err(PikeError::malformed_response(
                "search response has no hit total",
            ));
        }
    };

    let aggregations =
        aggregation::decode_all(request.aggregations(), raw.aggregations.as_ref())?;

    Ok(SearchResult {
        took: raw.took,
        timed_out: raw.timed_out,
        total,
        max_score: raw.hits.max_score,
        hits: raw.hits.hits.into_iter().map(Hit::from).collect(),
        aggregations,
    })
}
