//! Decoding of raw aggregation nodes.
//!
//! The raw response is weakly typed: a metric node and a terms node with a
//! single bucket can look alike. Decoding therefore always dispatches on the
//! [`AggregationSpec`] that produced the request, never on the raw shape.

use std::collections::HashMap;

use log::{trace, warn};
use serde_json::Value;

use crate::aggregation::{AggregationResult, AggregationSpec, Bucket, BucketKey, MetricValue};
use crate::error::{PikeError, Result};

/// Decode one raw aggregation node as described by `spec`.
pub fn decode(spec: &AggregationSpec, raw: &Value) -> Result<AggregationResult> {
    match spec {
        AggregationSpec::Terms(_) => decode_buckets(spec.name(), raw),
        AggregationSpec::Metric(_) => decode_metric(spec.name(), raw),
    }
}

/// Decode every requested aggregation from the response `aggregations` node.
///
/// Fails if any requested aggregation is missing. Aggregations present in the
/// response but not requested are ignored.
pub fn decode_all(
    specs: &[AggregationSpec],
    raw: Option<&Value>,
) -> Result<HashMap<String, AggregationResult>> {
    let mut results = HashMap::with_capacity(specs.len());
    if specs.is_empty() {
        return Ok(results);
    }

    let nodes = raw.and_then(Value::as_object).ok_or_else(|| {
        PikeError::malformed_response(format!(
            "response has no aggregations object but {} aggregation(s) were requested",
            specs.len()
        ))
    })?;

    for spec in specs {
        let node = nodes.get(spec.name()).ok_or_else(|| {
            PikeError::malformed_response(format!(
                "aggregation '{}' is missing from the response",
                spec.name()
            ))
        })?;
        let result = decode(spec, node)?;
        trace!("decoded {} aggregation '{}'", spec.type_name(), spec.name());
        results.insert(spec.name().to_string(), result);
    }

    for name in nodes.keys() {
        if !results.contains_key(name) {
            warn!("ignoring unrequested aggregation '{name}' in response");
        }
    }

    Ok(results)
}

fn decode_buckets(name: &str, raw: &Value) -> Result<AggregationResult> {
    let buckets = raw
        .get("buckets")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PikeError::malformed_response(format!(
                "terms aggregation '{name}' has no bucket list"
            ))
        })?;

    let buckets = buckets
        .iter()
        .enumerate()
        .map(|(position, bucket)| decode_bucket(name, position, bucket))
        .collect::<Result<Vec<_>>>()?;

    Ok(AggregationResult::Buckets(buckets))
}

fn decode_bucket(name: &str, position: usize, raw: &Value) -> Result<Bucket> {
    let key = match raw.get("key") {
        Some(Value::String(s)) => BucketKey::Text(s.clone()),
        Some(Value::Number(n)) => BucketKey::Number(n.clone()),
        Some(other) => {
            return Err(PikeError::malformed_response(format!(
                "bucket {position} of '{name}' has an unsupported key {other}"
            )));
        }
        None => {
            return Err(PikeError::malformed_response(format!(
                "bucket {position} of '{name}' has no key"
            )));
        }
    };

    let doc_count = raw
        .get("doc_count")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            PikeError::malformed_response(format!(
                "bucket {position} of '{name}' has no valid doc_count"
            ))
        })?;

    let key_as_string = raw
        .get("key_as_string")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Bucket {
        key,
        key_as_string,
        doc_count,
    })
}

fn decode_metric(name: &str, raw: &Value) -> Result<AggregationResult> {
    let value = match raw.get("value") {
        Some(Value::Null) => MetricValue::Undefined,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => MetricValue::Value(v),
            None => {
                return Err(PikeError::malformed_response(format!(
                    "metric aggregation '{name}' has a non-numeric value"
                )));
            }
        },
        Some(other) => {
            return Err(PikeError::malformed_response(format!(
                "metric aggregation '{name}' has an unexpected value {other}"
            )));
        }
        None => {
            return Err(PikeError::malformed_response(format!(
                "metric aggregation '{name}' has no value"
            )));
        }
    };

    Ok(AggregationResult::Metric(value))
}
