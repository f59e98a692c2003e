//! Typed aggregation results.

use std::fmt;

use serde::Serialize;
use serde_json::Number;

/// Key of a terms bucket.
///
/// Keyword fields produce text keys, numeric fields produce number keys. The
/// number keeps the exact representation the backend sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BucketKey {
    /// Text key.
    Text(String),
    /// Numeric key.
    Number(Number),
}

impl BucketKey {
    /// Get the key as a float, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BucketKey::Number(n) => n.as_f64(),
            BucketKey::Text(_) => None,
        }
    }

    /// Get the key as text, if it is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BucketKey::Text(s) => Some(s),
            BucketKey::Number(_) => None,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Text(s) => write!(f, "{s}"),
            BucketKey::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for BucketKey {
    fn from(key: &str) -> Self {
        BucketKey::Text(key.to_string())
    }
}

impl From<String> for BucketKey {
    fn from(key: String) -> Self {
        BucketKey::Text(key)
    }
}

impl From<i64> for BucketKey {
    fn from(key: i64) -> Self {
        BucketKey::Number(Number::from(key))
    }
}

/// One group produced by a terms aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    /// The bucket key.
    pub key: BucketKey,
    /// Formatted key, sent by the backend for dates and booleans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_as_string: Option<String>,
    /// Number of documents in the bucket.
    pub doc_count: u64,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new<K: Into<BucketKey>>(key: K, doc_count: u64) -> Self {
        Bucket {
            key: key.into(),
            key_as_string: None,
            doc_count,
        }
    }

    /// The key as display text: the formatted key when present, else the raw key.
    pub fn key_string(&self) -> String {
        match &self.key_as_string {
            Some(formatted) => formatted.clone(),
            None => self.key.to_string(),
        }
    }
}

/// Value of a single-value metric.
///
/// `Undefined` means no document contributed a value. It is distinct from a
/// real zero: an average over nothing is undefined, not 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum MetricValue {
    /// A computed value.
    Value(f64),
    /// No contributing documents.
    Undefined,
}

impl MetricValue {
    /// Get the value, or `None` when undefined.
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Value(v) => Some(*v),
            MetricValue::Undefined => None,
        }
    }

    /// Check whether the metric is undefined.
    pub fn is_undefined(&self) -> bool {
        matches!(self, MetricValue::Undefined)
    }
}

impl From<MetricValue> for Option<f64> {
    fn from(value: MetricValue) -> Self {
        value.value()
    }
}

/// Decoded result of one aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationResult {
    /// Buckets of a terms aggregation, in backend order.
    Buckets(Vec<Bucket>),
    /// A single-value metric.
    Metric(MetricValue),
}

impl AggregationResult {
    /// Get the buckets, if this is a bucket result.
    pub fn as_buckets(&self) -> Option<&[Bucket]> {
        match self {
            AggregationResult::Buckets(buckets) => Some(buckets),
            AggregationResult::Metric(_) => None,
        }
    }

    /// Get the metric value, if this is a metric result.
    pub fn as_metric(&self) -> Option<MetricValue> {
        match self {
            AggregationResult::Metric(value) => Some(*value),
            AggregationResult::Buckets(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_key_string() {
        let bucket = Bucket::new("apple", 2);
        assert_eq!(bucket.key_string(), "apple");

        let bucket = Bucket {
            key: BucketKey::from(1),
            key_as_string: Some("true".to_string()),
            doc_count: 4,
        };
        assert_eq!(bucket.key_string(), "true");
        assert_eq!(bucket.key.as_f64(), Some(1.0));
    }

    #[test]
    fn test_metric_value() {
        assert_eq!(MetricValue::Value(0.0).value(), Some(0.0));
        assert!(MetricValue::Undefined.is_undefined());
        assert_ne!(MetricValue::Value(0.0), MetricValue::Undefined);
    }

    #[test]
    fn test_serialize_results() {
        let result = AggregationResult::Metric(MetricValue::Undefined);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"metric": null})
        );

        let result = AggregationResult::Buckets(vec![Bucket::new("a", 1)]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"buckets": [{"key": "a", "doc_count": 1}]})
        );
    }
}
