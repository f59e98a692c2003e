//! Aggregation requests and typed decoding of their results.

pub mod decoder;
pub mod result;
pub mod spec;

pub use self::decoder::{decode, decode_all};
pub use self::result::{AggregationResult, Bucket, BucketKey, MetricValue};
pub use self::spec::{AggregationSpec, MetricAggregation, MetricKind, TermsAggregation};
