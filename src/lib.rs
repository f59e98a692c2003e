//! # Pike
//!
//! A typed query, aggregation and response-decoding layer for document search
//! services that speak an Elasticsearch-style JSON query DSL.
//!
//! ## Features
//!
//! - Validated query expressions composable into boolean trees
//! - Deterministic compilation into the backend's wire body
//! - Aggregation results decoded by the spec that requested them
//! - A stateless search facade over a pluggable transport
//! - Single-document index, get, update and delete
//!
//! ```
//! use pike::prelude::*;
//!
//! let request = SearchRequest::builder("product")
//!     .query(
//!         QueryExpr::bool()
//!             .must(QueryExpr::term("desc", "浣熊")?)
//!             .filter(RangeQuery::builder("price").gte(0).lte(10).build()?),
//!     )
//!     .size(20)
//!     .sort(SortSpec::desc("price")?)
//!     .aggregation(AggregationSpec::avg("price_avg", "price")?)
//!     .build()?;
//!
//! let body = QueryCompiler::new().compile_request(&request)?;
//! assert!(body.contains_key("aggs"));
//! # Ok::<(), PikeError>(())
//! ```

pub mod aggregation;
pub mod cli;
pub mod client;
pub mod compile;
pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod search;

pub mod prelude {
    pub use crate::aggregation::{
        AggregationResult, AggregationSpec, Bucket, BucketKey, MetricKind, MetricValue,
        TermsAggregation,
    };
    pub use crate::client::{DocumentTransport, SearchClient, Transport, TransportError};
    pub use crate::compile::{QueryCompiler, WireBody};
    pub use crate::config::ClientConfig;
    pub use crate::document::{DocumentRequest, GetResult, WriteOutcome, WriteResult};
    pub use crate::error::{PikeError, Result};
    pub use crate::query::{Bound, FieldValue, Occur, QueryExpr, RangeQuery};
    pub use crate::search::{
        HighlightSpec, Hit, SearchRequest, SearchResult, SortOrder, SortSpec, SourceFilter,
        TotalHits,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
