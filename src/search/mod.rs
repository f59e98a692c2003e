//! Search requests, results and response decoding.

pub mod highlight;
pub mod request;
pub mod response;
pub mod result;
pub mod sort;
pub mod source;

pub use self::highlight::{HighlightSpec, HighlightSpecBuilder};
pub use self::request::{SearchRequest, SearchRequestBuilder};
pub use self::response::decode_response;
pub use self::result::{Hit, SearchResult, TotalHits, TotalHitsRelation};
pub use self::sort::{SortOrder, SortSpec};
pub use self::source::SourceFilter;
