//! Query expression model.
//!
//! Queries are built from small validated structs ([`TermQuery`],
//! [`RangeQuery`], ...) and combined into a [`QueryExpr`] tree. Nothing in this
//! module knows how the tree is sent over the wire; see [`crate::compile`].

pub mod boolean;
pub mod exists;
pub mod ids;
pub mod multi_match;
pub mod prefix;
#[allow(clippy::module_inception)]
pub mod query;
pub mod range;
pub mod term;
pub mod value;
pub mod wildcard;

pub use self::boolean::{BoolQuery, BoolQueryBuilder, Occur};
pub use self::exists::ExistsQuery;
pub use self::ids::IdsQuery;
pub use self::multi_match::MultiMatchQuery;
pub use self::prefix::PrefixQuery;
pub use self::query::QueryExpr;
pub use self::range::{Bound, RangeQuery, RangeQueryBuilder};
pub use self::term::TermQuery;
pub use self::value::FieldValue;
pub use self::wildcard::WildcardQuery;
