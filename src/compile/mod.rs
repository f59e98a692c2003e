//! Rendering of requests into the backend's JSON query DSL.
//!
//! This is the only module aware of the backend request schema. Everything
//! else in the crate works with typed values.

pub mod document;
pub mod query;
pub mod request;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::config::ClientConfig;
use crate::document::DocumentRequest;
use crate::error::{PikeError, Result};
use crate::query::QueryExpr;
use crate::search::SearchRequest;

pub use self::document::{DocumentCall, Method};

/// A serialized request body.
///
/// Components that are absent from the request are absent from the body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct WireBody(Map<String, Value>);

impl WireBody {
    /// Create an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert<K: Into<String>>(&mut self, key: K, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Get a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether a top-level key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Look up a nested value with a JSON pointer such as `/query/term/desc/value`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.find('/') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        let value = self.0.get(&head)?;
        if tail.is_empty() {
            Some(value)
        } else {
            value.pointer(tail)
        }
    }

    /// Top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Borrow the body as a JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert the body into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Serialize the body to JSON text.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(&self.0)?
        } else {
            serde_json::to_string(&self.0)?
        };
        Ok(text)
    }
}

/// Compiles query expressions and search requests into wire bodies.
///
/// Compilation is deterministic: equal inputs produce equal bodies.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    max_clause_count: usize,
    default_size: Option<usize>,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl QueryCompiler {
    /// Create a compiler with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler using the limits of a client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        QueryCompiler {
            max_clause_count: config.max_clause_count,
            default_size: config.default_size,
        }
    }

    /// Set the maximum number of leaf clauses in one query tree.
    pub fn with_max_clause_count(mut self, max_clause_count: usize) -> Self {
        self.max_clause_count = max_clause_count;
        self
    }

    /// Render a query expression.
    pub fn compile_query(&self, expr: &QueryExpr) -> Result<Value> {
        let clauses = expr.clause_count();
        if clauses > self.max_clause_count {
            return Err(PikeError::unsupported_query(format!(
                "query has {clauses} clauses, more than the limit of {}",
                self.max_clause_count
            )));
        }
        query::render(expr)
    }

    /// Render a complete search request.
    pub fn compile_request(&self, request: &SearchRequest) -> Result<WireBody> {
        request::render(self, request)
    }

    /// Render a single-document operation into an endpoint call.
    pub fn compile_document(&self, request: &DocumentRequest) -> Result<DocumentCall> {
        document::render(request)
    }

    pub(crate) fn default_size(&self) -> Option<usize> {
        self.default_size
    }
}

/// Render a float, rejecting values JSON cannot represent.
pub(crate) fn number(value: f64) -> Result<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| PikeError::unsupported_query(format!("{value} is not representable")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_body_pointer() {
        let mut body = WireBody::new();
        body.insert("query", json!({"term": {"desc": {"value": "浣熊"}}}));
        body.insert("size", json!(20));

        assert_eq!(body.pointer("/query/term/desc/value"), Some(&json!("浣熊")));
        assert_eq!(body.pointer("/size"), Some(&json!(20)));
        assert_eq!(body.pointer("/from"), None);
        assert_eq!(body.pointer("size"), None);
        assert!(body.contains_key("query"));
    }

    #[test]
    fn test_to_json_string() {
        let mut body = WireBody::new();
        body.insert("from", json!(0));
        assert_eq!(body.to_json_string(false).unwrap(), r#"{"from":0}"#);
        assert_eq!(body.into_value(), json!({"from": 0}));
    }

    #[test]
    fn test_clause_limit() {
        let mut builder = QueryExpr::bool();
        for i in 0..5 {
            builder = builder.should(QueryExpr::term("tag", format!("t{i}")).unwrap());
        }
        let query: QueryExpr = builder.into();

        let compiler = QueryCompiler::new().with_max_clause_count(4);
        let err = compiler.compile_query(&query).unwrap_err();
        assert!(matches!(err, PikeError::UnsupportedQuery(_)));

        let compiler = QueryCompiler::new().with_max_clause_count(5);
        assert!(compiler.compile_query(&query).is_ok());
    }

    #[test]
    fn test_number() {
        assert_eq!(number(1.5).unwrap(), json!(1.5));
        assert!(number(f64::NAN).is_err());
        assert!(number(f64::INFINITY).is_err());
    }
}
