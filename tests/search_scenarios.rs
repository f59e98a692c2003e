//! Integration tests for the search facade against a recording transport.

use std::sync::Mutex;

use pike::prelude::*;
use pike::client::RawResponse;
use serde_json::{Value, json};

/// Records every call and answers with a fixed reply.
struct RecordingTransport {
    reply: Value,
    calls: Mutex<Vec<(String, WireBody)>>,
}

impl RecordingTransport {
    fn new(reply: Value) -> Self {
        RecordingTransport {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, WireBody)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn send(
        &self,
        index: &str,
        body: &WireBody,
    ) -> std::result::Result<RawResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((index.to_string(), body.clone()));
        Ok(self.reply.clone())
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    fn send(
        &self,
        _index: &str,
        _body: &WireBody,
    ) -> std::result::Result<RawResponse, TransportError> {
        Err(TransportError::msg("connection refused").context("POST /product/_search"))
    }
}

fn product_reply() -> Value {
    json!({
        "took": 5,
        "timed_out": false,
        "hits": {
            "total": {"value": 2, "relation": "eq"},
            "max_score": null,
            "hits": [
                {
                    "_index": "product",
                    "_id": "1",
                    "_score": null,
                    "_source": {"title": "小浣熊", "desc": "小浣熊很好吃", "price": 1.5},
                    "highlight": {"desc": ["小浣熊很<em>好吃</em>"]},
                    "sort": [1.5]
                },
                {
                    "_index": "product",
                    "_id": "2",
                    "_score": null,
                    "_source": {"title": "大浣熊", "desc": "大浣熊", "price": 1.0}
                }
            ]
        }
    })
}

#[test]
fn test_term_query_with_paging_and_sort() -> Result<()> {
    let transport = RecordingTransport::new(product_reply());
    let client = SearchClient::new(&transport);

    let request = SearchRequest::builder("product")
        .query(QueryExpr::term("desc", "浣熊")?)
        .from(0)
        .size(20)
        .sort(SortSpec::desc("price")?)
        .build()?;
    let result = client.execute(&request)?;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let (index, body) = &calls[0];
    assert_eq!(index, "product");
    assert_eq!(body.pointer("/query/term/desc/value"), Some(&json!("浣熊")));
    assert_eq!(body.get("from"), Some(&json!(0)));
    assert_eq!(body.get("size"), Some(&json!(20)));
    assert_eq!(body.get("sort"), Some(&json!([{"price": {"order": "desc"}}])));

    assert_eq!(result.total_hits(), Some(2));
    assert_eq!(result.max_score, None);
    assert_eq!(result.hits.len(), 2);
    assert_eq!(result.hits[0].id, "1");
    assert_eq!(
        result.hits[0].highlight_fragments("desc").unwrap()[0],
        "小浣熊很<em>好吃</em>"
    );
    assert!(result.hits[1].highlight_fragments("desc").is_none());
    Ok(())
}

#[test]
fn test_post_filter_is_not_merged_into_query() -> Result<()> {
    let transport = RecordingTransport::new(product_reply());
    let client = SearchClient::new(&transport);

    let request = SearchRequest::builder("product")
        .query(QueryExpr::multi_match("浣熊", ["title", "desc"])?)
        .post_filter(RangeQuery::builder("price").lte(1.5).build()?)
        .build()?;
    client.execute(&request)?;

    let (_, body) = &transport.calls()[0];
    assert_eq!(
        body.get("post_filter"),
        Some(&json!({"range": {"price": {"lte": 1.5}}}))
    );
    let query = body.get("query").unwrap();
    assert!(query.get("multi_match").is_some());
    assert!(!query.to_string().contains("range"));
    Ok(())
}

#[test]
fn test_typed_sources() -> Result<()> {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Product {
        title: String,
        price: f64,
    }

    let client = SearchClient::new(RecordingTransport::new(product_reply()));
    let request = SearchRequest::builder("product").build()?;
    let products: Vec<Product> = client.execute(&request)?.sources()?;
    assert_eq!(
        products,
        vec![
            Product {
                title: "小浣熊".to_string(),
                price: 1.5
            },
            Product {
                title: "大浣熊".to_string(),
                price: 1.0
            },
        ]
    );
    Ok(())
}

#[test]
fn test_compile_is_deterministic() -> Result<()> {
    let query: QueryExpr = QueryExpr::bool()
        .must(QueryExpr::term("desc", "浣熊")?)
        .filter(QueryExpr::exists("price")?)
        .should(QueryExpr::prefix("title", "小")?)
        .must_not(QueryExpr::wildcard("title", "大*")?)
        .into();
    let request = SearchRequest::builder("product")
        .query(query)
        .highlight(HighlightSpec::builder().field("desc").build()?)
        .aggregation(AggregationSpec::max("price_max", "price")?)
        .build()?;

    let compiler = QueryCompiler::new();
    let first = compiler.compile_request(&request)?;
    let second = compiler.compile_request(&request.clone())?;
    assert_eq!(first, second);
    assert_eq!(first.to_json_string(false)?, second.to_json_string(false)?);
    Ok(())
}

#[test]
fn test_window_violation_never_reaches_transport() -> Result<()> {
    let transport = RecordingTransport::new(product_reply());
    let config = ClientConfig::default().with_max_result_window(100);
    let client = SearchClient::with_config(&transport, config)?;

    let request = SearchRequest::builder("product").from(95).size(10).build()?;
    let err = client.execute(&request).unwrap_err();
    assert!(matches!(err, PikeError::InvalidRequest(_)));
    assert!(transport.calls().is_empty());
    Ok(())
}

#[test]
fn test_transport_error_propagates_unchanged() -> Result<()> {
    let client = SearchClient::new(FailingTransport);
    let request = SearchRequest::builder("product").build()?;

    match client.execute(&request) {
        Err(PikeError::Transport(error)) => {
            assert_eq!(
                format!("{:#}", error.into_inner()),
                "POST /product/_search: connection refused"
            );
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_multiple_indices_share_one_call() -> Result<()> {
    let transport = RecordingTransport::new(product_reply());
    let client = SearchClient::new(&transport);
    let request = SearchRequest::builder("product")
        .index("fruit")
        .query(QueryExpr::ids(["1", "2"])?)
        .build()?;
    client.execute(&request)?;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "product,fruit");
    Ok(())
}

#[test]
fn test_malformed_reply_returns_no_partial_result() -> Result<()> {
    let transport = RecordingTransport::new(json!({
        "hits": {
            "total": 1,
            "hits": [{"_id": "1", "_score": "high"}]
        }
    }));
    let client = SearchClient::new(&transport);
    let request = SearchRequest::builder("product").build()?;
    let err = client.execute(&request).unwrap_err();
    assert!(matches!(err, PikeError::MalformedResponse(_)));
    Ok(())
}

#[test]
fn test_invalid_expressions_are_rejected_locally() {
    assert!(matches!(
        QueryExpr::range("price", Bound::Unbounded, Bound::Unbounded),
        Err(PikeError::InvalidExpression(_))
    ));
    assert!(matches!(
        QueryExpr::multi_match("浣熊", Vec::<String>::new()),
        Err(PikeError::InvalidExpression(_))
    ));
    assert!(matches!(
        SourceFilter::new(["title"], ["title"]),
        Err(PikeError::InvalidExpression(_))
    ));
    assert!(matches!(
        SearchRequest::builder("product")
            .aggregation(AggregationSpec::avg("price", "price").unwrap())
            .aggregation(TermsAggregation::new("price", "price").unwrap())
            .build(),
        Err(PikeError::InvalidRequest(_))
    ));
}
