//! Integration tests for single-document operations.

use std::collections::HashMap;
use std::sync::Mutex;

use pike::client::RawResponse;
use pike::compile::{DocumentCall, Method};
use pike::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Product {
    title: String,
    desc: String,
    price: f64,
}

fn raccoon() -> Product {
    Product {
        title: "小浣熊".to_string(),
        desc: "小浣熊很好吃".to_string(),
        price: 1.5,
    }
}

/// A tiny in-memory backend speaking the document endpoints.
#[derive(Default)]
struct MemoryBackend {
    documents: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<DocumentCall>>,
}

impl DocumentTransport for MemoryBackend {
    fn perform(&self, call: &DocumentCall) -> std::result::Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(call.clone());

        let segments: Vec<&str> = call.path.trim_start_matches('/').split('/').collect();
        let (index, endpoint, id) = match segments.as_slice() {
            [index, endpoint, id] => (*index, *endpoint, *id),
            other => return Err(TransportError::msg(format!("unexpected path {other:?}"))),
        };

        let mut documents = self.documents.lock().unwrap();
        let reply = match (call.method, endpoint) {
            (Method::Put, "_doc") => {
                let body = call.body.clone().unwrap_or(Value::Null);
                let outcome = match documents.insert(id.to_string(), body) {
                    Some(_) => "updated",
                    None => "created",
                };
                json!({"_index": index, "_id": id, "_version": 1, "result": outcome})
            }
            (Method::Get, "_doc") => match documents.get(id) {
                Some(source) => json!({
                    "_index": index, "_id": id, "_version": 1, "found": true, "_source": source
                }),
                None => json!({"_index": index, "_id": id, "found": false}),
            },
            (Method::Post, "_update") => {
                let partial = call
                    .body
                    .as_ref()
                    .and_then(|body| body.get("doc"))
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                match documents.get_mut(id).and_then(Value::as_object_mut) {
                    Some(stored) => {
                        stored.extend(partial);
                        json!({"_index": index, "_id": id, "_version": 2, "result": "updated"})
                    }
                    None => return Err(TransportError::msg("404 document_missing_exception")),
                }
            }
            (Method::Delete, "_doc") => {
                let outcome = match documents.remove(id) {
                    Some(_) => "deleted",
                    None => "not_found",
                };
                json!({"_index": index, "_id": id, "result": outcome})
            }
            (method, endpoint) => {
                return Err(TransportError::msg(format!("unsupported {method} {endpoint}")));
            }
        };
        Ok(reply)
    }
}

#[test]
fn test_document_lifecycle() -> Result<()> {
    let backend = MemoryBackend::default();
    let client = SearchClient::new(&backend);

    let created = client.index_document("product", Some("1"), &raccoon())?;
    assert_eq!(created.outcome, WriteOutcome::Created);
    assert_eq!(created.id, "1");

    let fetched = client.get_document("product", "1")?;
    assert!(fetched.found);
    assert_eq!(fetched.source_as::<Product>()?, Some(raccoon()));

    let updated = client.update_document("product", "1", &json!({"price": 2.0}))?;
    assert_eq!(updated.outcome, WriteOutcome::Updated);
    let fetched: Product = client.get_document("product", "1")?.source_as()?.unwrap();
    assert_eq!(fetched.price, 2.0);
    assert_eq!(fetched.title, "小浣熊");

    let deleted = client.delete_document("product", "1")?;
    assert_eq!(deleted.outcome, WriteOutcome::Deleted);
    assert!(!client.get_document("product", "1")?.found);

    let deleted = client.delete_document("product", "1")?;
    assert_eq!(deleted.outcome, WriteOutcome::NotFound);
    Ok(())
}

#[test]
fn test_calls_sent_to_the_transport() -> Result<()> {
    let backend = MemoryBackend::default();
    let client = SearchClient::new(&backend);

    client.index_document("product", Some("a b"), &raccoon())?;
    client.update_document("product", "a b", &json!({"desc": "很好吃"}))?;

    let calls = backend.calls.lock().unwrap();
    assert_eq!(calls[0].method, Method::Put);
    assert_eq!(calls[0].path, "/product/_doc/a%20b");
    assert_eq!(calls[1].method, Method::Post);
    assert_eq!(calls[1].path, "/product/_update/a%20b");
    assert_eq!(calls[1].body, Some(json!({"doc": {"desc": "很好吃"}})));
    Ok(())
}

#[test]
fn test_invalid_requests_never_reach_the_transport() {
    let backend = MemoryBackend::default();
    let client = SearchClient::new(&backend);

    assert!(matches!(
        client.get_document("product", ""),
        Err(PikeError::InvalidRequest(_))
    ));
    assert!(matches!(
        client.index_document("product", None, &"just a string"),
        Err(PikeError::InvalidRequest(_))
    ));
    assert!(backend.calls.lock().unwrap().is_empty());
}

#[test]
fn test_backend_failure_is_a_transport_error() {
    let backend = MemoryBackend::default();
    let client = SearchClient::new(&backend);
    let err = client
        .update_document("product", "missing", &json!({"price": 1.0}))
        .unwrap_err();
    assert!(err.is_transport());
}
