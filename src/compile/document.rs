//! Document operation rendering.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use urlencoding::encode;

use crate::document::DocumentRequest;
use crate::error::Result;

/// HTTP method of a document call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a document.
    Get,
    /// Write a document under a known id.
    Put,
    /// Create with a generated id, or partially update.
    Post,
    /// Remove a document.
    Delete,
}

impl Method {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered document endpoint call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentCall {
    pub method: Method,
    /// Path relative to the backend root, with encoded segments.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

pub(crate) fn render(request: &DocumentRequest) -> Result<DocumentCall> {
    request.validate()?;

    let call = match request {
        DocumentRequest::Index {
            index,
            id: Some(id),
            source,
        } => DocumentCall {
            method: Method::Put,
            path: format!("/{}/_doc/{}", encode(index), encode(id)),
            body: Some(Value::Object(source.clone())),
        },
        DocumentRequest::Index {
            index,
            id: None,
            source,
        } => DocumentCall {
            method: Method::Post,
            path: format!("/{}/_doc", encode(index)),
            body: Some(Value::Object(source.clone())),
        },
        DocumentRequest::Get { index, id } => DocumentCall {
            method: Method::Get,
            path: format!("/{}/_doc/{}", encode(index), encode(id)),
            body: None,
        },
        DocumentRequest::Update { index, id, doc } => DocumentCall {
            method: Method::Post,
            path: format!("/{}/_update/{}", encode(index), encode(id)),
            body: Some(json!({ "doc": doc })),
        },
        DocumentRequest::Delete { index, id } => DocumentCall {
            method: Method::Delete,
            path: format!("/{}/_doc/{}", encode(index), encode(id)),
            body: None,
        },
    };
    Ok(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::QueryCompiler;
    use crate::error::PikeError;
    use serde_json::Map;

    #[test]
    fn test_index_with_and_without_id() {
        let source = json!({"title": "小浣熊", "price": 1.5});
        let compiler = QueryCompiler::new();

        let call = compiler
            .compile_document(&DocumentRequest::index_with_id("product", "1", &source).unwrap())
            .unwrap();
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.path, "/product/_doc/1");
        assert_eq!(call.body, Some(source.clone()));

        let call = compiler
            .compile_document(&DocumentRequest::index("product", &source).unwrap())
            .unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/product/_doc");
    }

    #[test]
    fn test_update_wraps_partial_document() {
        let request = DocumentRequest::update("product", "1", &json!({"price": 2.0})).unwrap();
        let call = QueryCompiler::new().compile_document(&request).unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/product/_update/1");
        assert_eq!(call.body, Some(json!({"doc": {"price": 2.0}})));
    }

    #[test]
    fn test_get_and_delete_have_no_body() {
        let compiler = QueryCompiler::new();
        let call = compiler
            .compile_document(&DocumentRequest::get("product", "1").unwrap())
            .unwrap();
        assert_eq!((call.method, call.body), (Method::Get, None));

        let call = compiler
            .compile_document(&DocumentRequest::delete("product", "1").unwrap())
            .unwrap();
        assert_eq!(call.method, Method::Delete);
        assert_eq!(call.path, "/product/_doc/1");
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let request = DocumentRequest::get("product", "a b/c?d").unwrap();
        let call = QueryCompiler::new().compile_document(&request).unwrap();
        assert_eq!(call.path, "/product/_doc/a%20b%2Fc%3Fd");
    }

    #[test]
    fn test_directly_built_request_is_validated() {
        let request = DocumentRequest::Update {
            index: "product".to_string(),
            id: "1".to_string(),
            doc: Map::new(),
        };
        let err = QueryCompiler::new().compile_document(&request).unwrap_err();
        assert!(matches!(err, PikeError::InvalidRequest(_)));
    }
}
