//! Document requests.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PikeError, Result};
use crate::search::request::validate_index_name;

/// One operation on a single document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRequest {
    /// Store a whole document. Without an id the backend assigns one.
    Index {
        index: String,
        id: Option<String>,
        source: Map<String, Value>,
    },
    /// Fetch a document by id.
    Get { index: String, id: String },
    /// Merge `doc` into the stored document.
    Update {
        index: String,
        id: String,
        doc: Map<String, Value>,
    },
    /// Remove a document by id.
    Delete { index: String, id: String },
}

impl DocumentRequest {
    /// Index a document under a backend-assigned id.
    pub fn index<I: Into<String>, T: Serialize>(index: I, source: &T) -> Result<Self> {
        let request = DocumentRequest::Index {
            index: index.into(),
            id: None,
            source: to_object("document", source)?,
        };
        request.validate()?;
        Ok(request)
    }

    /// Index a document under `id`, replacing any existing one.
    pub fn index_with_id<I, D, T>(index: I, id: D, source: &T) -> Result<Self>
    where
        I: Into<String>,
        D: Into<String>,
        T: Serialize,
    {
        let request = DocumentRequest::Index {
            index: index.into(),
            id: Some(id.into()),
            source: to_object("document", source)?,
        };
        request.validate()?;
        Ok(request)
    }

    /// Fetch the document stored under `id`.
    pub fn get<I: Into<String>, D: Into<String>>(index: I, id: D) -> Result<Self> {
        let request = DocumentRequest::Get {
            index: index.into(),
            id: id.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Partially update the document stored under `id`.
    pub fn update<I, D, T>(index: I, id: D, partial: &T) -> Result<Self>
    where
        I: Into<String>,
        D: Into<String>,
        T: Serialize,
    {
        let request = DocumentRequest::Update {
            index: index.into(),
            id: id.into(),
            doc: to_object("partial document", partial)?,
        };
        request.validate()?;
        Ok(request)
    }

    /// Delete the document stored under `id`.
    pub fn delete<I: Into<String>, D: Into<String>>(index: I, id: D) -> Result<Self> {
        let request = DocumentRequest::Delete {
            index: index.into(),
            id: id.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// The target index.
    pub fn index_name(&self) -> &str {
        match self {
            DocumentRequest::Index { index, .. }
            | DocumentRequest::Get { index, .. }
            | DocumentRequest::Update { index, .. }
            | DocumentRequest::Delete { index, .. } => index,
        }
    }

    /// The document id, if one was given.
    pub fn id(&self) -> Option<&str> {
        match self {
            DocumentRequest::Index { id, .. } => id.as_deref(),
            DocumentRequest::Get { id, .. }
            | DocumentRequest::Update { id, .. }
            | DocumentRequest::Delete { id, .. } => Some(id),
        }
    }

    /// Operation name, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentRequest::Index { .. } => "index",
            DocumentRequest::Get { .. } => "get",
            DocumentRequest::Update { .. } => "update",
            DocumentRequest::Delete { .. } => "delete",
        }
    }

    /// Check the request. Variants can be built directly, so the compiler
    /// calls this again before rendering.
    pub fn validate(&self) -> Result<()> {
        validate_index_name(self.index_name())?;
        if let Some(id) = self.id() {
            if id.is_empty() {
                return Err(PikeError::invalid_request(format!(
                    "{} request needs a non-empty document id",
                    self.kind()
                )));
            }
        }
        if let DocumentRequest::Update { doc, .. } = self {
            if doc.is_empty() {
                return Err(PikeError::invalid_request(
                    "update request needs at least one field",
                ));
            }
        }
        Ok(())
    }
}

fn to_object<T: Serialize>(what: &str, value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(PikeError::invalid_request(format!(
            "{what} must serialize to a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Product {
        title: String,
        price: f64,
    }

    #[test]
    fn test_index_from_struct() {
        let product = Product {
            title: "小浣熊".to_string(),
            price: 1.5,
        };
        let request = DocumentRequest::index_with_id("product", "1", &product).unwrap();
        assert_eq!(request.kind(), "index");
        assert_eq!(request.id(), Some("1"));
        match request {
            DocumentRequest::Index { source, .. } => {
                assert_eq!(source.get("title"), Some(&json!("小浣熊")));
            }
            other => panic!("unexpected request {other:?}"),
        }

        let request = DocumentRequest::index("product", &product).unwrap();
        assert_eq!(request.id(), None);
    }

    #[test]
    fn test_non_object_source_rejected() {
        let err = DocumentRequest::index("product", &vec![1, 2]).unwrap_err();
        assert!(matches!(err, PikeError::InvalidRequest(_)));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_validation() {
        assert!(DocumentRequest::get("product", "").is_err());
        assert!(DocumentRequest::delete("", "1").is_err());
        assert!(DocumentRequest::get("a,b", "1").is_err());
        assert!(DocumentRequest::update("product", "1", &json!({})).is_err());
        assert!(DocumentRequest::update("product", "1", &json!({"price": 2.0})).is_ok());
    }
}
