//! Typed results of document operations.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PikeError, Result};

/// What a write did to the stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Created,
    Updated,
    Deleted,
    NotFound,
    /// The update changed nothing.
    Noop,
}

/// Result of an index, update or delete call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version", default)]
    pub version: Option<u64>,
    #[serde(rename = "result")]
    pub outcome: WriteOutcome,
}

/// Result of a get call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub found: bool,
    #[serde(rename = "_version", default)]
    pub version: Option<u64>,
    #[serde(rename = "_source", default)]
    pub source: Option<Map<String, Value>>,
}

impl GetResult {
    /// Deserialize the source document into `T`.
    ///
    /// Returns `Ok(None)` when the document was not found.
    pub fn source_as<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.source {
            Some(source) => serde_json::from_value(Value::Object(source.clone()))
                .map(Some)
                .map_err(|e| {
                    PikeError::malformed_response(format!(
                        "document {} does not match the requested type: {e}",
                        self.id
                    ))
                }),
            None => Ok(None),
        }
    }
}

/// Decode the reply to an index, update or delete call.
pub fn decode_write(raw: Value) -> Result<WriteResult> {
    serde_json::from_value(raw)
        .map_err(|e| PikeError::malformed_response(format!("invalid write response: {e}")))
}

/// Decode the reply to a get call.
pub fn decode_get(raw: Value) -> Result<GetResult> {
    let result: GetResult = serde_json::from_value(raw)
        .map_err(|e| PikeError::malformed_response(format!("invalid get response: {e}")))?;
    if result.found && result.source.is_none() {
        log::debug!("document {} found without a source", result.id);
    }
    Ok(result)
}
