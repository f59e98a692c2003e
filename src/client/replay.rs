//! A transport that answers every call with a recorded reply.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::client::transport::{DocumentTransport, RawResponse, Transport, TransportError};
use crate::compile::{DocumentCall, WireBody};
use crate::error::Result;

/// Replays a recorded backend reply.
///
/// Used by the `search` command and handy in tests. When an expected target
/// is set, calls against any other index fail like a real transport would.
#[derive(Debug, Clone)]
pub struct ReplayTransport {
    response: Value,
    expected_index: Option<String>,
}

impl ReplayTransport {
    /// Answer every call with `response`.
    pub fn new(response: Value) -> Self {
        ReplayTransport {
            response,
            expected_index: None,
        }
    }

    /// Load the recorded reply from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&text)?))
    }

    /// Only answer calls that target `index`.
    pub fn with_expected_index<S: Into<String>>(mut self, index: S) -> Self {
        self.expected_index = Some(index.into());
        self
    }

    fn check_target(&self, target: &str) -> std::result::Result<(), TransportError> {
        match &self.expected_index {
            Some(expected) if expected != target => Err(TransportError::msg(format!(
                "no recorded response for '{target}' (recorded for '{expected}')"
            ))),
            _ => Ok(()),
        }
    }
}

impl Transport for ReplayTransport {
    fn send(
        &self,
        index: &str,
        _body: &WireBody,
    ) -> std::result::Result<RawResponse, TransportError> {
        self.check_target(index)?;
        Ok(self.response.clone())
    }
}

impl DocumentTransport for ReplayTransport {
    fn perform(&self, call: &DocumentCall) -> std::result::Result<RawResponse, TransportError> {
        let index = call
            .path
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();
        self.check_target(index)?;
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::Method;
    use serde_json::json;

    #[test]
    fn test_replay() {
        let transport = ReplayTransport::new(json!({"hits": {"total": 0, "hits": []}}))
            .with_expected_index("product");
        let body = WireBody::new();
        assert!(transport.send("product", &body).is_ok());

        let err = transport.send("fruit", &body).unwrap_err();
        assert!(err.to_string().contains("fruit"));

        let call = DocumentCall {
            method: Method::Get,
            path: "/product/_doc/1".to_string(),
            body: None,
        };
        assert!(transport.perform(&call).is_ok());
    }
}
