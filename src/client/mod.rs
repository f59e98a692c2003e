//! Search execution facade.
//!
//! [`SearchClient`] ties the pieces together: it validates a request against
//! its [`ClientConfig`], compiles it, hands the body to the transport once and
//! decodes the reply. It keeps no state between calls.
//!
//! ```
//! use pike::client::{ReplayTransport, SearchClient};
//! use pike::query::QueryExpr;
//! use pike::search::SearchRequest;
//! use serde_json::json;
//!
//! let transport = ReplayTransport::new(json!({
//!     "took": 1,
//!     "hits": {
//!         "total": {"value": 1, "relation": "eq"},
//!         "max_score": 0.9,
//!         "hits": [{"_id": "1", "_score": 0.9, "_source": {"title": "小浣熊"}}]
//!     }
//! }));
//! let client = SearchClient::new(transport);
//!
//! let request = SearchRequest::builder("product")
//!     .query(QueryExpr::term("title", "小浣熊")?)
//!     .build()?;
//! let result = client.execute(&request)?;
//! assert_eq!(result.total_hits(), Some(1));
//! # Ok::<(), pike::error::PikeError>(())
//! ```

pub mod replay;
pub mod transport;

use log::{debug, trace};
use serde::Serialize;

use crate::compile::{QueryCompiler, WireBody};
use crate::config::ClientConfig;
use crate::document::{self, DocumentRequest, GetResult, WriteResult};
use crate::error::Result;
use crate::search::{SearchRequest, SearchResult, decode_response};

pub use self::replay::ReplayTransport;
pub use self::transport::{DocumentTransport, RawResponse, Transport, TransportError};

/// Executes searches and document operations through a transport.
#[derive(Debug, Clone)]
pub struct SearchClient<T> {
    transport: T,
    config: ClientConfig,
    compiler: QueryCompiler,
}

impl<T> SearchClient<T> {
    /// Create a client with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::assemble(transport, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    ///
    /// Fails with `InvalidRequest` when the configuration is inconsistent,
    /// e.g. a zero result window.
    pub fn with_config(transport: T, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(transport, config))
    }

    fn assemble(transport: T, config: ClientConfig) -> Self {
        let compiler = QueryCompiler::from_config(&config);
        SearchClient {
            transport,
            config,
            compiler,
        }
    }

    /// The configuration the client validates against.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Borrow the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back, e.g. to close its connection.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Validate and compile a request without sending it.
    pub fn compile(&self, request: &SearchRequest) -> Result<WireBody> {
        self.config.check_request(request)?;
        self.compiler.compile_request(request)
    }
}

impl<T: Transport> SearchClient<T> {
    /// Run a search.
    ///
    /// The transport is called exactly once. Its failure is returned as
    /// [`PikeError::Transport`](crate::error::PikeError::Transport) without
    /// retry, and a reply that does not decode fails the whole call.
    pub fn execute(&self, request: &SearchRequest) -> Result<SearchResult> {
        let body = self.compile(request)?;
        let target = request.target();

        debug!(
            "searching '{target}' with {} clauses, {} aggregations",
            request.query().clause_count(),
            request.aggregations().len()
        );
        if log::log_enabled!(log::Level::Trace) {
            trace!("request body: {}", body.to_json_string(false)?);
        }

        let raw = self.transport.send(&target, &body)?;
        let result = decode_response(request, raw)?;

        debug!(
            "search on '{target}' returned {} hits (total {:?})",
            result.hits.len(),
            result.total_hits()
        );
        Ok(result)
    }
}

impl<T: DocumentTransport> SearchClient<T> {
    /// Store `source`, under `id` when given.
    pub fn index_document<S: Serialize>(
        &self,
        index: &str,
        id: Option<&str>,
        source: &S,
    ) -> Result<WriteResult> {
        let request = match id {
            Some(id) => DocumentRequest::index_with_id(index, id, source)?,
            None => DocumentRequest::index(index, source)?,
        };
        self.perform(&request).and_then(document::decode_write)
    }

    /// Fetch a document. A missing document is a result with `found == false`.
    pub fn get_document(&self, index: &str, id: &str) -> Result<GetResult> {
        let request = DocumentRequest::get(index, id)?;
        self.perform(&request).and_then(document::decode_get)
    }

    /// Merge `partial` into a stored document.
    pub fn update_document<S: Serialize>(
        &self,
        index: &str,
        id: &str,
        partial: &S,
    ) -> Result<WriteResult> {
        let request = DocumentRequest::update(index, id, partial)?;
        self.perform(&request).and_then(document::decode_write)
    }

    /// Delete a document.
    pub fn delete_document(&self, index: &str, id: &str) -> Result<WriteResult> {
        let request = DocumentRequest::delete(index, id)?;
        self.perform(&request).and_then(document::decode_write)
    }

    /// Perform any document request and return the raw reply.
    pub fn perform(&self, request: &DocumentRequest) -> Result<RawResponse> {
        let call = self.compiler.compile_document(request)?;
        debug!("{} {} ({} request)", call.method, call.path, request.kind());
        Ok(self.transport.perform(&call)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PikeError;
    use crate::query::QueryExpr;
    use serde_json::json;

    fn empty_reply() -> ReplayTransport {
        ReplayTransport::new(json!({"hits": {"total": 0, "max_score": null, "hits": []}}))
    }

    #[test]
    fn test_result_window() {
        let client = SearchClient::new(empty_reply());

        let request = SearchRequest::builder("product")
            .from(9_990)
            .size(10)
            .build()
            .unwrap();
        assert!(client.compile(&request).is_ok());

        let request = SearchRequest::builder("product")
            .from(9_995)
            .size(10)
            .build()
            .unwrap();
        let err = client.execute(&request).unwrap_err();
        assert!(matches!(err, PikeError::InvalidRequest(_)));

        // Without a size the backend default page still counts.
        let request = SearchRequest::builder("product").from(9_995).build().unwrap();
        assert!(client.compile(&request).is_err());
    }

    #[test]
    fn test_execute_with_config() {
        let config = ClientConfig::default().with_default_size(5);
        let client = SearchClient::with_config(empty_reply(), config).unwrap();
        let request = SearchRequest::builder("product")
            .query(QueryExpr::prefix("title", "小").unwrap())
            .build()
            .unwrap();

        assert_eq!(client.compile(&request).unwrap().get("size"), Some(&json!(5)));
        let result = client.execute(&request).unwrap();
        assert_eq!(result.total_hits(), Some(0));
        assert!(result.hits.is_empty());
    }

    #[test]
    fn test_inconsistent_config_is_rejected() {
        let config = ClientConfig::default().with_max_result_window(0);
        assert!(matches!(
            SearchClient::with_config(empty_reply(), config),
            Err(PikeError::InvalidRequest(_))
        ));

        let config = ClientConfig::default()
            .with_max_result_window(50)
            .with_default_size(100);
        assert!(matches!(
            SearchClient::with_config(empty_reply(), config),
            Err(PikeError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_transport_failure_propagates() {
        let client = SearchClient::new(empty_reply().with_expected_index("fruit"));
        let request = SearchRequest::builder("product").build().unwrap();
        let err = client.execute(&request).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_document_write() {
        let transport = ReplayTransport::new(json!({
            "_index": "product",
            "_id": "1",
            "_version": 1,
            "result": "created"
        }));
        let client = SearchClient::new(transport);
        let result = client
            .index_document("product", Some("1"), &json!({"title": "小浣熊"}))
            .unwrap();
        assert_eq!(result.outcome, crate::document::WriteOutcome::Created);

        let err = client.get_document("product", "1").unwrap_err();
        assert!(matches!(err, PikeError::MalformedResponse(_)));
    }
}
