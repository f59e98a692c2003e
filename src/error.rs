//! Error types for the Pike library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`PikeError`] enum. Each variant corresponds to one stage of a search call:
//! building expressions, validating the request, compiling it, talking to the
//! transport, and decoding the response.
//!
//! # Examples
//!
//! ```
//! use pike::error::{PikeError, Result};
//! use pike::query::QueryExpr;
//!
//! fn example_operation() -> Result<QueryExpr> {
//!     QueryExpr::term("", "value")
//! }
//!
//! match example_operation() {
//!     Err(PikeError::InvalidExpression(msg)) => eprintln!("rejected: {msg}"),
//!     Err(e) => eprintln!("Error: {e}"),
//!     Ok(_) => println!("Success"),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::client::transport::TransportError;

/// The main error type for Pike operations.
#[derive(Error, Debug)]
pub enum PikeError {
    /// A query expression violated a local invariant. Raised on the client
    /// side; nothing is sent over the wire.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// A search or document request is inconsistent as a whole
    /// (duplicate aggregation names, result window exceeded, ...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The compiler met a value or tree it cannot render.
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    /// Opaque failure reported by the transport collaborator.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The raw response does not have the shape the request predicts.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// I/O errors (configuration and request files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors outside response decoding.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with PikeError.
pub type Result<T> = std::result::Result<T, PikeError>;

impl PikeError {
    /// Create a new invalid expression error.
    pub fn invalid_expression<S: Into<String>>(msg: S) -> Self {
        PikeError::InvalidExpression(msg.into())
    }

    /// Create a new invalid request error.
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        PikeError::InvalidRequest(msg.into())
    }

    /// Create a new unsupported query error.
    pub fn unsupported_query<S: Into<String>>(msg: S) -> Self {
        PikeError::UnsupportedQuery(msg.into())
    }

    /// Create a new malformed response error.
    pub fn malformed_response<S: Into<String>>(msg: S) -> Self {
        PikeError::MalformedResponse(msg.into())
    }

    /// Returns true if the error originated in the transport collaborator.
    pub fn is_transport(&self) -> bool {
        matches!(self, PikeError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PikeError::invalid_expression("range needs a bound");
        assert_eq!(
            error.to_string(),
            "Invalid expression: range needs a bound"
        );

        let error = PikeError::malformed_response("missing buckets");
        assert_eq!(error.to_string(), "Malformed response: missing buckets");

        let error = PikeError::unsupported_query("NaN");
        assert_eq!(error.to_string(), "Unsupported query: NaN");
    }

    #[test]
    fn test_transport_error_conversion() {
        let error = PikeError::from(TransportError::msg("connection refused"));
        assert!(error.is_transport());
        assert_eq!(error.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let pike_error = PikeError::from(io_error);

        match pike_error {
            PikeError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
