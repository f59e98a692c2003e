//! The transport boundary.
//!
//! Pike never opens connections. A [`Transport`] is handed a target and a
//! compiled body and returns the backend's raw JSON reply. Connection
//! lifecycle, authentication, retries and timeouts all live behind it.

use std::fmt::{Debug, Display};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::compile::{DocumentCall, WireBody};

/// A raw, undecoded backend reply.
pub type RawResponse = Value;

/// Opaque failure reported by a transport implementation.
///
/// Wraps an [`anyhow::Error`] so implementors can attach whatever context
/// chain they have. Pike never inspects it.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(#[from] anyhow::Error);

impl TransportError {
    /// Wrap a concrete error.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TransportError(anyhow::Error::new(error))
    }

    /// Create an error from a message.
    pub fn msg<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        TransportError(anyhow::Error::msg(message))
    }

    /// Add context to the error chain.
    pub fn context<C>(self, context: C) -> Self
    where
        C: Display + Send + Sync + 'static,
    {
        TransportError(self.0.context(context))
    }

    /// The underlying error.
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

/// Sends compiled search bodies to the backend.
pub trait Transport {
    /// Send `body` to the search endpoint of `index` and return the reply.
    ///
    /// `index` may name several indices joined with `,`. Called exactly once
    /// per search.
    fn send(&self, index: &str, body: &WireBody) -> Result<RawResponse, TransportError>;
}

/// Performs single-document endpoint calls.
pub trait DocumentTransport {
    /// Perform `call` and return the reply.
    fn perform(&self, call: &DocumentCall) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, index: &str, body: &WireBody) -> Result<RawResponse, TransportError> {
        (**self).send(index, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, index: &str, body: &WireBody) -> Result<RawResponse, TransportError> {
        (**self).send(index, body)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, index: &str, body: &WireBody) -> Result<RawResponse, TransportError> {
        (**self).send(index, body)
    }
}

impl<T: DocumentTransport + ?Sized> DocumentTransport for &T {
    fn perform(&self, call: &DocumentCall) -> Result<RawResponse, TransportError> {
        (**self).perform(call)
    }
}

impl<T: DocumentTransport + ?Sized> DocumentTransport for Box<T> {
    fn perform(&self, call: &DocumentCall) -> Result<RawResponse, TransportError> {
        (**self).perform(call)
    }
}

impl<T: DocumentTransport + ?Sized> DocumentTransport for Arc<T> {
    fn perform(&self, call: &DocumentCall) -> Result<RawResponse, TransportError> {
        (**self).perform(call)
    }
}
