//! Single-document operations.
//!
//! Documents are indexed, fetched, partially updated and deleted by id. A
//! [`DocumentRequest`] is compiled into a [`DocumentCall`](crate::compile::DocumentCall)
//! and the backend's reply is decoded into a [`WriteResult`] or [`GetResult`].

pub mod request;
pub mod result;

pub use self::request::DocumentRequest;
pub use self::result::{GetResult, WriteOutcome, WriteResult, decode_get, decode_write};
