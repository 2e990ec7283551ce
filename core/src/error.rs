//! Error types for the blog API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers routinely distinguish
//! "the post does not exist" from any other rejection. Every other non-2xx
//! response lands in `HttpError` with the raw status and body. Transport
//! failures keep their original error as the `source()`.

use thiserror::Error;

/// Boxed error produced by a `Transport` implementation.
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the resource clients and the cached bindings.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    TransportError(#[source] TransportSource),
}

impl ApiError {
    pub fn transport(err: impl Into<TransportSource>) -> Self {
        ApiError::TransportError(err.into())
    }

    /// Status code attached by the server, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
