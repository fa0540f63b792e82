//! Error types for the item API client and collection manager.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the item
//! does not exist" from "the backend misbehaved." Everything else a remote
//! call can fail with is a transport-class failure and is propagated to the
//! caller unchanged; nothing here is retried.

use thiserror::Error;

/// Errors returned by `ItemClient` and `RemoteItemClient` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested item does not exist.
    #[error("resource not found")]
    NotFound,

    /// The id is not a decimal string, so no request was built.
    #[error("invalid item id {0:?}: expected a decimal string")]
    InvalidId(String),

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connect, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Network or backend failure, as opposed to a lookup miss or a
    /// malformed id.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::NotFound | ApiError::InvalidId(_))
    }
}

/// Failure to derive the next id from the current collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("existing item id {0:?} is not a decimal integer")]
    NonNumeric(String),

    #[error("next item id overflows u64")]
    Overflow,
}

/// Errors surfaced by `ItemCollectionManager`.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Id(#[from] IdError),
}
